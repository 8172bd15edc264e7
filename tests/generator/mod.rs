mod fakes;
mod run;
