//! "Views and columns" step: list view/column limits and toggles

use anyhow::Result;

use super::{Prompter, WizardStep};
use crate::generator::ClientGeneratorDefinition;

/// Lowest selectable per-list limit
pub const SLIDER_MIN: u32 = 0;

/// Highest selectable per-list limit
pub const SLIDER_MAX: u32 = 10;

/// Bounded integer control; values outside the range are clamped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackBar {
    minimum: u32,
    maximum: u32,
    value: u32,
}

impl TrackBar {
    pub fn new(minimum: u32, maximum: u32) -> Self {
        let maximum = maximum.max(minimum);
        Self {
            minimum,
            maximum,
            value: minimum,
        }
    }

    pub fn minimum(&self) -> u32 {
        self.minimum
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Move the thumb, returning the value actually taken
    pub fn set_value(&mut self, value: u32) -> u32 {
        self.value = value.clamp(self.minimum, self.maximum);
        self.value
    }
}

impl Default for TrackBar {
    fn default() -> Self {
        Self::new(SLIDER_MIN, SLIDER_MAX)
    }
}

/// Page model: two sliders with their labels and two checkboxes
///
/// Every handler writes the new value straight into the definition; there are
/// no cross-field rules.
#[derive(Debug, Clone, Default)]
pub struct ViewsColumnsPage {
    columns_slider: TrackBar,
    views_slider: TrackBar,
    create_columns: bool,
    create_views: bool,
    columns_label: String,
    views_label: String,
}

impl ViewsColumnsPage {
    pub fn new() -> Self {
        let mut page = Self::default();
        page.columns_label = page.columns_slider.value().to_string();
        page.views_label = page.views_slider.value().to_string();
        page
    }

    pub fn on_columns_changed(&mut self, value: u32, definition: &mut ClientGeneratorDefinition) {
        let value = self.columns_slider.set_value(value);
        definition.base.max_number_of_columns_per_list = value;
        self.columns_label = value.to_string();
    }

    pub fn on_views_changed(&mut self, value: u32, definition: &mut ClientGeneratorDefinition) {
        let value = self.views_slider.set_value(value);
        definition.base.max_number_of_views_per_list = value;
        self.views_label = value.to_string();
    }

    pub fn on_create_columns_changed(&mut self, checked: bool, definition: &mut ClientGeneratorDefinition) {
        self.create_columns = checked;
        definition.base.create_columns = checked;
    }

    pub fn on_create_views_changed(&mut self, checked: bool, definition: &mut ClientGeneratorDefinition) {
        self.create_views = checked;
        definition.base.create_views = checked;
    }

    pub fn columns_value(&self) -> u32 {
        self.columns_slider.value()
    }

    pub fn views_value(&self) -> u32 {
        self.views_slider.value()
    }

    pub fn create_columns(&self) -> bool {
        self.create_columns
    }

    pub fn create_views(&self) -> bool {
        self.create_views
    }

    pub fn columns_label(&self) -> &str {
        &self.columns_label
    }

    pub fn views_label(&self) -> &str {
        &self.views_label
    }
}

impl WizardStep for ViewsColumnsPage {
    fn title(&self) -> &'static str {
        "Views and Columns"
    }

    /// Show what the definition already holds, without writing back
    fn load_settings(&mut self, definition: &ClientGeneratorDefinition) {
        let columns = self.columns_slider.set_value(definition.base.max_number_of_columns_per_list);
        let views = self.views_slider.set_value(definition.base.max_number_of_views_per_list);
        self.columns_label = columns.to_string();
        self.views_label = views.to_string();
        self.create_columns = definition.base.create_columns;
        self.create_views = definition.base.create_views;
    }

    fn prompt(&mut self, prompter: &mut dyn Prompter, definition: &mut ClientGeneratorDefinition) -> Result<()> {
        let create_columns = prompter.confirm("Create columns", self.create_columns)?;
        self.on_create_columns_changed(create_columns, definition);

        let columns = prompter.number(
            "Max number of columns per list",
            self.columns_slider.minimum(),
            self.columns_slider.maximum(),
            self.columns_slider.value(),
        )?;
        self.on_columns_changed(columns, definition);

        let create_views = prompter.confirm("Create views", self.create_views)?;
        self.on_create_views_changed(create_views, definition);

        let views = prompter.number(
            "Max number of views per list",
            self.views_slider.minimum(),
            self.views_slider.maximum(),
            self.views_slider.value(),
        )?;
        self.on_views_changed(views, definition);

        Ok(())
    }
}
