//! Sample value pools for synthetic names

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::collections::HashMap;

pub const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William", "Elizabeth",
    "David", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah", "Charles", "Karen",
    "Daniel", "Nancy", "Matthew", "Lisa", "Anthony", "Betty", "Mark", "Margaret", "Donald", "Sandra",
    "Steven", "Ashley", "Paul", "Kimberly", "Andrew", "Emily", "Joshua", "Donna", "Kenneth", "Michelle",
    "Kevin", "Carol", "Brian", "Amanda", "George", "Melissa", "Edward", "Deborah", "Ronald", "Stephanie",
    "Timothy", "Rebecca", "Jason", "Laura", "Jeffrey", "Sharon", "Ryan", "Cynthia", "Jacob", "Kathleen",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez", "Martinez",
    "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor", "Moore", "Jackson", "Martin",
    "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez", "Clark", "Ramirez", "Lewis", "Robinson",
    "Walker", "Young", "Allen", "King", "Wright", "Scott", "Torres", "Nguyen", "Hill", "Flores",
    "Green", "Adams", "Nelson", "Baker", "Hall", "Rivera", "Campbell", "Mitchell", "Carter", "Roberts",
    "Gomez", "Phillips", "Evans", "Turner", "Diaz", "Parker", "Cruz", "Edwards", "Collins", "Reyes",
];

/// Department and team names used as security group display names
pub const ACCOUNTS: &[&str] = &[
    "Accounting", "Accounts Payable", "Accounts Receivable", "Administration", "Audit", "Billing",
    "Business Development", "Compliance", "Corporate Communications", "Customer Service", "Customer Success",
    "Data Analytics", "Design", "Engineering", "Executive Board", "Facilities", "Finance", "Help Desk",
    "Human Resources", "Information Security", "Infrastructure", "Internal Audit", "Investor Relations",
    "IT Operations", "Legal", "Logistics", "Maintenance", "Marketing", "Network Operations", "Payroll",
    "Procurement", "Product Management", "Production", "Project Management Office", "Public Relations",
    "Purchasing", "Quality Assurance", "Quality Control", "Research", "Risk Management", "Sales",
    "Sales Operations", "Security", "Shipping", "Software Development", "Strategy", "Supply Chain",
    "Support", "Talent Acquisition", "Training", "Treasury", "Warehouse",
];

pub const COMPANIES: &[&str] = &[
    "Adventure Works", "Alpine Ski House", "Bellows College", "Best For You Organics", "Blue Yonder Airlines",
    "City Power and Light", "Coho Vineyard", "Coho Winery", "Consolidated Messenger", "Contoso Pharmaceuticals",
    "Contoso Suites", "Fabrikam Residences", "First Up Consultants", "Fourth Coffee", "Graphic Design Institute",
    "Humongous Insurance", "Lamna Healthcare", "Liberty Delightful", "Litware", "Lucerne Publishing",
    "Margies Travel", "Munson Pickles", "Nod Publishers", "Northwind Traders", "Proseware",
    "Relecloud", "School of Fine Art", "Southridge Video", "Tailspin Toys", "Trey Research",
    "VanArsdel", "Wide World Importers", "Wingtip Toys", "Woodgrove Bank",
];

pub const OFFICES: &[&str] = &[
    "Amsterdam", "Atlanta", "Berlin", "Boston", "Chicago", "Dallas", "Denver", "Dublin", "Frankfurt",
    "Hamburg", "Houston", "London", "Madrid", "Melbourne", "Milan", "Munich", "New York", "Oslo",
    "Paris", "Prague", "Seattle", "Singapore", "Stockholm", "Sydney", "Tokyo", "Toronto", "Vienna",
    "Warsaw", "Zagreb", "Zurich",
];

/// Random sampler over the value pools
///
/// Seeded samplers produce the same sequence on every run.
pub struct SampleData {
    rng: StdRng,
}

impl SampleData {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick one value; an empty pool yields an empty string
    pub fn sample_value<'a>(&mut self, pool: &[&'a str]) -> &'a str {
        pool.choose(&mut self.rng).copied().unwrap_or_default()
    }

    pub fn first_name(&mut self) -> &'static str {
        self.sample_value(FIRST_NAMES)
    }

    pub fn last_name(&mut self) -> &'static str {
        self.sample_value(LAST_NAMES)
    }

    pub fn account(&mut self) -> &'static str {
        self.sample_value(ACCOUNTS)
    }

    /// Combine one value from each pool, e.g. `Northwind Traders Berlin`
    pub fn random_name(&mut self, primary: &[&str], secondary: &[&str]) -> String {
        let first = self.sample_value(primary);
        let second = self.sample_value(secondary);
        match (first.is_empty(), second.is_empty()) {
            (false, false) => format!("{} {}", first, second),
            (false, true) => first.to_string(),
            _ => second.to_string(),
        }
    }

    /// Site collection title drawn from companies and offices
    pub fn company_office_name(&mut self) -> String {
        self.random_name(COMPANIES, OFFICES)
    }
}

impl Default for SampleData {
    fn default() -> Self {
        Self::new()
    }
}

/// Names drawn from a fixed pool that keep coming once the pool runs out
///
/// Until every pool value has been handed out a draw may repeat an earlier
/// name. After that each draw gets the next free number for its value,
/// e.g. `Finance 2`, so a caller can ask for more names than the pool holds.
#[derive(Debug)]
pub struct PoolNames {
    pool: &'static [&'static str],
    issued: HashMap<&'static str, usize>,
}

impl PoolNames {
    pub fn new(pool: &'static [&'static str]) -> Self {
        Self {
            pool,
            issued: HashMap::with_capacity(pool.len()),
        }
    }

    /// Security group display names
    pub fn accounts() -> Self {
        Self::new(ACCOUNTS)
    }

    /// Every pool value has been handed out at least once
    pub fn is_exhausted(&self) -> bool {
        self.issued.len() >= self.pool.len()
    }

    pub fn next(&mut self, sample_data: &mut SampleData) -> String {
        let exhausted = self.is_exhausted();
        let base = sample_data.sample_value(self.pool);
        let count = self.issued.entry(base).or_insert(0);

        if *count == 0 {
            *count = 1;
            base.to_string()
        } else if exhausted {
            *count += 1;
            format!("{} {}", base, count)
        } else {
            base.to_string()
        }
    }
}
