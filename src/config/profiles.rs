//! Engine configuration tables
//!
//! Region income thresholds and the category behavior table. Both are read-only
//! once loaded: they are validated a single time and handed to the engine by
//! reference.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::paths::DayplanPaths;
use crate::error::{DayplanError, DayplanResult};
use crate::models::{CategoryBehavior, CategorySpec, Money, RegionProfile};
use crate::storage::file_io::{read_json_required, write_json_atomic};

/// On-disk shape of `profiles.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilesFile {
    pub default_region: String,
    pub regions: Vec<RegionProfile>,
    pub categories: Vec<CategorySpec>,
}

impl Default for ProfilesFile {
    fn default() -> Self {
        Self {
            default_region: "US".into(),
            regions: builtin_regions(),
            categories: builtin_categories(),
        }
    }
}

/// Validated, lookup-ready engine tables
#[derive(Debug, Clone)]
pub struct EngineConfig {
    default_region: String,
    regions: BTreeMap<String, RegionProfile>,
    categories: BTreeMap<String, CategorySpec>,
}

impl EngineConfig {
    /// Validate a profiles file and index it
    ///
    /// Fails fast on: missing default region, non-increasing thresholds,
    /// duplicate regions or categories.
    pub fn from_file(file: ProfilesFile) -> DayplanResult<Self> {
        let mut regions = BTreeMap::new();
        for region in file.regions {
            region.validate().map_err(DayplanError::Config)?;
            let key = normalize_region(&region.code);
            if regions.insert(key, region.clone()).is_some() {
                return Err(DayplanError::Config(format!(
                    "region '{}' is defined more than once",
                    region.code
                )));
            }
        }

        let default_region = normalize_region(&file.default_region);
        if !regions.contains_key(&default_region) {
            return Err(DayplanError::Config(format!(
                "default region '{}' has no profile",
                file.default_region
            )));
        }

        let mut categories = BTreeMap::new();
        for spec in file.categories {
            if spec.name.trim().is_empty() {
                return Err(DayplanError::Config("category name cannot be empty".into()));
            }
            let key = normalize_category(&spec.name);
            if categories.insert(key, spec.clone()).is_some() {
                return Err(DayplanError::Config(format!(
                    "category '{}' has more than one behavior",
                    spec.name
                )));
            }
        }

        Ok(Self {
            default_region,
            regions,
            categories,
        })
    }

    /// The built-in tables
    pub fn builtin() -> DayplanResult<Self> {
        Self::from_file(ProfilesFile::default())
    }

    /// Load `profiles.json` if present, otherwise use the built-in tables
    pub fn load_or_default(paths: &DayplanPaths) -> DayplanResult<Self> {
        let path = paths.profiles_file();
        if !path.exists() {
            tracing::debug!("no profiles file, using built-in tables");
            return Self::builtin();
        }

        let file: ProfilesFile = read_json_required(&path)
            .map_err(|e| DayplanError::Config(format!("Failed to load profiles: {}", e)))?;
        tracing::debug!(path = %path.display(), "loaded profiles");
        Self::from_file(file)
    }

    /// Write the built-in tables so users can edit them
    pub fn write_default(paths: &DayplanPaths) -> DayplanResult<()> {
        write_json_atomic(paths.profiles_file(), &ProfilesFile::default())
    }

    /// Resolve a region, falling back to the default national profile
    pub fn region(&self, code: &str) -> &RegionProfile {
        let key = normalize_region(code);
        match self.regions.get(&key) {
            Some(profile) => profile,
            None => {
                tracing::debug!(region = code, fallback = %self.default_region, "unknown region");
                &self.regions[&self.default_region]
            }
        }
    }

    pub fn default_region(&self) -> &str {
        &self.default_region
    }

    pub fn regions(&self) -> impl Iterator<Item = &RegionProfile> {
        self.regions.values()
    }

    /// Look up a category's spec
    pub fn category(&self, name: &str) -> Option<&CategorySpec> {
        self.categories.get(&normalize_category(name))
    }

    /// Look up a category's spec, failing if it has no registered behavior
    pub fn require_category(&self, name: &str) -> DayplanResult<&CategorySpec> {
        self.category(name)
            .ok_or_else(|| DayplanError::unknown_category(name))
    }

    /// Categories that take a share of the discretionary pool
    pub fn discretionary_categories(&self) -> impl Iterator<Item = &CategorySpec> {
        self.categories.values().filter(|c| c.is_discretionary())
    }

    pub fn categories(&self) -> impl Iterator<Item = &CategorySpec> {
        self.categories.values()
    }
}

fn normalize_region(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

fn normalize_category(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace([' ', '-'], "_")
}

fn bounds(dollars: [i64; 4]) -> [Money; 4] {
    dollars.map(Money::from_dollars)
}

fn builtin_regions() -> Vec<RegionProfile> {
    vec![
        RegionProfile::new("US", "United States", bounds([30_000, 58_000, 94_000, 153_000])),
        RegionProfile::new("US-CA", "California", bounds([36_000, 70_000, 112_000, 182_000])),
        RegionProfile::new("US-NY", "New York", bounds([35_000, 68_000, 110_000, 178_000])),
        RegionProfile::new("US-TX", "Texas", bounds([28_000, 55_000, 90_000, 145_000])),
        RegionProfile::new("US-FL", "Florida", bounds([28_000, 54_000, 88_000, 142_000])),
    ]
}

fn builtin_categories() -> Vec<CategorySpec> {
    use CategoryBehavior::*;

    let mut specs = vec![
        CategorySpec::month_start("rent"),
        CategorySpec::month_start("mortgage"),
        CategorySpec::month_start("school_fees"),
    ];
    specs.extend(
        [
            "utilities",
            "insurance",
            "phone",
            "internet",
            "subscriptions",
            "loan_payment",
            "childcare",
        ]
        .into_iter()
        .map(|name| CategorySpec::new(name, Fixed)),
    );
    specs.extend(
        ["groceries", "coffee", "transport"]
            .into_iter()
            .map(|name| CategorySpec::new(name, Spread)),
    );
    specs.extend(
        [
            "dining_out",
            "entertainment",
            "clothing",
            "travel",
            "shopping",
            "personal_care",
            "gifts",
        ]
        .into_iter()
        .map(|name| CategorySpec::new(name, Clustered)),
    );
    specs
}
