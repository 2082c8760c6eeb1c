//! Setup and inspection commands: init, config, classify

use crate::config::{DayplanPaths, EngineConfig, Settings};
use crate::error::DayplanResult;
use crate::models::{IncomeTier, Money};
use crate::services::IncomeClassifier;
use crate::storage::Storage;

use super::parse_amount;

const RECENT_ACTIVITY: usize = 5;

/// Create the data directory, settings and an editable profiles file
pub fn handle_init(paths: &DayplanPaths, settings: &Settings, first_run: bool) {
    if !first_run {
        println!("DayPlan is already initialized at: {}", paths.base_dir().display());
        println!("  User:     {}", settings.user_id);
        return;
    }

    println!("Initialized DayPlan at: {}", paths.base_dir().display());
    println!("Initialization complete!");
    println!();
    println!("  User:     {}", settings.user_id);
    println!("  Settings: {}", paths.settings_file().display());
    println!("  Profiles: {}", paths.profiles_file().display());
    println!();
    println!("Run 'dayplan plan generate --answers <file>' to build your first month.");
}

/// Print paths, settings and the loaded tables
pub fn handle_config(
    paths: &DayplanPaths,
    storage: &Storage,
    settings: &Settings,
    config: &EngineConfig,
) -> DayplanResult<()> {
    println!("DayPlan Configuration");
    println!("=====================");
    println!("Base directory:  {}", paths.base_dir().display());
    println!("Plans file:      {}", paths.plans_file().display());
    println!("Audit log:       {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  User:                  {}", settings.user_id);
    println!("  Default region:        {}", settings.default_region);
    println!("  Currency symbol:       {}", settings.currency_symbol);
    println!("  Warning threshold:     {}%", settings.warning_threshold_percent);
    println!("  Clustered selection:   {:?}", settings.clustered_selection);
    println!("  Clustered default days: {}", settings.clustered_default_days);
    println!();
    println!("Regions (default {}):", config.default_region());
    for region in config.regions() {
        let bounds: Vec<String> = region
            .upper_bounds
            .iter()
            .map(|b| b.format_with_symbol(&settings.currency_symbol))
            .collect();
        println!("  {:<8} {}", region.code, bounds.join(" / "));
    }
    println!();
    println!("Categories:");
    for spec in config.categories() {
        println!("  {:<16} {}", spec.name, spec.behavior);
    }

    let recent = storage.audit().read_recent(RECENT_ACTIVITY)?;
    if !recent.is_empty() {
        println!();
        println!("Recent activity:");
        for entry in &recent {
            println!("  {}", entry.format_human_readable());
        }
    }
    Ok(())
}

/// Classify a monthly income and show the region's bands
pub fn handle_classify(
    config: &EngineConfig,
    settings: &Settings,
    income: &str,
    region: Option<&str>,
) -> DayplanResult<()> {
    let monthly = parse_amount(income)?;
    let region = region.unwrap_or(&settings.default_region);
    let profile = config.region(region);
    let tier = IncomeClassifier::new(config).classify(monthly, region);

    let symbol = settings.currency_symbol.as_str();
    let annual = Money::from_cents(monthly.cents().saturating_mul(12));

    println!(
        "{}/month in {} ({}/year): {}",
        monthly.format_with_symbol(symbol),
        profile.code,
        annual.format_with_symbol(symbol),
        tier
    );

    let mut lower: Option<Money> = None;
    for (band, bound) in IncomeTier::all().iter().zip(profile.upper_bounds.iter()) {
        let marker = if *band == tier { "*" } else { " " };
        let bound_text = bound.format_with_symbol(symbol);
        match lower {
            Some(lower) => println!(
                " {} {:<14} {} - {}",
                marker,
                band,
                lower.format_with_symbol(symbol),
                bound_text
            ),
            None => println!(" {} {:<14} up to {}", marker, band, bound_text),
        }
        lower = Some(*bound);
    }
    if let Some(top) = lower {
        let marker = if tier == IncomeTier::High { "*" } else { " " };
        println!(
            " {} {:<14} over {}",
            marker,
            IncomeTier::High,
            top.format_with_symbol(symbol)
        );
    }
    Ok(())
}
