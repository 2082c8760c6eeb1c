//! Plan commands: generate and show

use std::fs;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::{EngineConfig, Settings};
use crate::display::{format_calendar, format_plan_summary, format_transfers};
use crate::error::{DayplanError, DayplanResult};
use crate::models::OnboardingAnswers;
use crate::services::PlanService;
use crate::storage::Storage;

use super::parse_month;

/// Plan subcommands
#[derive(Subcommand, Debug)]
pub enum PlanCommands {
    /// Generate a month's plan from onboarding answers
    Generate {
        /// Answers file (JSON, or YAML with a .yaml/.yml extension)
        #[arg(short, long)]
        answers: PathBuf,

        /// Month to plan (YYYY-MM, default: current)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show a stored plan
    Show {
        /// Month (YYYY-MM, default: current)
        #[arg(short, long)]
        month: Option<String>,

        /// Include the day-by-day calendar
        #[arg(short, long)]
        calendar: bool,
    },
}

/// Handle plan commands
pub fn handle_plan_command(
    storage: &Storage,
    config: &EngineConfig,
    settings: &Settings,
    cmd: PlanCommands,
) -> DayplanResult<()> {
    let service = PlanService::new(storage, config, settings);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        PlanCommands::Generate { answers, month } => {
            let month = parse_month(month.as_deref())?;
            let answers = load_answers(&answers)?;
            let record = service.generate(&answers, month)?;

            println!("{}", format_plan_summary(&record, symbol));
            println!("{}", format_calendar(&record.days, symbol));
        }
        PlanCommands::Show { month, calendar } => {
            let record = service.get(parse_month(month.as_deref())?)?;

            println!("{}", format_plan_summary(&record, symbol));
            if calendar {
                println!("{}", format_calendar(&record.days, symbol));
            }
            if !record.transfers.is_empty() {
                println!("Transfers:");
                print!("{}", format_transfers(&record.transfers, symbol));
            }
        }
    }

    Ok(())
}

/// Read onboarding answers from a JSON or YAML file
pub fn load_answers(path: &Path) -> DayplanResult<OnboardingAnswers> {
    let contents = fs::read_to_string(path)
        .map_err(|e| DayplanError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );

    let parsed: Result<OnboardingAnswers, String> = if is_yaml {
        serde_yaml::from_str(&contents).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&contents).map_err(|e| e.to_string())
    };

    parsed.map_err(|e| {
        DayplanError::Validation(format!("Invalid answers in {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_json_answers() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("answers.json");
        fs::write(
            &path,
            r#"{"region": "US-TX", "monthly_income": 400000, "habits": {"coffee": {"count": 2, "cadence": "weekly"}}}"#,
        )
        .unwrap();

        let answers = load_answers(&path).unwrap();
        assert_eq!(answers.region, "US-TX");
        assert_eq!(answers.habits["coffee"].monthly_count(), 8.0);
    }

    #[test]
    fn test_load_yaml_answers() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("answers.yaml");
        fs::write(
            &path,
            "region: US\nmonthly_income: 500000\nfixed_expenses:\n  rent: 150000\nsavings_goal: 50000\n",
        )
        .unwrap();

        let answers = load_answers(&path).unwrap();
        assert_eq!(answers.fixed_expenses["rent"].cents(), 150_000);
    }

    #[test]
    fn test_malformed_answers() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("answers.json");
        fs::write(&path, r#"{"region": "US"}"#).unwrap();
        assert!(load_answers(&path).unwrap_err().is_validation());
    }
}
