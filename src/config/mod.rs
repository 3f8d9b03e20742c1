pub mod file;

use crate::core::pipeline::{DEFAULT_CALORIE_LIMIT, DEFAULT_STOMACH_CAPACITY_ML};
use crate::domain::ports::PlannerSettings;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use file::FileConfig;

pub const DEFAULT_GOAL: &str = "enjoyment_first";

#[derive(Debug, Clone, Parser)]
#[command(name = "buffet-planner")]
#[command(about = "Generates an ordered, portioned eating strategy from a dish list")]
pub struct CliConfig {
    /// Path to a JSON dish list; the demo buffet is used when omitted
    #[arg(long)]
    pub input: Option<String>,

    /// Write the response JSON here instead of stdout
    #[arg(long)]
    pub output: Option<String>,

    /// fat_loss | muscle_gain | blood_sugar | enjoyment_first
    #[arg(long)]
    pub goal: Option<String>,

    #[arg(long)]
    pub calorie_limit: Option<f64>,

    #[arg(long)]
    pub stomach_capacity_ml: Option<f64>,

    /// Comma-separated allergen keywords to avoid
    #[arg(long, value_delimiter = ',')]
    pub allergies: Vec<String>,

    /// Comma-separated dietary tags (vegan, vegetarian)
    #[arg(long, value_delimiter = ',')]
    pub dietary_filters: Vec<String>,

    /// Optional TOML file supplying planner defaults
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Resolves the effective settings: command-line flags win over the
    /// config file, which wins over built-in defaults.
    pub fn resolve(self) -> Result<ResolvedSettings> {
        let file_defaults = match &self.config {
            Some(path) => FileConfig::from_file(path)?.planner,
            None => None,
        };
        let defaults = file_defaults.unwrap_or(file::PlannerDefaults {
            goal: None,
            calorie_limit: None,
            stomach_capacity_ml: None,
            allergies: None,
            dietary_filters: None,
        });

        Ok(ResolvedSettings {
            input: self.input,
            output: self.output,
            goal: self
                .goal
                .or(defaults.goal)
                .unwrap_or_else(|| DEFAULT_GOAL.to_string()),
            calorie_limit: self
                .calorie_limit
                .or(defaults.calorie_limit)
                .unwrap_or(DEFAULT_CALORIE_LIMIT),
            stomach_capacity_ml: self
                .stomach_capacity_ml
                .or(defaults.stomach_capacity_ml)
                .unwrap_or(DEFAULT_STOMACH_CAPACITY_ML),
            allergies: if self.allergies.is_empty() {
                defaults.allergies.unwrap_or_default()
            } else {
                self.allergies
            },
            dietary_filters: if self.dietary_filters.is_empty() {
                defaults.dietary_filters.unwrap_or_default()
            } else {
                self.dietary_filters
            },
            verbose: self.verbose,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub input: Option<String>,
    pub output: Option<String>,
    pub goal: String,
    pub calorie_limit: f64,
    pub stomach_capacity_ml: f64,
    pub allergies: Vec<String>,
    pub dietary_filters: Vec<String>,
    pub verbose: bool,
}

impl PlannerSettings for ResolvedSettings {
    fn goal(&self) -> &str {
        &self.goal
    }

    fn calorie_limit(&self) -> f64 {
        self.calorie_limit
    }

    fn stomach_capacity_ml(&self) -> f64 {
        self.stomach_capacity_ml
    }

    fn allergies(&self) -> &[String] {
        &self.allergies
    }

    fn dietary_filters(&self) -> &[String] {
        &self.dietary_filters
    }
}

impl Validate for ResolvedSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_positive("calorie_limit", self.calorie_limit)?;
        validation::validate_range("stomach_capacity_ml", self.stomach_capacity_ml, 100.0, 5000.0)?;
        if let Some(input) = &self.input {
            validation::validate_path("input", input)?;
        }
        if let Some(output) = &self.output {
            validation::validate_path("output", output)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn bare_cli() -> CliConfig {
        CliConfig {
            input: None,
            output: None,
            goal: None,
            calorie_limit: None,
            stomach_capacity_ml: None,
            allergies: vec![],
            dietary_filters: vec![],
            config: None,
            verbose: false,
        }
    }

    #[test]
    fn test_resolve_built_in_defaults() {
        let settings = bare_cli().resolve().unwrap();

        assert_eq!(settings.goal, "enjoyment_first");
        assert_eq!(settings.calorie_limit, 2000.0);
        assert_eq!(settings.stomach_capacity_ml, 1350.0);
        assert!(settings.allergies.is_empty());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_cli_flags_win_over_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[planner]\ngoal = \"fat_loss\"\ncalorie_limit = 1500\n")
            .unwrap();

        let mut cli = bare_cli();
        cli.config = Some(temp_file.path().to_str().unwrap().to_string());
        cli.goal = Some("muscle_gain".to_string());

        let settings = cli.resolve().unwrap();
        assert_eq!(settings.goal, "muscle_gain");
        // calorie_limit was not set on the command line, so the file wins
        assert_eq!(settings.calorie_limit, 1500.0);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut settings = bare_cli().resolve().unwrap();
        settings.calorie_limit = 0.0;
        assert!(settings.validate().is_err());

        let mut settings = bare_cli().resolve().unwrap();
        settings.stomach_capacity_ml = 50_000.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let mut cli = bare_cli();
        cli.config = Some("/definitely/not/here.toml".to_string());
        assert!(cli.resolve().is_err());
    }
}
