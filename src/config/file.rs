use crate::utils::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional TOML file supplying planner defaults. Command-line flags take
/// precedence over anything set here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub planner: Option<PlannerDefaults>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerDefaults {
    pub goal: Option<String>,
    pub calorie_limit: Option<f64>,
    pub stomach_capacity_ml: Option<f64>,
    pub allergies: Option<Vec<String>>,
    pub dietary_filters: Option<Vec<String>>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlannerError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| PlannerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the environment value; unknown variables
    /// are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}
