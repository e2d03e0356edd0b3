use crate::error::ConfigError;
use chrono::NaiveDate;
use std::path::PathBuf;

pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";
pub const DEFAULT_INPUT: &str = "plugin-repos.txt";
pub const DEFAULT_TOKEN_VAR: &str = "GH_TOKEN";
pub const DEFAULT_BATCH_SIZE: usize = 40;

/// Everything a run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub endpoint: String,
    pub batch_size: usize,
}

impl Config {
    pub fn new(token: String) -> Self {
        Self {
            token,
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Resolve the bearer token through `lookup`, normally `std::env::var`.
    pub fn token_from<F>(var: &str, lookup: F) -> Result<String, ConfigError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        match lookup(var) {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(ConfigError::MissingToken(var.to_string())),
        }
    }

    /// `<output_dir>/plugin-details-<YYYYMMDD>.csv`
    pub fn output_path(&self, date: NaiveDate) -> PathBuf {
        self.output_dir
            .join(format!("plugin-details-{}.csv", date.format("%Y%m%d")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_token_is_an_error() {
        let err = Config::token_from("GH_TOKEN", |_| None).unwrap_err();
        assert_eq!(err.to_string(), "GH_TOKEN environment variable not set.");
    }

    #[test]
    fn blank_token_is_an_error() {
        assert!(Config::token_from("GH_TOKEN", |_| Some("  ".to_string())).is_err());
    }

    #[test]
    fn token_is_looked_up_by_name() {
        let token = Config::token_from("MY_TOKEN", |var| {
            (var == "MY_TOKEN").then(|| "secret".to_string())
        })
        .unwrap();
        assert_eq!(token, "secret");
    }

    #[test]
    fn output_path_is_date_stamped() {
        let mut config = Config::new("t".to_string());
        config.output_dir = PathBuf::from("out");
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(
            config.output_path(date),
            PathBuf::from("out").join("plugin-details-20240307.csv")
        );
    }

    #[test]
    fn defaults() {
        let config = Config::new("t".to_string());
        assert_eq!(config.batch_size, 40);
        assert_eq!(config.input, PathBuf::from("plugin-repos.txt"));
        assert_eq!(config.endpoint, "https://api.github.com/graphql");
    }
}
