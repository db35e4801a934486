use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use payseed_generate::GenerateParams;

use crate::CliError;

/// Output directory used when neither the config nor a flag names one.
pub const DEFAULT_OUT_DIR: &str = "out";

/// Contents of an optional `payseed.toml`.
///
/// ```toml
/// out_dir = "out"
///
/// [counts]
/// onboarding_requests = 40
/// payroll_runs = 20
/// orders = 30
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PayseedConfig {
    pub out_dir: Option<PathBuf>,
    pub counts: CountOverrides,
}

/// Size parameters that replace the defaults when set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CountOverrides {
    pub onboarding_requests: Option<u32>,
    pub payroll_runs: Option<u32>,
    pub orders: Option<u32>,
}

impl CountOverrides {
    /// Apply `self` over `params`.
    pub fn apply(&self, params: GenerateParams) -> GenerateParams {
        GenerateParams {
            onboarding_requests: self
                .onboarding_requests
                .unwrap_or(params.onboarding_requests),
            payroll_runs: self.payroll_runs.unwrap_or(params.payroll_runs),
            orders: self.orders.unwrap_or(params.orders),
        }
    }
}

impl PayseedConfig {
    pub fn parse(content: &str) -> Result<Self, CliError> {
        toml::from_str(content).map_err(|err| CliError::InvalidConfig(err.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path).map_err(|err| {
            CliError::InvalidConfig(format!("cannot read {}: {err}", path.display()))
        })?;
        Self::parse(&content)
    }

    /// Defaults, then config file counts, then command-line flags.
    pub fn resolve_params(&self, flags: &CountOverrides) -> GenerateParams {
        flags.apply(self.counts.apply(GenerateParams::default()))
    }

    pub fn resolve_out_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.out_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_keeps_defaults() {
        let config = PayseedConfig::parse("").expect("parse empty config");
        assert_eq!(
            config.resolve_params(&CountOverrides::default()),
            GenerateParams::default()
        );
        assert_eq!(config.resolve_out_dir(None), PathBuf::from("out"));
    }

    #[test]
    fn flags_override_config() {
        let config = PayseedConfig::parse(
            r#"
out_dir = "data/seed"

[counts]
onboarding_requests = 12
orders = 3
"#,
        )
        .expect("parse config");

        let flags = CountOverrides {
            orders: Some(7),
            ..CountOverrides::default()
        };
        assert_eq!(config.resolve_params(&flags), GenerateParams::new(12, 20, 7));
        assert_eq!(config.resolve_out_dir(None), PathBuf::from("data/seed"));
        assert_eq!(
            config.resolve_out_dir(Some(PathBuf::from("elsewhere"))),
            PathBuf::from("elsewhere")
        );
    }

    #[test]
    fn rejects_negative_and_unknown_keys() {
        let err = PayseedConfig::parse("[counts]\norders = -1\n").expect_err("negative count");
        assert!(matches!(err, CliError::InvalidConfig(_)));

        let err = PayseedConfig::parse("seed = 7\n").expect_err("unknown key");
        assert!(matches!(err, CliError::InvalidConfig(_)));
    }
}
