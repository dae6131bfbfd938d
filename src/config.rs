use crate::data::DatasetSource;
use crate::zones::SelectionPolicy;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Longest delay accepted for either simulated wait
const MAX_DELAY_MS: u64 = 60_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--{flag} must be at most {max} ms (got {value})", max = MAX_DELAY_MS)]
    DelayTooLong { flag: &'static str, value: u64 },

    #[error("dataset file {0} does not exist")]
    MissingDataset(PathBuf),
}

#[derive(Debug, Parser)]
#[command(name = "peacemap")]
#[command(
    about = "Explore conflict zones and peacebuilding efforts on a terminal world map",
    long_about = None
)]
pub struct Args {
    /// Directory holding Natural Earth GeoJSON coastlines and borders
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Load zones and case studies from this JSON file instead of the bundled set
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Simulated dataset load time
    #[arg(long, default_value = "1000")]
    pub load_delay_ms: u64,

    /// Simulated idea submission time
    #[arg(long, default_value = "2000")]
    pub submit_delay_ms: u64,

    /// Directory for peacemap.log
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,

    /// Deselect a zone when a filter change hides it
    #[arg(long)]
    pub evict_hidden_selection: bool,
}

/// Validated runtime settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub dataset: DatasetSource,
    pub load_delay: Duration,
    pub submit_delay: Duration,
    pub log_dir: PathBuf,
    pub selection_policy: SelectionPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            dataset: DatasetSource::Bundled,
            load_delay: Duration::from_millis(1000),
            submit_delay: Duration::from_millis(2000),
            log_dir: PathBuf::from("logs"),
            selection_policy: SelectionPolicy::Retain,
        }
    }
}

impl TryFrom<Args> for AppConfig {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let load_delay = checked_delay("load-delay-ms", args.load_delay_ms)?;
        let submit_delay = checked_delay("submit-delay-ms", args.submit_delay_ms)?;

        let dataset = match args.dataset {
            Some(path) if !path.is_file() => return Err(ConfigError::MissingDataset(path)),
            Some(path) => DatasetSource::File(path),
            None => DatasetSource::Bundled,
        };

        let selection_policy = if args.evict_hidden_selection {
            SelectionPolicy::EvictHidden
        } else {
            SelectionPolicy::Retain
        };

        Ok(Self {
            data_dir: args.data_dir,
            dataset,
            load_delay,
            submit_delay,
            log_dir: args.log_dir,
            selection_policy,
        })
    }
}

fn checked_delay(flag: &'static str, value: u64) -> Result<Duration, ConfigError> {
    if value > MAX_DELAY_MS {
        return Err(ConfigError::DelayTooLong { flag, value });
    }
    Ok(Duration::from_millis(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<AppConfig, ConfigError> {
        let argv = std::iter::once("peacemap").chain(argv.iter().copied());
        let args = Args::try_parse_from(argv).unwrap();
        AppConfig::try_from(args)
    }

    #[test]
    fn test_defaults_match_default_config() {
        assert_eq!(parse(&[]).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = parse(&[
            "--load-delay-ms",
            "0",
            "--submit-delay-ms",
            "250",
            "--evict-hidden-selection",
            "--data-dir",
            "/tmp/ne",
        ])
        .unwrap();
        assert_eq!(config.load_delay, Duration::ZERO);
        assert_eq!(config.submit_delay, Duration::from_millis(250));
        assert_eq!(config.selection_policy, SelectionPolicy::EvictHidden);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/ne"));
    }

    #[test]
    fn test_excessive_delay_rejected() {
        assert_eq!(
            parse(&["--load-delay-ms", "600000"]),
            Err(ConfigError::DelayTooLong {
                flag: "load-delay-ms",
                value: 600_000
            })
        );
    }

    #[test]
    fn test_missing_dataset_rejected() {
        assert!(matches!(
            parse(&["--dataset", "/nonexistent/zones.json"]),
            Err(ConfigError::MissingDataset(_))
        ));
    }
}
