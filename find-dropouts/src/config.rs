//! Main configuration management and loading
//!
//! Every parameter can be overridden on the command-line.
//!

use std::path::Path;

use chrono::NaiveDate;
use eyre::Result;
use serde::Deserialize;
use tracing::{debug, trace};

use dropouts_common::{ConfigFile, Versioned};
use dropouts_tracker::DEF_THRESHOLD;

use crate::{ScanOpts, Status};

/// Project tag, used for the configuration directory
const TAG: &str = "find-dropouts";

/// Built-in configuration, used when there is none on disk
const BUILTIN: &str = include_str!("config.hcl");

/// Default file name pattern of the readsb-hist archives
pub const DEF_PATTERN: &str = "%H%M%SZ.json.gz";

/// Main struct holding configuration
///
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    /// Config file versioning
    pub version: usize,
    /// Dropout threshold in seconds
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Day of the snapshots, `YYYY-MM-DD`
    pub date: Option<String>,
    /// chrono format for the time of day in file names
    #[serde(default = "default_pattern")]
    pub pattern: String,
    /// Skip records in error
    #[serde(default)]
    pub keep_going: bool,
}

fn default_threshold() -> f64 {
    DEF_THRESHOLD
}

fn default_pattern() -> String {
    DEF_PATTERN.to_string()
}

impl Versioned for Config {
    const VERSION: usize = 1;

    fn version(&self) -> usize {
        self.version
    }
}

impl Config {
    /// Load configuration from either the specified file, the default one or the built-in
    /// one.
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>) -> Result<Config> {
        let cfg = ConfigFile::<Config>::load(TAG, fname, BUILTIN)?;
        debug!("Configuration from {:?}", cfg.origin());
        Ok(cfg.into_inner())
    }

    /// Apply command-line overrides.
    ///
    pub fn merge(mut self, opts: &ScanOpts) -> Self {
        trace!("merge({:?})", opts);
        if let Some(threshold) = opts.threshold {
            self.threshold = threshold;
        }
        if let Some(date) = &opts.date {
            self.date = Some(date.clone());
        }
        if let Some(pattern) = &opts.pattern {
            self.pattern = pattern.clone();
        }
        self.keep_going |= opts.keep_going;
        self
    }

    /// Check values that serde can not.
    ///
    pub fn check(&self) -> Result<()> {
        if !(self.threshold > 0.) {
            return Err(Status::BadThreshold(self.threshold).into());
        }
        if let Some(date) = &self.date {
            let _ = parse_date(date)?;
        }
        Ok(())
    }

    /// Parsed `date`, if any
    ///
    pub fn date(&self) -> Result<Option<NaiveDate>> {
        self.date.as_deref().map(parse_date).transpose()
    }
}

/// Parse a `YYYY-MM-DD` date
///
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| Status::BadDate(date.to_string()))?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_config_builtin() {
        let cfg: Config = hcl_from_builtin();
        assert_eq!(1, cfg.version);
        assert_eq!(DEF_THRESHOLD, cfg.threshold);
        assert_eq!(DEF_PATTERN, cfg.pattern);
        assert_eq!(None, cfg.date);
        assert!(!cfg.keep_going);
    }

    fn hcl_from_builtin() -> Config {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), BUILTIN).unwrap();
        Config::load(Some(file.path())).unwrap()
    }

    #[test]
    fn test_config_load_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "version = 1\nthreshold = 20.0\ndate = \"2022-03-01\"")?;

        let cfg = Config::load(Some(file.path()))?;
        assert_eq!(20., cfg.threshold);
        assert_eq!(DEF_PATTERN, cfg.pattern);
        assert_eq!(Some(NaiveDate::from_ymd_opt(2022, 3, 1).unwrap()), cfg.date()?);
        assert!(cfg.check().is_ok());
        Ok(())
    }

    #[test]
    fn test_config_bad_version() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "version = 3")?;

        assert!(Config::load(Some(file.path())).is_err());
        Ok(())
    }

    #[test]
    fn test_config_missing_file() {
        let fname = PathBuf::from("/nonexistent/find-dropouts.hcl");
        assert!(Config::load(Some(&fname)).is_err());
    }

    #[test]
    fn test_config_merge() {
        let cfg = hcl_from_builtin();
        let opts = ScanOpts {
            threshold: Some(30.),
            date: Some("2022-03-02".to_string()),
            pattern: None,
            keep_going: true,
            output: None,
            dir: PathBuf::from("testdata"),
        };

        let cfg = cfg.merge(&opts);
        assert_eq!(30., cfg.threshold);
        assert_eq!(Some("2022-03-02".to_string()), cfg.date);
        assert_eq!(DEF_PATTERN, cfg.pattern);
        assert!(cfg.keep_going);
    }

    #[test]
    fn test_config_check() {
        let mut cfg = hcl_from_builtin();
        cfg.threshold = 0.;
        assert!(cfg.check().is_err());

        cfg.threshold = 60.;
        cfg.date = Some("03/01/2022".to_string());
        assert!(cfg.check().is_err());
    }
}
