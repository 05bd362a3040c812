//! Harness configuration.
//!
//! Every field has a default, so an empty or partial YAML file is valid.
//!
//! ```yaml
//! title: "Billing helpers"
//! report_dir: target/reports
//! seed: 1234              # omit for a fresh entropy seed each run
//! backup_retention: 3     # 0 disables backups of previous reports
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{HarnessError, Result};
use crate::registry::DEFAULT_PREFIX;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Title printed at the top of both reports.
    pub title: String,
    /// Reserved name prefix that marks a candidate as a test unit.
    pub prefix: String,
    pub report_dir: PathBuf,
    pub doc_file: String,
    pub run_file: String,
    /// Seed of the randomized pass; `None` draws one from entropy.
    pub seed: Option<u64>,
    pub capture_backtrace: bool,
    /// Previous reports kept as backups; 0 disables backups.
    pub backup_retention: usize,
    pub use_colors: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            title: "Test report".to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            report_dir: PathBuf::from("reports"),
            doc_file: "test_doc.log".to_string(),
            run_file: "test_run.log".to_string(),
            seed: None,
            capture_backtrace: true,
            backup_retention: 5,
            use_colors: atty::is(atty::Stream::Stderr),
        }
    }
}

impl HarnessConfig {
    /// Loads a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| HarnessError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&text).map_err(|message| HarnessError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    fn from_yaml(text: &str) -> std::result::Result<Self, String> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(text).map_err(|e| e.to_string())?;
        if config.prefix.is_empty() {
            return Err("prefix must not be empty".to_string());
        }
        Ok(config)
    }

    pub fn doc_path(&self) -> PathBuf {
        self.report_dir.join(&self.doc_file)
    }

    pub fn run_path(&self) -> PathBuf {
        self.report_dir.join(&self.run_file)
    }
}
