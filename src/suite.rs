//! One full suite run: discovery, both passes, both artifacts.
//!
//! The declared-order pass feeds the doc artifact and the randomized pass
//! feeds the run artifact. The passes are independent and run one after the
//! other. Each artifact is rendered in memory once its pass has completed and
//! then written exactly once; a pass that fails at the harness level leaves
//! no artifact behind for that pass.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::backup::backup_file;
use crate::config::HarnessConfig;
use crate::engine::{run_pass, EngineOptions, PassOutcome};
use crate::errors::{HarnessError, Result};
use crate::order::OrderStrategy;
use crate::registry::{discover, Candidate, TestUnit};
use crate::report::{render_doc, render_run};

/// Both finished passes with their rendered artifacts.
#[derive(Debug, Clone)]
pub struct SuiteReports {
    pub doc: PassOutcome,
    pub run: PassOutcome,
    pub doc_text: String,
    pub run_text: String,
}

impl SuiteReports {
    /// Seed the randomized pass ran with.
    pub fn seed(&self) -> Option<u64> {
        self.run.strategy.seed()
    }

    pub fn has_failures(&self) -> bool {
        self.doc.summary.has_failures() || self.run.summary.has_failures()
    }
}

/// A suite run whose artifacts were written to disk.
#[derive(Debug, Clone)]
pub struct SuiteOutcome {
    pub reports: SuiteReports,
    pub doc_path: PathBuf,
    pub run_path: PathBuf,
}

pub struct Suite {
    units: Vec<TestUnit>,
    config: HarnessConfig,
}

impl Suite {
    /// Discovers the units among `candidates` using the configured prefix.
    pub fn new<I>(candidates: I, config: HarnessConfig) -> Result<Self>
    where
        I: IntoIterator<Item = Candidate>,
    {
        let units = discover(candidates, &config.prefix)?;
        info!(units = units.len(), "discovered test units");
        Ok(Self { units, config })
    }

    pub fn units(&self) -> &[TestUnit] {
        &self.units
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    fn options(&self) -> EngineOptions {
        EngineOptions {
            capture_backtrace: self.config.capture_backtrace,
        }
    }

    pub fn run_doc_pass(&self) -> Result<PassOutcome> {
        run_pass(&self.units, OrderStrategy::Declared, &self.options())
    }

    pub fn run_random_pass(&self) -> Result<PassOutcome> {
        let strategy = OrderStrategy::randomized(self.config.seed);
        run_pass(&self.units, strategy, &self.options())
    }

    fn render_doc_pass(&self, outcome: &PassOutcome) -> String {
        render_doc(&outcome.results, &outcome.summary, &self.config.title)
    }

    fn render_run_pass(&self, outcome: &PassOutcome) -> String {
        render_run(
            &outcome.results,
            &outcome.summary,
            &self.config.title,
            outcome.strategy.seed(),
        )
    }

    /// Runs both passes and renders both artifacts without touching disk.
    pub fn run_in_memory(&self) -> Result<SuiteReports> {
        let doc = self.run_doc_pass()?;
        let doc_text = self.render_doc_pass(&doc);
        let run = self.run_random_pass()?;
        let run_text = self.render_run_pass(&run);
        Ok(SuiteReports {
            doc,
            run,
            doc_text,
            run_text,
        })
    }

    /// Runs both passes, writing each artifact as soon as its pass is done.
    pub fn run(&self) -> Result<SuiteOutcome> {
        let doc_path = self.config.doc_path();
        let run_path = self.config.run_path();

        let doc = self.run_doc_pass()?;
        let doc_text = self.render_doc_pass(&doc);
        self.write_artifact(&doc_path, &doc_text)?;

        let run = self.run_random_pass()?;
        let run_text = self.render_run_pass(&run);
        self.write_artifact(&run_path, &run_text)?;

        Ok(SuiteOutcome {
            reports: SuiteReports {
                doc,
                run,
                doc_text,
                run_text,
            },
            doc_path,
            run_path,
        })
    }

    fn write_artifact(&self, path: &Path, text: &str) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| HarnessError::report_write(dir, e))?;
        }
        if self.config.backup_retention > 0 && path.exists() {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let prefix = self.config.report_dir.join("backups").join(stem);
            backup_file(
                path,
                &prefix,
                env!("CARGO_PKG_VERSION"),
                self.config.backup_retention,
            )?;
        }
        write_once(path, text)?;
        info!(path = %path.display(), "wrote report");
        Ok(())
    }
}

/// Writes `text` to a sibling temp file and renames it over `path`, so a
/// reader never sees a half-written artifact.
fn write_once(path: &Path, text: &str) -> Result<()> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    if let Err(e) = write_file(&tmp, text) {
        let _ = fs::remove_file(&tmp);
        return Err(HarnessError::report_write(path, e));
    }
    fs::rename(&tmp, path).map_err(|e| HarnessError::report_write(path, e))
}

fn write_file(path: &Path, text: &str) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    writer.get_ref().sync_all()
}
