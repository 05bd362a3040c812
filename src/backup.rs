//! Versioned file backups with pruning.
//!
//! Backups are named `<prefix>_<version>_<seq>.<ext>`, where `seq` is a
//! zero-padded counter shared by every backup under the same prefix. After a
//! copy, the oldest backups beyond the retention count are removed.
//!
//! The version segment never contains `_`, so a prefix that extends another
//! (`suite` and `suite_run`) never claims the other's backups.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::errors::{HarnessError, Result};

/// Copies `source` next to `dest_prefix` and prunes old copies.
///
/// A `retention` of zero keeps every backup.
pub fn backup_file(
    source: &Path,
    dest_prefix: &Path,
    version: &str,
    retention: usize,
) -> Result<PathBuf> {
    let dir = match dest_prefix.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let stem = dest_prefix
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    fs::create_dir_all(&dir).map_err(|e| HarnessError::backup(&dir, e))?;

    let mut existing = existing_backups(&dir, &stem);
    let next = existing.last().map_or(1, |(seq, _)| seq + 1);
    let extension = source
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let version = version.replace('_', "-");
    let target = dir.join(format!("{stem}_{version}_{next:04}{extension}"));

    fs::copy(source, &target).map_err(|e| HarnessError::backup(source, e))?;
    debug!(source = %source.display(), target = %target.display(), "backed up file");
    existing.push((next, target.clone()));

    if retention > 0 && existing.len() > retention {
        let excess = existing.len() - retention;
        for (_, old) in existing.drain(..excess) {
            fs::remove_file(&old).map_err(|e| HarnessError::backup(&old, e))?;
            debug!(path = %old.display(), "pruned backup");
        }
    }
    Ok(target)
}

/// Backups under `stem` in `dir`, oldest first.
fn existing_backups(dir: &Path, stem: &str) -> Vec<(u32, PathBuf)> {
    let prefix = format!("{stem}_");
    let mut found: Vec<(u32, PathBuf)> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            let rest = name.strip_prefix(&prefix)?;
            let (version, tail) = rest.rsplit_once('_')?;
            if version.is_empty() || version.contains('_') {
                return None;
            }
            let digits = tail.split('.').next()?;
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let seq = digits.parse().ok()?;
            Some((seq, e.into_path()))
        })
        .collect();
    found.sort();
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_with_version_and_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("report.log");
        fs::write(&source, "v1").unwrap();
        let prefix = dir.path().join("backups").join("report");

        let first = backup_file(&source, &prefix, "0.1.0", 3).unwrap();
        assert!(first.ends_with("report_0.1.0_0001.log"));
        assert_eq!(fs::read_to_string(&first).unwrap(), "v1");

        let second = backup_file(&source, &prefix, "0.2.0", 3).unwrap();
        assert!(second.ends_with("report_0.2.0_0002.log"));
    }

    #[test]
    fn prunes_oldest_beyond_retention() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("data.txt");
        fs::write(&source, "x").unwrap();
        let prefix = dir.path().join("data");

        for _ in 0..5 {
            backup_file(&source, &prefix, "v", 2).unwrap();
        }
        let kept: Vec<u32> = existing_backups(dir.path(), "data")
            .into_iter()
            .map(|(seq, _)| seq)
            .collect();
        assert_eq!(kept, vec![4, 5]);
        assert!(source.exists());
    }

    #[test]
    fn zero_retention_keeps_everything() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.txt");
        fs::write(&source, "x").unwrap();
        let prefix = dir.path().join("a");
        for _ in 0..3 {
            backup_file(&source, &prefix, "v", 0).unwrap();
        }
        assert_eq!(existing_backups(dir.path(), "a").len(), 3);
    }

    #[test]
    fn overlapping_prefixes_keep_separate_backups() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("suite.log");
        let run = dir.path().join("suite_run.log");
        fs::write(&doc, "doc").unwrap();
        fs::write(&run, "run").unwrap();
        let backups = dir.path().join("backups");

        let run_copy = backup_file(&run, &backups.join("suite_run"), "0.1.0", 1).unwrap();
        let doc_copy = backup_file(&doc, &backups.join("suite"), "0.1.0", 1).unwrap();
        assert!(run_copy.exists());
        assert!(doc_copy.ends_with("suite_0.1.0_0001.log"));

        backup_file(&doc, &backups.join("suite"), "0.1.0", 1).unwrap();
        assert!(run_copy.exists());
        assert!(!doc_copy.exists());
        assert_eq!(existing_backups(&backups, "suite").len(), 1);
        assert_eq!(existing_backups(&backups, "suite_run").len(), 1);
    }

    #[test]
    fn underscores_in_version_are_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("r.log");
        fs::write(&source, "x").unwrap();
        let prefix = dir.path().join("r");
        let first = backup_file(&source, &prefix, "1_0", 1).unwrap();
        assert!(first.ends_with("r_1-0_0001.log"));
        let second = backup_file(&source, &prefix, "1_0", 1).unwrap();
        assert!(!first.exists());
        assert!(second.ends_with("r_1-0_0002.log"));
    }

    #[test]
    fn missing_source_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = backup_file(&dir.path().join("nope"), &dir.path().join("nope"), "v", 1)
            .unwrap_err();
        assert!(matches!(err, HarnessError::Backup { .. }));
    }
}
