use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use polarize_finance::Document;

pub fn polarize_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".polarize"))
}

pub fn ensure_polarize_home() -> Result<PathBuf> {
    let dir = polarize_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

fn is_summary_candidate(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
}

fn collect_into(path: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    if path.is_dir() {
        let mut entries: Vec<PathBuf> = fs::read_dir(path)
            .with_context(|| format!("read dir {}", path.display()))?
            .filter_map(|e| e.ok().map(|e| e.path()))
            .collect();
        entries.sort();
        for entry in entries {
            if entry.is_dir() || is_summary_candidate(&entry) {
                collect_into(&entry, out)?;
            }
        }
    } else {
        out.push(path.to_path_buf());
    }
    Ok(())
}

/// Expand files and directories (recursively, `.txt` only) into a sorted file list
pub fn collect_summary_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for p in paths {
        if !p.exists() {
            anyhow::bail!("not found: {}", p.display());
        }
        collect_into(p, &mut out)?;
    }
    Ok(out)
}

/// Read every file; unreadable files are logged and reported back by name
pub fn read_documents(files: &[PathBuf]) -> (Vec<Document>, Vec<String>) {
    let mut docs = Vec::with_capacity(files.len());
    let mut failed = Vec::new();
    for f in files {
        match Document::from_path(f) {
            Ok(doc) => docs.push(doc),
            Err(e) => {
                log::warn!("{e:#}");
                failed.push(f.display().to_string());
            }
        }
    }
    (docs, failed)
}
