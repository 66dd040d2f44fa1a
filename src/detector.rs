use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Raw source files discovered under the data directory.
#[derive(Debug, Default)]
pub struct Sources {
    /// The SAM exclusions extract: first CSV under `USA/`, lexicographically.
    pub exclusions: Option<PathBuf>,
    /// Uzbekistan procurement files under `Uzbekistan/`, lexicographic order.
    pub awards: Vec<PathBuf>,
}

impl Sources {
    pub fn is_empty(&self) -> bool {
        self.exclusions.is_none() && self.awards.is_empty()
    }
}

/// Scan the data directory for the known source layouts. A missing country
/// directory yields an empty slot, not an error.
pub fn discover_sources(data_dir: &Path) -> Result<Sources> {
    let exclusions = sorted_files(&data_dir.join("USA"), &["csv"])?
        .into_iter()
        .next();
    let awards = sorted_files(&data_dir.join("Uzbekistan"), &["csv", "xlsx", "xls"])?;
    Ok(Sources { exclusions, awards })
}

fn sorted_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !dir.is_dir() {
        return Ok(files);
    }
    for entry in std::fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))? {
        let path = entry?.path();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        if path.is_file() && extension.map_or(false, |e| extensions.contains(&e.as_str())) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_discovers_both_layouts() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("USA")).unwrap();
        fs::create_dir(dir.path().join("Uzbekistan")).unwrap();
        fs::write(dir.path().join("USA/exclusions.csv"), "Name\n").unwrap();
        fs::write(dir.path().join("Uzbekistan/b.xlsx"), "").unwrap();
        fs::write(dir.path().join("Uzbekistan/a.csv"), "Supplier\n").unwrap();
        fs::write(dir.path().join("Uzbekistan/notes.txt"), "skip me").unwrap();

        let sources = discover_sources(dir.path()).unwrap();
        assert_eq!(
            sources.exclusions,
            Some(dir.path().join("USA/exclusions.csv"))
        );
        assert_eq!(
            sources.awards,
            vec![
                dir.path().join("Uzbekistan/a.csv"),
                dir.path().join("Uzbekistan/b.xlsx"),
            ]
        );
        assert!(!sources.is_empty());
    }

    #[test]
    fn test_first_usa_csv_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("USA")).unwrap();
        fs::write(dir.path().join("USA/b_extract.csv"), "").unwrap();
        fs::write(dir.path().join("USA/a_extract.csv"), "").unwrap();

        let sources = discover_sources(dir.path()).unwrap();
        assert_eq!(
            sources.exclusions,
            Some(dir.path().join("USA/a_extract.csv"))
        );
    }

    #[test]
    fn test_missing_directories_are_empty_not_errors() {
        let dir = tempfile::tempdir().unwrap();
        let sources = discover_sources(dir.path()).unwrap();
        assert!(sources.is_empty());
    }

    #[test]
    fn test_extension_matching_ignores_case() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("Uzbekistan")).unwrap();
        fs::write(dir.path().join("Uzbekistan/DATA.XLSX"), "").unwrap();

        let sources = discover_sources(dir.path()).unwrap();
        assert_eq!(sources.awards.len(), 1);
    }
}
