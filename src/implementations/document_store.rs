use std::fs;
use std::io::ErrorKind;
use std::path::{ Path, PathBuf };

use log::debug;

use crate::errors::DocCompareResult;
use crate::implementations::config::DocCompareConfig;
use crate::implementations::paths::{ check_identifier, resolve_within };

/// Sample deals and LMA templates under the configured data directory
#[derive(Debug, Clone)]
pub struct DocumentRoot {
    samples_dir: PathBuf,
    templates_dir: PathBuf,
}

impl DocumentRoot {
    pub fn new(samples_dir: impl Into<PathBuf>, templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            samples_dir: samples_dir.into(),
            templates_dir: templates_dir.into(),
        }
    }

    pub fn from_config(config: &DocCompareConfig) -> Self {
        Self::new(config.samples_path(), config.templates_path())
    }

    pub fn samples_dir(&self) -> &Path {
        &self.samples_dir
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// All sample deal files, sorted
    pub fn list_samples(&self) -> DocCompareResult<Vec<String>> {
        list_text_files(&self.samples_dir, "")
    }

    pub fn read_sample(&self, id: &str) -> DocCompareResult<String> {
        read_document(&self.samples_dir, id)
    }

    pub fn read_template(&self, id: &str) -> DocCompareResult<String> {
        read_document(&self.templates_dir, id)
    }
}

/// Read a document after resolving it inside `root`
pub fn read_document(root: &Path, id: &str) -> DocCompareResult<String> {
    let path = resolve_within(root, id)?;
    debug!("Reading {}", path.display());
    Ok(fs::read_to_string(path)?)
}

/// `.txt` file names in `dir` starting with `prefix`, sorted lexicographically.
/// A missing directory yields an empty list.
pub fn list_text_files(dir: &Path, prefix: &str) -> DocCompareResult<Vec<String>> {
    if !prefix.is_empty() {
        check_identifier(prefix)?;
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist", dir.display());
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e.into());
        }
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if name.starts_with(prefix) && name.ends_with(".txt") {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DocCompareError;

    fn fixture() -> (tempfile::TempDir, DocumentRoot) {
        let dir = tempfile::tempdir().unwrap();
        let samples = dir.path().join("sample_deals");
        let templates = dir.path().join("templates");
        fs::create_dir_all(&samples).unwrap();
        fs::create_dir_all(&templates).unwrap();
        fs::write(samples.join("Deal_Beta.txt"), "beta").unwrap();
        fs::write(samples.join("Deal_Alpha.txt"), "alpha").unwrap();
        fs::write(samples.join("notes.md"), "ignored").unwrap();
        fs::create_dir(samples.join("archive.txt")).unwrap();
        fs::write(templates.join("LMA_Leveraged_2023.txt"), "template").unwrap();
        let root = DocumentRoot::new(samples, templates);
        (dir, root)
    }

    #[test]
    fn test_list_samples_sorted_txt_files_only() {
        let (_dir, root) = fixture();
        assert_eq!(root.list_samples().unwrap(), vec!["Deal_Alpha.txt", "Deal_Beta.txt"]);
    }

    #[test]
    fn test_missing_directory_lists_nothing() {
        let root = DocumentRoot::new("/nonexistent/samples", "/nonexistent/templates");
        assert!(root.list_samples().unwrap().is_empty());
    }

    #[test]
    fn test_reads_go_through_containment() {
        let (_dir, root) = fixture();
        assert_eq!(root.read_sample("Deal_Alpha.txt").unwrap(), "alpha");
        assert_eq!(root.read_template("LMA_Leveraged_2023.txt").unwrap(), "template");
        assert!(matches!(root.read_sample("../templates/LMA_Leveraged_2023.txt"), Err(DocCompareError::InvalidPath(_))));
        assert!(matches!(root.read_template("Missing.txt"), Err(DocCompareError::DocumentNotFound(_))));
    }
}
