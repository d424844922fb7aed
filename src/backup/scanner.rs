//! Source directory scanning

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SaveSaverError, SaveSaverResult};

/// Extensions worth backing up: `.png` is the save preview, `.sav` the save itself
pub const SAVE_EXTENSIONS: [&str; 2] = ["png", "sav"];

/// Whether a path has one of the allow-listed extensions (case-sensitive)
pub fn is_save_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| SAVE_EXTENSIONS.contains(&ext))
}

/// List the save files directly inside `source`
///
/// Subdirectories are not descended into. Results come back in directory
/// enumeration order.
pub fn scan_source_files(source: &Path) -> SaveSaverResult<Vec<PathBuf>> {
    if !source.is_dir() {
        return Err(SaveSaverError::DirectoryNotFound {
            path: source.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    for entry in fs::read_dir(source).map_err(|e| SaveSaverError::from_io(e, source))? {
        let entry = entry.map_err(|e| SaveSaverError::from_io(e, source))?;

        let file_type = entry
            .file_type()
            .map_err(|e| SaveSaverError::from_io(e, entry.path()))?;

        let path = entry.path();
        if file_type.is_file() && is_save_file(&path) {
            files.push(path);
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(files: &[PathBuf]) -> Vec<String> {
        let mut names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_selects_save_files_only() {
        let temp = TempDir::new().unwrap();
        for name in ["a.sav", "b.png", "c.txt"] {
            fs::write(temp.path().join(name), name).unwrap();
        }

        let files = scan_source_files(temp.path()).unwrap();
        assert_eq!(names(&files), vec!["a.sav", "b.png"]);
    }

    #[test]
    fn test_extension_match_is_case_sensitive() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("upper.SAV"), "x").unwrap();
        fs::write(temp.path().join("mixed.Png"), "x").unwrap();
        fs::write(temp.path().join("no_extension"), "x").unwrap();

        assert!(scan_source_files(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_does_not_recurse() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("deep.sav"), "x").unwrap();
        fs::create_dir(temp.path().join("folder.sav")).unwrap();
        fs::write(temp.path().join("top.sav"), "x").unwrap();

        let files = scan_source_files(temp.path()).unwrap();
        assert_eq!(names(&files), vec!["top.sav"]);
    }

    #[test]
    fn test_empty_directory() {
        let temp = TempDir::new().unwrap();
        assert!(scan_source_files(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory() {
        let temp = TempDir::new().unwrap();
        let err = scan_source_files(&temp.path().join("missing")).unwrap_err();
        assert!(matches!(err, SaveSaverError::DirectoryNotFound { .. }));
    }
}
