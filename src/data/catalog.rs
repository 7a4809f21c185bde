use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// File names in `dir` ending in `.{extension}`, sorted ascending.
///
/// An empty directory is not an error: the caller simply has nothing to show.
pub fn list_datasets(dir: &Path, extension: &str) -> Result<Vec<String>> {
    let suffix = format!(".{extension}");
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("listing datasets in {}", dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("reading entry in {}", dir.display()))?;
        if !entry.path().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if name.ends_with(&suffix) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Full path of a listed dataset.
pub fn dataset_path(dir: &Path, file_name: &str) -> PathBuf {
    dir.join(file_name)
}

/// Download base name: the file name without its dataset extension.
pub fn base_name<'a>(file_name: &'a str, extension: &str) -> &'a str {
    file_name
        .strip_suffix(extension)
        .and_then(|s| s.strip_suffix('.'))
        .unwrap_or(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lists_only_matching_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["villages.json", "b.json", "notes.txt", "A.json", "data.json.bak"] {
            std::fs::write(dir.path().join(name), "[]").unwrap();
        }
        std::fs::create_dir(dir.path().join("folder.json")).unwrap();

        let names = list_datasets(dir.path(), "json").unwrap();
        assert_eq!(names, vec!["A.json", "b.json", "villages.json"]);
    }

    #[test]
    fn empty_directory_is_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_datasets(dir.path(), "json").unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_datasets(&dir.path().join("gone"), "json").is_err());
    }

    #[test]
    fn base_name_strips_extension() {
        assert_eq!(base_name("villages.json", "json"), "villages");
        assert_eq!(base_name("a.b.json", "json"), "a.b");
        assert_eq!(base_name("weird", "json"), "weird");
    }
}
