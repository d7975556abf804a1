use crate::core::{CliError, FormatMismatchError, NoCatalogFilesError};
use autofill_catalog::{CatalogFile, CatalogFormat};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Files grouped by the directory that contains them.
pub type FilesByDirectory = BTreeMap<PathBuf, Vec<PathBuf>>;

/// Collect every file under `paths`, grouped by parent directory.
///
/// Directories and file names are visited in sorted order so the listing is stable.
pub fn collect_files(paths: &[PathBuf], recursive: bool) -> FilesByDirectory {
    let mut grouped = FilesByDirectory::new();
    let max_depth = if recursive { usize::MAX } else { 1 };

    for root in paths {
        let walker = walkdir::WalkDir::new(root)
            .max_depth(max_depth)
            .sort_by_file_name();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!("skipping unreadable entry under {}: {err}", root.display());
                    continue;
                },
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.into_path();
            let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
            grouped.entry(dir).or_default().push(path);
        }
    }

    grouped
}

/// Find the catalog files of `format` at `path`, which may be a file or a directory.
pub fn discover_catalog_files(
    path: &Path,
    format: CatalogFormat,
) -> Result<Vec<CatalogFile>, CliError> {
    let path = std::path::absolute(path)?;

    if path.is_file() {
        if !format.matches(&path) {
            return Err(FormatMismatchError {
                path,
                format: format.to_string(),
                extensions: format.extensions().join(", "),
            }
            .into());
        }
        return Ok(vec![CatalogFile::new(path)]);
    }

    let files: Vec<CatalogFile> = collect_files(std::slice::from_ref(&path), true)
        .into_values()
        .flatten()
        .filter(|file| format.matches(file))
        .map(CatalogFile::new)
        .collect();

    tracing::info!(
        "discovered {} {} file(s) under {}",
        files.len(),
        format,
        path.display()
    );

    if files.is_empty() {
        return Err(NoCatalogFilesError {
            path,
            format: format.to_string(),
        }
        .into());
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn test_collect_files_groups_by_directory() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "b/messages.en.xlf");
        touch(temp.path(), "a/z.xlf");
        touch(temp.path(), "a/messages.en.xlf");

        let grouped = collect_files(&[temp.path().to_path_buf()], true);
        let dirs: Vec<_> = grouped.keys().cloned().collect();
        assert_eq!(dirs, vec![temp.path().join("a"), temp.path().join("b")]);

        let names: Vec<_> = grouped[&temp.path().join("a")]
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["messages.en.xlf", "z.xlf"]);
    }

    #[test]
    fn test_collect_files_non_recursive() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "top.yml");
        touch(temp.path(), "nested/inner.yml");

        let grouped = collect_files(&[temp.path().to_path_buf()], false);
        let all: Vec<_> = grouped.into_values().flatten().collect();
        assert_eq!(all, vec![temp.path().join("top.yml")]);
    }

    #[test]
    fn test_collect_files_skips_unreadable_roots() {
        let temp = TempDir::new().unwrap();
        let kept = touch(temp.path(), "ok/messages.en.yml");

        let grouped = collect_files(
            &[temp.path().join("missing"), temp.path().join("ok")],
            true,
        );
        let all: Vec<_> = grouped.into_values().flatten().collect();
        assert_eq!(all, vec![kept]);
    }

    #[test]
    fn test_discover_filters_by_format() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "messages.en.xlf");
        touch(temp.path(), "messages.en.yml");
        touch(temp.path(), "sub/de.locallang.xliff");

        let files = discover_catalog_files(temp.path(), CatalogFormat::Xliff).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.path().is_absolute()));
        assert_eq!(files[0].locale(), Some("en"));
        assert_eq!(files[1].locale(), Some("de"));
    }

    #[test]
    fn test_discover_single_file() {
        let temp = TempDir::new().unwrap();
        let file = touch(temp.path(), "messages.en.json");

        let files = discover_catalog_files(&file, CatalogFormat::Json).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path(), file.as_path());
    }

    #[test]
    fn test_discover_single_file_wrong_format() {
        let temp = TempDir::new().unwrap();
        let file = touch(temp.path(), "messages.en.json");

        let result = discover_catalog_files(&file, CatalogFormat::Php);
        assert!(matches!(result, Err(CliError::FormatMismatch(_))));
    }

    #[test]
    fn test_discover_missing_directory() {
        let temp = TempDir::new().unwrap();
        let result = discover_catalog_files(&temp.path().join("nope"), CatalogFormat::Xliff);
        assert!(matches!(result, Err(CliError::NoCatalogFiles(_))));
    }

    #[test]
    fn test_discover_no_matching_files() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "messages.en.yml");

        let result = discover_catalog_files(temp.path(), CatalogFormat::Xliff);
        assert!(matches!(result, Err(CliError::NoCatalogFiles(_))));
    }
}
