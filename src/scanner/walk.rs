use crate::error::Error;
use crate::storage::models::FileRecord;
use glob::Pattern;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error};
use walkdir::WalkDir;

/// Recursively enumerate regular files under `root`.
///
/// Symlinks are not followed. Entries whose path (relative to `root`, or
/// absolute) matches one of `ignore_globs` are skipped, directories included.
/// Directories that cannot be read for lack of permission are logged and
/// skipped.
pub fn discover_files(root: &Path, ignore_globs: &[String]) -> Result<Vec<FileRecord>, Error> {
    if !root.is_dir() {
        return Err(Error::InvalidSourceRoot(root.to_path_buf()));
    }

    let ignore_patterns = compile_patterns(ignore_globs);
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || !is_ignored(entry.path(), root, &ignore_patterns)
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if err.io_error().map(io::Error::kind) == Some(io::ErrorKind::PermissionDenied) {
                    error!(
                        "Access denied reading {}: {}",
                        err.path()
                            .map(|p| p.display().to_string())
                            .unwrap_or_default(),
                        err
                    );
                    continue;
                }
                return Err(err.into());
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| Error::Other(format!("{}: {}", entry.path().display(), e)))?;
        files.push(FileRecord::from_relative_path(&relative_to_string(relative)));
    }

    debug!("Discovered {} files under {}", files.len(), root.display());
    Ok(files)
}

fn compile_patterns(globs: &[String]) -> Vec<Pattern> {
    globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(p) => Some(p),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect()
}

fn is_ignored(path: &Path, root: &Path, patterns: &[Pattern]) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    patterns
        .iter()
        .any(|pattern| pattern.matches_path(relative) || pattern.matches_path(path))
}

/// Join path components with `/` regardless of platform.
fn relative_to_string(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolve a stored `/`-separated relative path against `root`.
///
/// Returns `None` for paths that climb out of `root` through `..`.
pub fn resolve(root: &Path, relative: &str) -> Option<PathBuf> {
    let relative = relative.replace('\u{a0}', " ");
    let mut path = root.to_path_buf();
    for part in relative.split('/') {
        match part {
            "" | "." => continue,
            ".." => return None,
            _ => path.push(part),
        }
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_discovers_nested_files_with_relative_paths() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("chan_a/sub")).unwrap();
        fs::write(root.join("top.pdf"), "x").unwrap();
        fs::write(root.join("chan_a/sub/deep.pdf"), "x").unwrap();

        let mut files = discover_files(root, &[]).unwrap();
        files.sort_by(|a, b| a.path.cmp(&b.path));

        assert_eq!(
            files,
            vec![
                FileRecord::new("deep.pdf", "chan_a/sub/deep.pdf"),
                FileRecord::new("top.pdf", "top.pdf"),
            ]
        );
    }

    #[test]
    fn test_nbsp_is_replaced() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("My\u{a0}Book.pdf"), "x").unwrap();

        let files = discover_files(tmp.path(), &[]).unwrap();
        assert_eq!(files, vec![FileRecord::new("My Book.pdf", "My Book.pdf")]);
    }

    #[test]
    fn test_ignore_patterns() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("partial")).unwrap();
        fs::write(root.join("keep.pdf"), "x").unwrap();
        fs::write(root.join("skip.part"), "x").unwrap();
        fs::write(root.join("partial/inside.pdf"), "x").unwrap();

        let files = discover_files(root, &["*.part".to_string(), "partial".to_string()]).unwrap();
        assert_eq!(files, vec![FileRecord::new("keep.pdf", "keep.pdf")]);
    }

    #[test]
    fn test_invalid_root() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        let err = discover_files(&missing, &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidSourceRoot(p) if p == missing));
    }

    #[test]
    fn test_resolve() {
        let root = Path::new("downloads");
        assert_eq!(
            resolve(root, "chan\u{a0}a/My Book.pdf"),
            Some(Path::new("downloads").join("chan a").join("My Book.pdf"))
        );
    }

    #[test]
    fn test_resolve_rejects_parent_dir() {
        let root = Path::new("downloads");
        assert_eq!(resolve(root, "../secrets.pdf"), None);
        assert_eq!(resolve(root, "chan_a/../../secrets.pdf"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_keeps_backslash_in_name() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("AC\\DC Live.pdf"), "x").unwrap();

        let files = discover_files(tmp.path(), &[]).unwrap();
        assert_eq!(files[0].path, "AC\\DC Live.pdf");
        let resolved = resolve(tmp.path(), &files[0].path).unwrap();
        assert!(resolved.is_file());
    }
}
