use crate::matching::normalize::{split_extension, Normalizer, INVALID_FILENAME_CHARS};
use std::path::{Path, PathBuf};

pub const MAX_FILE_NAME_BYTES: usize = 255;
pub const DUPLICATE_SUFFIX: &str = "_duplicate";
pub const UNTITLED: &str = "Untitled";

/// Clean, title-cased file name that keeps the original extension.
///
/// The stem goes through [`Normalizer::normalize`], so a dotted stem such as
/// `Vol. 2 Habits` keeps only the part before its last dot. The stem is
/// truncated so that stem and extension together fit in
/// [`MAX_FILE_NAME_BYTES`]. A stem that cleans down to nothing becomes
/// [`UNTITLED`].
pub fn sanitize_file_name(name: &str, normalizer: &Normalizer) -> String {
    let (stem, extension) = split_extension(name);
    let extension: String = extension
        .chars()
        .map(|c| if INVALID_FILENAME_CHARS.contains(&c) { '_' } else { c })
        .collect();

    let mut title = normalizer
        .normalize(stem)
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");
    if title.is_empty() {
        title = UNTITLED.to_string();
    }
    truncate_to_bytes(
        &mut title,
        MAX_FILE_NAME_BYTES.saturating_sub(extension.len()),
    );

    format!("{title}{extension}").trim().to_string()
}

/// Extension-less folder name for a cluster's representative.
pub fn folder_name(representative_name: &str, normalizer: &Normalizer) -> String {
    let sanitized = sanitize_file_name(representative_name, normalizer);
    let (stem, _) = split_extension(&sanitized);
    stem.trim().to_string()
}

/// First free path in `folder` for `file_name`.
///
/// Taken names get `_duplicate` inserted before the extension, then
/// `_duplicate_2`, `_duplicate_3` and so on. The stem is shortened when
/// needed so the renamed file still fits in [`MAX_FILE_NAME_BYTES`].
pub fn unique_destination(folder: &Path, file_name: &str) -> PathBuf {
    let wanted = folder.join(file_name);
    if !is_taken(&wanted) {
        return wanted;
    }

    let (stem, extension) = split_extension(file_name);
    let mut attempt = 1usize;
    loop {
        let suffix = if attempt == 1 {
            DUPLICATE_SUFFIX.to_string()
        } else {
            format!("{DUPLICATE_SUFFIX}_{attempt}")
        };
        let mut stem = stem.to_string();
        truncate_to_bytes(
            &mut stem,
            MAX_FILE_NAME_BYTES.saturating_sub(suffix.len() + extension.len()),
        );
        let path = folder.join(format!("{stem}{suffix}{extension}"));
        if !is_taken(&path) {
            return path;
        }
        attempt += 1;
    }
}

fn is_taken(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn truncate_to_bytes(s: &mut String, max_bytes: usize) {
    if s.len() <= max_bytes {
        return;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_sanitize_file_name() {
        let n = Normalizer::default();
        assert_eq!(sanitize_file_name("my_book.pdf", &n), "My.pdf");
        assert_eq!(
            sanitize_file_name("@Chan deep-work_cal newport.epub", &n),
            "Chan Deep Work Cal Newport.epub"
        );
        assert_eq!(sanitize_file_name("Dr. Strange Notes.pdf", &n), "Dr.pdf");
        assert_eq!(sanitize_file_name("война и мир.pdf", &n), "Война И Мир.pdf");
    }

    #[test]
    fn test_empty_stem_becomes_untitled() {
        let n = Normalizer::default();
        assert_eq!(sanitize_file_name("The Book.pdf", &n), "Untitled.pdf");
        assert_eq!(sanitize_file_name("!!!", &n), "Untitled");
        assert_eq!(folder_name("The Book.pdf", &n), "Untitled");
    }

    #[test]
    fn test_folder_name_has_no_extension() {
        let n = Normalizer::default();
        assert_eq!(folder_name("Atomic Habits.pdf", &n), "Atomic Habits");
        assert_eq!(folder_name("Atomic Habits", &n), "Atomic Habits");
    }

    #[test]
    fn test_dotted_stem_keeps_part_before_last_dot() {
        let n = Normalizer::default();
        assert_eq!(folder_name("Vol. 2 Atomic Habits.pdf", &n), "Vol");
        assert_eq!(
            sanitize_file_name("Vol. 2 Atomic Habits.pdf", &n),
            "Vol.pdf"
        );
        assert_eq!(folder_name("archive.tar.gz", &n), "Archive");
    }

    #[test]
    fn test_truncates_to_byte_limit_on_char_boundary() {
        let n = Normalizer::default();
        let long = format!("{}.pdf", "ж".repeat(300));
        let sanitized = sanitize_file_name(&long, &n);
        assert!(sanitized.len() <= MAX_FILE_NAME_BYTES);
        assert!(sanitized.ends_with(".pdf"));
        // 251 bytes available, two bytes per char
        assert_eq!(sanitized.len(), 250 + ".pdf".len());
    }

    #[test]
    fn test_unique_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let folder = tmp.path();

        assert_eq!(unique_destination(folder, "A.pdf"), folder.join("A.pdf"));
        fs::write(folder.join("A.pdf"), "1").unwrap();
        assert_eq!(
            unique_destination(folder, "A.pdf"),
            folder.join("A_duplicate.pdf")
        );
        fs::write(folder.join("A_duplicate.pdf"), "2").unwrap();
        assert_eq!(
            unique_destination(folder, "A.pdf"),
            folder.join("A_duplicate_2.pdf")
        );
    }

    #[test]
    fn test_renamed_long_name_stays_within_byte_limit() {
        let tmp = tempfile::tempdir().unwrap();
        let folder = tmp.path();
        let name = format!("{}.pdf", "w".repeat(250));
        fs::write(folder.join(&name), "1").unwrap();

        let first = unique_destination(folder, &name);
        let first_name = first.file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(first_name.len(), MAX_FILE_NAME_BYTES);
        assert!(first_name.ends_with("_duplicate.pdf"));
        fs::write(&first, "2").unwrap();

        let second = unique_destination(folder, &name);
        let second_name = second.file_name().unwrap().to_string_lossy().into_owned();
        assert!(second_name.len() <= MAX_FILE_NAME_BYTES);
        assert!(second_name.ends_with("_duplicate_2.pdf"));
        fs::write(&second, "3").unwrap();

        assert_eq!(fs::read_dir(folder).unwrap().count(), 3);
    }
}
