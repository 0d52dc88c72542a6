//! Upload filename sanitizing.
//!
//! Client-supplied filenames are used as a path component inside the upload
//! directory, so they must never carry separators or traversal segments.

/// Name used when nothing printable survives sanitizing.
pub const FALLBACK_FILENAME: &str = "unnamed_upload";

/// Reduce a client-supplied filename to a safe flat basename.
///
/// Path separators become word breaks, whitespace runs collapse to `_`,
/// non-ASCII and anything outside `[A-Za-z0-9_.-]` is dropped, and leading or
/// trailing `.`/`_` are trimmed. `"../../etc/passwd"` becomes `"etc_passwd"`.
pub fn sanitize_filename(original: &str) -> String {
    let spaced: String = original
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .filter(char::is_ascii)
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_traversal_is_flattened() {
        let name = sanitize_filename("../../etc/passwd");
        assert_eq!(name, "etc_passwd");
        assert!(!name.contains('/'));
        assert!(!name.contains('\\'));
    }

    #[test]
    fn test_windows_separators() {
        assert_eq!(sanitize_filename("C:\\Users\\me\\report.pdf"), "C_Users_me_report.pdf");
    }

    #[test]
    fn test_spaces_and_unsafe_characters() {
        assert_eq!(sanitize_filename("my cool  photo (1).jpg"), "my_cool_photo_1.jpg");
        assert_eq!(sanitize_filename("a;b|c$d.txt"), "abcd.txt");
    }

    #[test]
    fn test_non_ascii_dropped() {
        assert_eq!(sanitize_filename("résumé.pdf"), "rsum.pdf");
    }

    #[test]
    fn test_dot_only_names_fall_back() {
        assert_eq!(sanitize_filename(".."), FALLBACK_FILENAME);
        assert_eq!(sanitize_filename("../.."), FALLBACK_FILENAME);
        assert_eq!(sanitize_filename("日本語"), FALLBACK_FILENAME);
    }

    #[test]
    fn test_plain_name_unchanged() {
        assert_eq!(sanitize_filename("invoice-2024.csv"), "invoice-2024.csv");
    }
}
