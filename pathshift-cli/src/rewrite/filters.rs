use std::path::Path;

pub const DEFAULT_EXCLUDES: &[&str] = &["node_modules", ".git"];
pub const DEFAULT_EXTENSIONS: &[&str] = &[".tsx", ".ts"];

/// Check if a directory should be skipped along with everything below it.
///
/// Plain substring match on the full path, so `.git` also covers `.github`.
pub fn is_excluded_dir(path: &Path, excludes: &[String]) -> bool {
    let path_str = path.to_string_lossy();
    excludes
        .iter()
        .any(|pattern| path_str.contains(pattern.as_str()))
}

/// Check if a file name ends in one of the rewritten suffixes (case-sensitive)
pub fn has_included_extension(path: &Path, extensions: &[String]) -> bool {
    match path.file_name() {
        Some(name) => {
            let name = name.to_string_lossy();
            extensions.iter().any(|ext| name.ends_with(ext.as_str()))
        }
        None => false,
    }
}
