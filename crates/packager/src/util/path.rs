use std::path::{Path, PathBuf, MAIN_SEPARATOR};

pub trait MpdPathExt {
    /// Path of `self` relative to `dir`, if `self` lies strictly below `dir`.
    fn relative_to_dir(&self, dir: &Path) -> Option<PathBuf>;

    /// Lossy string form with path separators normalized to `/`.
    fn to_slash_string(&self) -> String;
}

impl MpdPathExt for Path {
    fn relative_to_dir(&self, dir: &Path) -> Option<PathBuf> {
        let relative = self.strip_prefix(dir).ok()?;
        if relative.as_os_str().is_empty() {
            return None;
        }
        Some(relative.to_path_buf())
    }

    fn to_slash_string(&self) -> String {
        let path = self.to_string_lossy();
        if MAIN_SEPARATOR == '/' {
            path.into_owned()
        } else {
            path.replace(MAIN_SEPARATOR, "/")
        }
    }
}

/// Rewrite `media_path` relative to `parent` when it is a descendant of it,
/// otherwise keep it as is. Separators are always normalized to `/`.
pub(crate) fn make_path_relative(media_path: &str, parent: &Path) -> String {
    let child = Path::new(media_path);
    match child.relative_to_dir(parent) {
        Some(relative) => relative.to_slash_string(),
        None => child.to_slash_string(),
    }
}
