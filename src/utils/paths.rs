//! Path normalization

use std::path::{Component, Path, PathBuf};

/// Resolve a configured directory against `cwd`.
///
/// Relative paths are joined onto `cwd`; the result is cleaned lexically
/// because the directory may not exist yet.
pub fn resolve_config_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        clean_path(path)
    } else {
        clean_path(&cwd.join(path))
    }
}

/// Remove `.` and `..` components without touching the filesystem.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
            Component::RootDir => out.push(Path::new("/")),
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
        }
    }
    out
}
