//! Path utilities: expand ~, sanitize file-name fragments.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Make a unit name safe to use as a file-name fragment.
pub fn sanitize_fragment(name: &str) -> String {
    name.replace([' ', '/'], "_")
}
