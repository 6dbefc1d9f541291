use std::path::Path;

pub const SEARCH: &str = "Images/search.png";
pub const DOWNLOAD: &str = "Images/download.png";
pub const UPLOAD: &str = "Images/upload.png";
pub const SUCCESS: &str = "Images/success.png";
pub const DELETE: &str = "Images/delete.png";
pub const START: &str = "Images/start.png";
pub const ERROR: &str = "Images/error.png";

/// Notification icons need an absolute path; result icons stay relative to
/// the plugin directory and are resolved by the host itself.
pub fn resolve(plugin_dir: Option<&Path>, icon: &str) -> String {
    match plugin_dir {
        Some(dir) => dir.join(icon).to_string_lossy().into_owned(),
        None => icon.to_string(),
    }
}
