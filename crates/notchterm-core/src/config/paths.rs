use directories::ProjectDirs;
use std::path::PathBuf;

/// Per-application support directory holding all persisted state.
///
/// On macOS this resolves to `~/Library/Application Support/NotchTerm`;
/// when the platform directories cannot be determined we fall back to
/// `$HOME/.config/notchterm`.
pub fn support_dir() -> PathBuf {
    match ProjectDirs::from("com", "notchterm", "NotchTerm") {
        Some(dirs) => dirs.data_dir().to_path_buf(),
        None => {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config").join("notchterm")
        }
    }
}
