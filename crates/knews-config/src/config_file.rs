use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = ".knews.toml";

/// Load config file content from CWD first, then home directory
///
/// Returns the file content if found, None otherwise.
pub fn load_config_file() -> Option<String> {
    let home = dirs::home_dir();
    load_config_file_from(Path::new("."), home.as_deref())
}

fn load_config_file_from(cwd: &Path, home: Option<&Path>) -> Option<String> {
    let candidates = std::iter::once(cwd.join(CONFIG_FILE)).chain(home.map(home_config_path));

    for path in candidates {
        if let Ok(content) = std::fs::read_to_string(&path) {
            log::debug!("Loaded config from {}", path.display());
            return Some(content);
        }
    }

    None
}

fn home_config_path(home: &Path) -> PathBuf {
    home.join(CONFIG_FILE)
}
