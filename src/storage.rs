use crate::models::{AppSettings, RecentFile};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const MAX_RECENT_FILES: usize = 10;

pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pdfscribe")
}

fn atomic_write(path: &PathBuf, data: &str) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");

    {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(data.as_bytes())?;
        file.sync_all()?;
    }

    fs::rename(&tmp_path, path)?;

    Ok(())
}

pub fn load_settings() -> AppSettings {
    let path = get_config_dir().join("settings.json");
    if let Ok(data) = fs::read_to_string(&path) {
        match serde_json::from_str(&data) {
            Ok(settings) => return settings,
            Err(e) => tracing::warn!("corrupted settings.json, using defaults: {e}"),
        }
    }
    AppSettings::default()
}

pub fn save_settings(settings: &AppSettings) {
    let dir = get_config_dir();
    if let Err(e) = fs::create_dir_all(&dir) {
        tracing::warn!("failed to create config directory: {e}");
        return;
    }
    let path = dir.join("settings.json");
    if let Ok(data) = serde_json::to_string_pretty(settings) {
        if let Err(e) = atomic_write(&path, &data) {
            tracing::warn!("failed to save settings: {e}");
        }
    }
}

pub fn load_recent_files() -> Vec<RecentFile> {
    let path = get_config_dir().join("recent_files.json");
    if let Ok(data) = fs::read_to_string(&path) {
        match serde_json::from_str(&data) {
            Ok(files) => return files,
            Err(e) => tracing::warn!("corrupted recent_files.json, using empty list: {e}"),
        }
    }
    Vec::new()
}

pub fn save_recent_files(recent_files: &[RecentFile]) {
    let dir = get_config_dir();
    if let Err(e) = fs::create_dir_all(&dir) {
        tracing::warn!("failed to create config directory: {e}");
        return;
    }
    let path = dir.join("recent_files.json");
    if let Ok(data) = serde_json::to_string_pretty(recent_files) {
        if let Err(e) = atomic_write(&path, &data) {
            tracing::warn!("failed to save recent files: {e}");
        }
    }
}

/// Inserts `path` at the front, dropping duplicates and anything beyond
/// the cap. Pure list surgery; persisting the result is the caller's job.
pub fn add_recent_file(recent_files: &mut Vec<RecentFile>, path: &Path) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    recent_files.retain(|f| f.path != path.to_string_lossy());

    let new_file = RecentFile {
        path: path.to_string_lossy().to_string(),
        name,
        last_opened: std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0),
    };

    recent_files.insert(0, new_file);
    if recent_files.len() > MAX_RECENT_FILES {
        recent_files.truncate(MAX_RECENT_FILES);
    }
}
