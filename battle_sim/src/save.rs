//! JSON save files

use anyhow::{Context, Result};
use battle_core::{BattleSnapshot, Difficulty};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything written to disk for one battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub difficulty: Difficulty,
    pub seed: u64,
    pub snapshot: BattleSnapshot,
}

/// Append `.json` unless the path already ends with it
pub fn with_json_extension(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == "json") {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_os_string();
    name.push(".json");
    PathBuf::from(name)
}

/// Write a save file; returns the path actually written
pub fn save(path: &Path, save: &SaveFile) -> Result<PathBuf> {
    let path = with_json_extension(path);
    let json = serde_json::to_string_pretty(save).context("Failed to serialize battle")?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

pub fn load(path: &Path) -> Result<SaveFile> {
    let path = with_json_extension(path);
    let json =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse {}", path.display()))
}
