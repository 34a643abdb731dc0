use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub struct SaveLoadPlugin;

impl Plugin for SaveLoadPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_save_data);
    }
}

/// Progress kept between sessions.
///
/// New fields need `#[serde(default)]` so older save files still parse.
#[derive(Resource, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveData {
    #[serde(default)]
    pub best_score: u32,
}

// =============================================================================
// Storage backend: Native (macOS, Linux, Windows)
// =============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod storage {
    use super::SaveData;
    use bevy::prelude::*;
    use std::path::PathBuf;

    /// `<data dir>/flappy-bird/save.ron`, or `save.ron` in the working
    /// directory when the platform has no data dir.
    fn save_file_path() -> PathBuf {
        match dirs::data_dir() {
            Some(dir) => dir.join("flappy-bird").join("save.ron"),
            None => PathBuf::from("save.ron"),
        }
    }

    pub fn load() -> Option<SaveData> {
        let path = save_file_path();

        if !path.exists() {
            info!("No save file found at {:?}. Starting fresh.", path);
            return None;
        }

        match std::fs::read_to_string(&path) {
            Ok(contents) => match super::decode(&contents) {
                Ok(data) => {
                    info!("Loaded save data from {:?}: {:?}", path, data);
                    Some(data)
                }
                Err(e) => {
                    error!("Failed to parse save file: {}. Using defaults.", e);
                    None
                }
            },
            Err(e) => {
                error!("Failed to read save file: {}. Using defaults.", e);
                None
            }
        }
    }

    pub fn save(save_data: &SaveData) {
        let path = save_file_path();

        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                error!("Failed to create save directory: {}", e);
                return;
            }
        }

        match super::encode(save_data) {
            Ok(serialized) => {
                if let Err(e) = std::fs::write(&path, serialized) {
                    error!("Failed to write save file: {}", e);
                } else {
                    info!("Game saved to {:?}", path);
                }
            }
            Err(e) => error!("Failed to serialize save data: {}", e),
        }
    }
}

// =============================================================================
// Storage backend: WASM (browser). No persistence yet, every session starts
// from zero.
// =============================================================================

#[cfg(target_arch = "wasm32")]
mod storage {
    use super::SaveData;
    use bevy::prelude::*;

    pub fn load() -> Option<SaveData> {
        // TODO: read from localStorage via web-sys once there is a web build
        warn!("Save data is not persisted on the web. Using defaults.");
        None
    }

    pub fn save(_save_data: &SaveData) {
        warn!("Save data is not persisted on the web.");
    }
}

fn encode(save_data: &SaveData) -> Result<String, ron::Error> {
    ron::ser::to_string_pretty(save_data, ron::ser::PrettyConfig::default())
}

fn decode(contents: &str) -> Result<SaveData, ron::error::SpannedError> {
    ron::from_str::<SaveData>(contents)
}

fn load_save_data(mut commands: Commands) {
    let save_data = storage::load().unwrap_or_default();
    commands.insert_resource(save_data);
}

/// Writes `save_data` out. Failures are logged, never fatal.
pub fn save_to_disk(save_data: &SaveData) {
    storage::save(save_data);
}
