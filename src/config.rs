use bevy::prelude::*;
use serde::Deserialize;

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_tuning);
    }
}

/// Number of pipes alive at any moment during a round.
pub const PIPE_COUNT: usize = 3;

/// Gameplay constants. All distances are in screen pixels and all rates are
/// per physics tick, not per second.
///
/// Every field falls back to its default when missing from `tuning.ron`, so a
/// file that only overrides `gravity` is valid.
#[derive(Resource, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    /// Velocity the bird is set to on a flap. Negative is up.
    pub flap_velocity: f32,
    pub bird_size: f32,
    pub pipe_width: f32,
    /// Vertical opening between the upper and lower pipe.
    pub pipe_gap: f32,
    /// Minimum distance between a gap and the top or bottom of the screen.
    pub pipe_margin: f32,
    /// Horizontal distance between consecutive pipes.
    pub pipe_spacing: f32,
    pub pipe_speed: f32,
    /// Physics ticks per second.
    pub tick_rate: f64,
    /// Score at which the HUD starts cheering.
    pub congrats_score: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            flap_velocity: -7.0,
            bird_size: 40.0,
            pipe_width: 70.0,
            pipe_gap: 200.0,
            pipe_margin: 50.0,
            pipe_spacing: 250.0,
            pipe_speed: 3.0,
            tick_rate: 60.0,
            congrats_score: 5,
        }
    }
}

impl Tuning {
    /// Reads `tuning.ron` from the working directory. Missing or broken files
    /// give the defaults.
    pub fn load() -> Self {
        let path = std::path::Path::new("tuning.ron");
        if !path.exists() {
            info!("No tuning file at {:?}, using built-in constants.", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                error!("Failed to parse tuning file: {}. Using defaults.", e);
                Self::default()
            }),
            Err(e) => {
                error!("Failed to read tuning file: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str::<Tuning>(contents)
    }
}

fn load_tuning(mut commands: Commands, mut fixed_time: ResMut<Time<Fixed>>) {
    let mut tuning = Tuning::load();
    if !(tuning.tick_rate.is_finite() && tuning.tick_rate > 0.0) {
        warn!(tick_rate = tuning.tick_rate, "Bad tick rate, using the default");
        tuning.tick_rate = Tuning::default().tick_rate;
    }
    // One fixed step is one physics tick
    fixed_time.set_timestep_hz(tuning.tick_rate);
    info!(?tuning, "Tuning loaded");
    commands.insert_resource(tuning);
}
