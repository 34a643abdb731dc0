use bevy::{asset::LoadState, prelude::*};

pub struct AssetsPlugin;

impl Plugin for AssetsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_game_assets)
            .add_systems(Update, exit_on_failed_load);
    }
}

/// Everything the game reads from `assets/`. Loaded once at startup.
#[derive(Resource)]
pub struct GameAssets {
    pub bird_image: Handle<Image>,
    pub flap_sound: Handle<AudioSource>,
}

fn load_game_assets(mut commands: Commands, asset_server: Res<AssetServer>) {
    // Loading happens in the background; the handles are valid right away
    commands.insert_resource(GameAssets {
        bird_image: asset_server.load("bird.png"),
        flap_sound: asset_server.load("audio/flap.wav"),
    });
}

/// The game has no fallback art or sound, so a missing asset ends the
/// process instead of leaving an invisible bird on screen.
fn exit_on_failed_load(
    asset_server: Res<AssetServer>,
    assets: Option<Res<GameAssets>>,
    mut exit: MessageWriter<AppExit>,
) {
    let Some(assets) = assets else {
        return;
    };

    let states = [
        ("bird image", asset_server.load_state(assets.bird_image.id())),
        ("flap sound", asset_server.load_state(assets.flap_sound.id())),
    ];

    for (name, state) in states {
        if let LoadState::Failed(err) = state {
            error!("Failed to load {}: {}", name, err);
            exit.write(AppExit::error());
            return;
        }
    }
}
