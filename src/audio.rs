use bevy::prelude::*;

use crate::assets::GameAssets;

pub struct AudioPlugin;

impl Plugin for AudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(play_flap_sound);
    }
}

/// Triggered whenever the player flaps.
///
/// Observers run right when `commands.trigger(Flapped)` is applied instead
/// of polling a message queue every frame, so the sound starts on the same
/// frame as the key press whatever state the physics tick is in.
#[derive(Event, Debug)]
pub struct Flapped;

fn play_flap_sound(_trigger: On<Flapped>, mut commands: Commands, assets: Res<GameAssets>) {
    // DESPAWN cleans the player entity up once the clip finishes
    commands.spawn((
        AudioPlayer::new(assets.flap_sound.clone()),
        PlaybackSettings::DESPAWN,
    ));
}
