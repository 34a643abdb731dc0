use bevy::prelude::*;

use crate::{
    bird::Bird,
    config::{Tuning, PIPE_COUNT},
    game_state::GameState,
    pipes::Course,
    playfield::Playfield,
};

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera).add_systems(
            Update,
            (sync_bird_sprite, sync_pipe_sprites).run_if(in_state(GameState::Playing)),
        );
    }
}

pub const PIPE_GREEN: Color = Color::srgb(0.0, 200.0 / 255.0, 0.0);

// Pipes are drawn over the bird
const BIRD_Z: f32 = 0.0;
const PIPE_Z: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeHalf {
    Upper,
    Lower,
}

/// Draws one segment of the pipe at `slot` in the [`Course`]. Slots are
/// positions in the course, not particular pipes, so a recycled pipe simply
/// shows up in the sprites of the slot it moved into.
#[derive(Component, Debug, Clone, Copy)]
pub struct PipeSprite {
    pub slot: usize,
    pub half: PipeHalf,
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// One sprite per pipe segment for a full course.
pub fn pipe_sprites() -> impl Iterator<Item = (PipeSprite, Sprite)> {
    (0..PIPE_COUNT).flat_map(|slot| {
        [PipeHalf::Upper, PipeHalf::Lower].map(|half| {
            (
                PipeSprite { slot, half },
                Sprite::from_color(PIPE_GREEN, Vec2::ONE),
            )
        })
    })
}

// =============================================================================
// Model -> sprite sync
//
// Bird and Course hold screen-space state and never touch Transform. These
// systems copy that state into the sprites once per frame, after the fixed
// ticks of that frame have run.
// =============================================================================

fn sync_bird_sprite(
    tuning: Res<Tuning>,
    playfield: Res<Playfield>,
    mut birds: Query<(&Bird, &mut Transform)>,
) {
    for (bird, mut transform) in &mut birds {
        let center = playfield.to_world(bird.bounds(tuning.bird_size));
        transform.translation = center.extend(BIRD_Z);
    }
}

fn sync_pipe_sprites(
    tuning: Res<Tuning>,
    playfield: Res<Playfield>,
    course: Res<Course>,
    mut sprites: Query<(&PipeSprite, &mut Transform, &mut Sprite)>,
) {
    for (segment, mut transform, mut sprite) in &mut sprites {
        let Some(pipe) = course.get(segment.slot) else {
            continue;
        };
        let rect = match segment.half {
            PipeHalf::Upper => pipe.upper(&tuning),
            PipeHalf::Lower => pipe.lower(&tuning, &playfield),
        };
        transform.translation = playfield.to_world(rect).extend(PIPE_Z);
        sprite.custom_size = Some(rect.size());
    }
}
