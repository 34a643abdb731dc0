use bevy::prelude::*;

use crate::{
    bird::Bird,
    config::Tuning,
    game_state::GameState,
    pipes::{Course, Pipe},
    playfield::Playfield,
    score::Score,
};

/// Inserted when the bird crashes. Stops the physics tick from running again
/// before the state change to `GameOver` takes effect.
#[derive(Resource, Debug)]
pub struct Crashed;

/// True when the rectangles share some area. Touching edges do not count.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    !a.intersect(b).is_empty()
}

/// Touching the top or bottom edge of the screen is already a crash.
pub fn out_of_bounds(bird: Rect, playfield: &Playfield) -> bool {
    bird.min.y <= 0.0 || bird.max.y >= playfield.height
}

pub fn hits_pipe(bird: Rect, pipe: &Pipe, tuning: &Tuning, playfield: &Playfield) -> bool {
    overlaps(bird, pipe.upper(tuning)) || overlaps(bird, pipe.lower(tuning, playfield))
}

pub fn crashed(bird: Rect, course: &Course, tuning: &Tuning, playfield: &Playfield) -> bool {
    out_of_bounds(bird, playfield)
        || course
            .pipes()
            .any(|pipe| hits_pipe(bird, pipe, tuning, playfield))
}

pub fn detect_crash(
    mut commands: Commands,
    tuning: Res<Tuning>,
    playfield: Res<Playfield>,
    course: Res<Course>,
    score: Res<Score>,
    birds: Query<&Bird>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let hit = birds
        .iter()
        .any(|bird| crashed(bird.bounds(tuning.bird_size), &course, &tuning, &playfield));

    if hit {
        info!(score = score.0, "Bird crashed");
        commands.insert_resource(Crashed);
        next_state.set(GameState::GameOver);
    }
}
