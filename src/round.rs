use bevy::{ecs::schedule::ScheduleLabel, prelude::*};

use crate::{
    assets::GameAssets,
    bird::{self, Bird, FlapQueued},
    collision::{self, Crashed},
    config::Tuning,
    game_state::GameState,
    pipes::{self, Course, CourseRng},
    playfield::{self, Playfield},
    render,
    score::{self, Score},
};

pub struct RoundPlugin;

impl Plugin for RoundPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CourseRng>()
            .init_resource::<FlapQueued>()
            .init_resource::<Score>()
            .add_systems(
                OnEnter(GameState::Playing),
                (playfield::capture_playfield, start_round).chain(),
            )
            .add_systems(
                Update,
                (bird::queue_flap, score::update_hud).run_if(in_state(GameState::Playing)),
            )
            .add_systems(OnExit(GameState::Playing), clear_round);

        // =====================================================================
        // FixedUpdate vs Update
        // =====================================================================
        // Update runs once per rendered frame, however fast the monitor is.
        // FixedUpdate runs at a fixed rate (Time<Fixed>, set from tick_rate),
        // catching up with several runs in one frame if needed. Gravity and
        // pipe speed are per-tick constants, so physics must live there or
        // the bird would fall faster on a 144 Hz screen.
        //
        // Input stays in Update: just_pressed is only true for one frame, and
        // a frame can run zero fixed steps. queue_flap stores the press in
        // FlapQueued so the next tick sees it.
        add_tick_systems(app, FixedUpdate);
    }
}

/// One physics tick: flap and fall, move the pipes, swap out the one that
/// left the screen, then check for a crash. Order matters.
pub fn add_tick_systems(app: &mut App, schedule: impl ScheduleLabel) {
    app.add_systems(
        schedule,
        (
            bird::flap_and_fall,
            pipes::scroll_course,
            pipes::recycle_pipes,
            collision::detect_crash,
        )
            .chain()
            .run_if(in_state(GameState::Playing).and(not(resource_exists::<Crashed>))),
    );
}

/// Everything spawned for a round; despawned when the round ends.
#[derive(Component)]
pub struct RoundEntity;

fn start_round(
    mut commands: Commands,
    tuning: Res<Tuning>,
    playfield: Res<Playfield>,
    assets: Res<GameAssets>,
    mut rng: ResMut<CourseRng>,
) {
    let bird = Bird::new(&playfield);
    let course = Course::new(&tuning, &playfield, &mut rng.0);
    info!(?playfield, "Round started");

    commands.remove_resource::<Crashed>();
    commands.insert_resource(Score::default());
    commands.insert_resource(FlapQueued::default());

    commands.spawn((
        RoundEntity,
        bird,
        Sprite {
            image: assets.bird_image.clone(),
            custom_size: Some(Vec2::splat(tuning.bird_size)),
            ..default()
        },
        Transform::from_translation(playfield.to_world(bird.bounds(tuning.bird_size)).extend(0.0)),
    ));
    commands.insert_resource(course);

    for (segment, sprite) in render::pipe_sprites() {
        // Starts at the world origin; sync_pipe_sprites moves it into place
        // in the same frame, before anything is drawn
        commands.spawn((RoundEntity, segment, sprite, Transform::from_xyz(0.0, 0.0, -10.0)));
    }

    commands.spawn((RoundEntity, score::score_text()));
    commands.spawn((RoundEntity, score::congrats_banner()));
}

fn clear_round(mut commands: Commands, entities: Query<Entity, With<RoundEntity>>) {
    for entity in &entities {
        commands.entity(entity).despawn();
    }
}
