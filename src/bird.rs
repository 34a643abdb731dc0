use bevy::prelude::*;

use crate::{audio::Flapped, config::Tuning, playfield::Playfield};

/// The player. `x` never changes during a round; `y` and `velocity` are in
/// screen space, so a positive velocity means falling.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    pub x: f32,
    pub y: f32,
    pub velocity: f32,
}

impl Bird {
    /// A resting bird a quarter of the way across and halfway down.
    pub fn new(playfield: &Playfield) -> Self {
        Self {
            x: (playfield.width / 4.0).floor(),
            y: (playfield.height / 2.0).floor(),
            velocity: 0.0,
        }
    }

    /// Overwrites the velocity. Not additive: mashing the key gives the same
    /// lift as a single press.
    pub fn flap(&mut self, flap_velocity: f32) {
        self.velocity = flap_velocity;
    }

    /// One tick of free fall.
    pub fn fall(&mut self, gravity: f32) {
        self.velocity += gravity;
        self.y += self.velocity;
    }

    /// Square hitbox centred on the bird.
    pub fn bounds(&self, size: f32) -> Rect {
        Rect::from_center_size(Vec2::new(self.x, self.y), Vec2::splat(size))
    }
}

/// Set by input in `Update`, consumed by the next physics tick.
#[derive(Resource, Default, Debug)]
pub struct FlapQueued(pub bool);

pub fn queue_flap(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    mut queued: ResMut<FlapQueued>,
) {
    if keys.just_pressed(KeyCode::Space) {
        queued.0 = true;
        commands.trigger(Flapped);
    }
}

pub fn flap_and_fall(
    tuning: Res<Tuning>,
    mut queued: ResMut<FlapQueued>,
    mut birds: Query<&mut Bird>,
) {
    let flap = std::mem::take(&mut queued.0);
    for mut bird in &mut birds {
        if flap {
            bird.flap(tuning.flap_velocity);
        }
        bird.fall(tuning.gravity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAVITY: f32 = 0.5;
    const FLAP: f32 = -7.0;

    #[test]
    fn starts_at_rest_mid_screen() {
        let bird = Bird::new(&Playfield::new(1001.0, 601.0));
        assert_eq!(bird.x, 250.0);
        assert_eq!(bird.y, 300.0);
        assert_eq!(bird.velocity, 0.0);
    }

    #[test]
    fn gravity_adds_a_fixed_amount_each_tick() {
        let mut bird = Bird::new(&Playfield::default());
        let mut last = bird.velocity;
        for _ in 0..50 {
            bird.fall(GRAVITY);
            assert_eq!(bird.velocity - last, GRAVITY);
            last = bird.velocity;
        }
    }

    #[test]
    fn flap_replaces_velocity() {
        for prior in [-30.0, -7.0, 0.0, 0.5, 12.25, 400.0] {
            let mut bird = Bird::new(&Playfield::default());
            bird.velocity = prior;
            bird.flap(FLAP);
            assert_eq!(bird.velocity, FLAP);
        }
    }

    #[test]
    fn free_fall_matches_closed_form() {
        let start = Bird::new(&Playfield::new(800.0, 600.0));
        let mut bird = start;
        for n in 1..=40u32 {
            bird.fall(GRAVITY);
            let n = n as f32;
            assert_eq!(bird.velocity, GRAVITY * n);
            assert_eq!(bird.y, start.y + GRAVITY * n * (n + 1.0) / 2.0);
        }
    }

    #[test]
    fn bounds_are_centred() {
        let bird = Bird {
            x: 100.0,
            y: 50.0,
            velocity: 0.0,
        };
        let rect = bird.bounds(40.0);
        assert_eq!(rect.min, Vec2::new(80.0, 30.0));
        assert_eq!(rect.max, Vec2::new(120.0, 70.0));
    }
}
