use std::collections::VecDeque;

use bevy::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::{Tuning, PIPE_COUNT},
    playfield::Playfield,
    score::Score,
};

/// One obstacle: a column with a gap. `gap_top` is the y where the upper
/// segment ends and is fixed for the pipe's lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    pub x: f32,
    pub gap_top: f32,
}

impl Pipe {
    pub fn new(x: f32, tuning: &Tuning, playfield: &Playfield, rng: &mut impl Rng) -> Self {
        let (low, high) = gap_top_range(tuning, playfield);
        Self {
            x,
            gap_top: rng.gen_range(low..=high) as f32,
        }
    }

    pub fn upper(&self, tuning: &Tuning) -> Rect {
        Rect::new(self.x, 0.0, self.x + tuning.pipe_width, self.gap_top)
    }

    /// The lower segment is as tall as the screen and hangs off the bottom.
    pub fn lower(&self, tuning: &Tuning, playfield: &Playfield) -> Rect {
        let top = self.gap_top + tuning.pipe_gap;
        Rect::new(
            self.x,
            top,
            self.x + tuning.pipe_width,
            top + playfield.height,
        )
    }

    pub fn right_edge(&self, tuning: &Tuning) -> f32 {
        self.x + tuning.pipe_width
    }
}

/// Inclusive bounds for a pipe's `gap_top`, in whole pixels. On screens too
/// short for the margins the range collapses to the top margin.
pub fn gap_top_range(tuning: &Tuning, playfield: &Playfield) -> (i32, i32) {
    let low = tuning.pipe_margin as i32;
    let high = (playfield.height - tuning.pipe_gap - tuning.pipe_margin) as i32;
    (low, high.max(low))
}

/// The pipes of the current round, oldest (leftmost) first.
#[derive(Resource, Debug, Clone)]
pub struct Course {
    pipes: VecDeque<Pipe>,
}

impl Course {
    /// Lines up [`PIPE_COUNT`] pipes just past the right edge of the screen.
    pub fn new(tuning: &Tuning, playfield: &Playfield, rng: &mut impl Rng) -> Self {
        let pipes = (0..PIPE_COUNT)
            .map(|i| {
                let x = playfield.width + i as f32 * tuning.pipe_spacing;
                Pipe::new(x, tuning, playfield, rng)
            })
            .collect();
        Self { pipes }
    }

    pub fn pipes(&self) -> impl Iterator<Item = &Pipe> {
        self.pipes.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Pipe> {
        self.pipes.get(index)
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn scroll(&mut self, speed: f32) {
        for pipe in &mut self.pipes {
            pipe.x -= speed;
        }
    }

    /// Replaces the front pipe with a fresh one at the back once it has fully
    /// left the screen. Returns whether that happened.
    pub fn recycle(&mut self, tuning: &Tuning, playfield: &Playfield, rng: &mut impl Rng) -> bool {
        let gone = self
            .pipes
            .front()
            .is_some_and(|front| front.right_edge(tuning) < 0.0);
        if !gone {
            return false;
        }

        self.pipes.pop_front();
        let x = self
            .pipes
            .back()
            .map_or(playfield.width, |last| last.x + tuning.pipe_spacing);
        self.pipes.push_back(Pipe::new(x, tuning, playfield, rng));
        true
    }
}

/// Randomness for gap heights. Kept as a resource so tests can seed it.
#[derive(Resource)]
pub struct CourseRng(pub StdRng);

impl Default for CourseRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

pub fn scroll_course(tuning: Res<Tuning>, mut course: ResMut<Course>) {
    course.scroll(tuning.pipe_speed);
}

pub fn recycle_pipes(
    tuning: Res<Tuning>,
    playfield: Res<Playfield>,
    mut course: ResMut<Course>,
    mut rng: ResMut<CourseRng>,
    mut score: ResMut<Score>,
) {
    if course.recycle(&tuning, &playfield, &mut rng.0) {
        score.bump();
        debug!(score = score.0, "Pipe recycled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Tuning, Playfield, StdRng) {
        (
            Tuning::default(),
            Playfield::new(1000.0, 700.0),
            StdRng::seed_from_u64(7),
        )
    }

    #[test]
    fn course_starts_off_screen_and_evenly_spaced() {
        let (tuning, field, mut rng) = setup();
        let course = Course::new(&tuning, &field, &mut rng);
        let xs: Vec<f32> = course.pipes().map(|p| p.x).collect();
        assert_eq!(xs, vec![1000.0, 1250.0, 1500.0]);
    }

    #[test]
    fn gap_tops_stay_in_range() {
        let (tuning, field, mut rng) = setup();
        let (low, high) = gap_top_range(&tuning, &field);
        assert_eq!((low, high), (50, 450));
        for _ in 0..500 {
            let pipe = Pipe::new(0.0, &tuning, &field, &mut rng);
            assert!(pipe.gap_top >= low as f32 && pipe.gap_top <= high as f32);
            assert_eq!(pipe.gap_top.fract(), 0.0);
        }
    }

    #[test]
    fn short_screen_collapses_gap_range() {
        let (tuning, _, mut rng) = setup();
        let field = Playfield::new(400.0, 250.0);
        assert_eq!(gap_top_range(&tuning, &field), (50, 50));
        assert_eq!(Pipe::new(0.0, &tuning, &field, &mut rng).gap_top, 50.0);
    }

    #[test]
    fn segments_leave_exactly_the_gap() {
        let (tuning, field, _) = setup();
        let pipe = Pipe { x: 10.0, gap_top: 120.0 };
        let upper = pipe.upper(&tuning);
        let lower = pipe.lower(&tuning, &field);
        assert_eq!(upper, Rect::new(10.0, 0.0, 80.0, 120.0));
        assert_eq!(lower.min, Vec2::new(10.0, 320.0));
        assert_eq!(lower.min.y - upper.max.y, tuning.pipe_gap);
        assert!(lower.max.y >= field.height);
    }

    #[test]
    fn front_pipe_waits_until_fully_off_screen() {
        let (tuning, field, mut rng) = setup();
        let mut course = Course::new(&tuning, &field, &mut rng);
        // Right edge lands exactly on zero: still visible by one column
        course.scroll(course.get(0).unwrap().right_edge(&tuning));
        assert!(!course.recycle(&tuning, &field, &mut rng));
        course.scroll(0.5);
        assert!(course.recycle(&tuning, &field, &mut rng));
    }

    #[test]
    fn recycling_keeps_three_ordered_pipes() {
        let (tuning, field, mut rng) = setup();
        let mut course = Course::new(&tuning, &field, &mut rng);
        let mut recycled = 0;
        for _ in 0..5_000 {
            course.scroll(tuning.pipe_speed);
            let last_x = course.get(course.len() - 1).unwrap().x;
            if course.recycle(&tuning, &field, &mut rng) {
                recycled += 1;
                assert_eq!(course.get(2).unwrap().x, last_x + tuning.pipe_spacing);
            }
            assert_eq!(course.len(), PIPE_COUNT);
            let xs: Vec<f32> = course.pipes().map(|p| p.x).collect();
            assert!(xs.windows(2).all(|w| w[1] - w[0] == tuning.pipe_spacing));
        }
        assert!(recycled > 0);
    }
}
