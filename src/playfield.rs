use bevy::{prelude::*, window::PrimaryWindow};

/// Size of the visible screen in logical pixels, captured when a round starts.
///
/// Gameplay works in screen space: origin at the top-left corner, y growing
/// downward. Bevy's 2D camera is centred with y growing upward, so anything
/// drawn goes through [`Playfield::to_world`].
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// World-space centre of a screen-space rectangle.
    pub fn to_world(&self, rect: Rect) -> Vec2 {
        let center = rect.center();
        Vec2::new(center.x - self.width / 2.0, self.height / 2.0 - center.y)
    }
}

/// Takes the playfield size from the primary window. Keeps the previous size
/// if there is no window (headless runs).
pub fn capture_playfield(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
    current: Option<Res<Playfield>>,
) {
    let playfield = match windows.single() {
        Ok(window) => Playfield::new(window.width(), window.height()),
        Err(_) => current.map(|p| *p).unwrap_or_default(),
    };
    debug!(?playfield, "Playfield captured");
    commands.insert_resource(playfield);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_left_corner_maps_to_upper_left_of_world() {
        let field = Playfield::new(800.0, 600.0);
        let pos = field.to_world(Rect::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(pos, Vec2::new(-390.0, 290.0));
    }

    #[test]
    fn screen_centre_is_world_origin() {
        let field = Playfield::new(800.0, 600.0);
        let pos = field.to_world(Rect::new(390.0, 290.0, 410.0, 310.0));
        assert_eq!(pos, Vec2::ZERO);
    }
}
