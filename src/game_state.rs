use bevy::prelude::*;

pub struct GameStatePlugin;

impl Plugin for GameStatePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .insert_resource(ClearColor(Color::WHITE))
            .add_systems(Update, paint_background.run_if(state_changed::<GameState>));
    }
}

/// Which screen is up. Cycles Menu -> Playing -> GameOver -> Menu until the
/// player exits.
#[derive(States, Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    GameOver,
}

/// White while playing or in the menu, black behind the game over text.
pub fn background_for(state: GameState) -> Color {
    match state {
        GameState::Menu | GameState::Playing => Color::WHITE,
        GameState::GameOver => Color::BLACK,
    }
}

fn paint_background(state: Res<State<GameState>>, mut clear: ResMut<ClearColor>) {
    clear.0 = background_for(*state.get());
    info!(state = ?state.get(), "Entered state");
}
