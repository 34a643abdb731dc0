use bevy::prelude::*;

use crate::{
    game_state::GameState,
    menu::{labeled_button, TITLE_RED},
    save_load::SaveData,
    score::{self, Score},
};

pub struct GameOverPlugin;

impl Plugin for GameOverPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(GameState::GameOver),
            (score::record_best_score, spawn_game_over_screen).chain(),
        )
        .add_systems(
            Update,
            (handle_continue_key, handle_exit_button).run_if(in_state(GameState::GameOver)),
        )
        .add_systems(OnExit(GameState::GameOver), cleanup_game_over_screen);
    }
}

#[derive(Component)]
struct GameOverUi;

#[derive(Component)]
struct ExitButton;

fn line(text: String, font_size: f32, color: Color) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
    )
}

fn spawn_game_over_screen(mut commands: Commands, score: Res<Score>, save_data: Res<SaveData>) {
    commands.spawn((
        GameOverUi,
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            row_gap: Val::Px(20.0),
            ..default()
        },
        children![
            line("Game Over".to_string(), 64.0, TITLE_RED),
            line(format!("Score: {}", score.0), 32.0, Color::WHITE),
            line(
                "Next time, keep playing buddy!".to_string(),
                32.0,
                Color::WHITE
            ),
            line(format!("Best: {}", save_data.best_score), 32.0, Color::WHITE),
            labeled_button("Exit", TITLE_RED, ExitButton),
        ],
    ));
}

/// Space goes back to the start menu.
fn handle_continue_key(
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Space) {
        next_state.set(GameState::Menu);
    }
}

/// Unlike Space, the Exit button quits the game outright.
fn handle_exit_button(
    buttons: Query<&Interaction, (Changed<Interaction>, With<ExitButton>)>,
    mut exit: MessageWriter<AppExit>,
) {
    for interaction in &buttons {
        if *interaction == Interaction::Pressed {
            info!("Exit pressed, quitting");
            exit.write(AppExit::Success);
        }
    }
}

fn cleanup_game_over_screen(mut commands: Commands, query: Query<Entity, With<GameOverUi>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn game_over_app() -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<GameState>()
            .init_resource::<ButtonInput<KeyCode>>()
            .add_systems(
                Update,
                handle_continue_key.run_if(in_state(GameState::GameOver)),
            );
        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::GameOver);
        app.update();
        app
    }

    fn state(app: &App) -> GameState {
        *app.world().resource::<State<GameState>>().get()
    }

    #[test]
    fn space_returns_to_menu() {
        let mut app = game_over_app();
        assert_eq!(state(&app), GameState::GameOver);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Space);
        app.update();
        app.update();
        assert_eq!(state(&app), GameState::Menu);
    }

    #[test]
    fn exit_button_quits_instead_of_returning_to_menu() {
        let mut app = game_over_app();
        app.add_message::<AppExit>()
            .add_systems(
                Update,
                handle_exit_button.run_if(in_state(GameState::GameOver)),
            );
        app.world_mut().spawn((ExitButton, Interaction::Pressed));
        app.update();

        assert_eq!(app.should_exit(), Some(AppExit::Success));
        assert_eq!(state(&app), GameState::GameOver);
    }

    #[test]
    fn hovering_exit_does_nothing() {
        let mut app = game_over_app();
        app.add_message::<AppExit>()
            .add_systems(Update, handle_exit_button);
        app.world_mut().spawn((ExitButton, Interaction::Hovered));
        app.update();

        assert_eq!(app.should_exit(), None);
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut app = game_over_app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Enter);
        app.update();
        app.update();
        assert_eq!(state(&app), GameState::GameOver);
    }
}
