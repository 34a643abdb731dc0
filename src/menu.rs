use bevy::prelude::*;

use crate::game_state::GameState;

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Menu), spawn_menu)
            .add_systems(
                Update,
                handle_play_button.run_if(in_state(GameState::Menu)),
            )
            .add_systems(OnExit(GameState::Menu), cleanup_menu);
    }
}

pub const TITLE_RED: Color = Color::srgb(200.0 / 255.0, 0.0, 0.0);

/// Root of the start menu UI.
#[derive(Component)]
struct MenuUi;

#[derive(Component)]
struct PlayButton;

/// A 200x80 button with a thick black border and a white label. Both screens
/// use the same shape, only the fill changes.
pub fn labeled_button(label: &'static str, fill: Color, marker: impl Component) -> impl Bundle {
    (
        Button,
        Node {
            width: Val::Px(200.0),
            height: Val::Px(80.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            border: UiRect::all(Val::Px(3.0)),
            ..default()
        },
        BackgroundColor(fill),
        BorderColor::all(Color::BLACK),
        marker,
        children![(
            Text::new(label),
            TextFont {
                font_size: 32.0,
                ..default()
            },
            TextColor(Color::WHITE),
        )],
    )
}

fn spawn_menu(mut commands: Commands) {
    commands.spawn((
        MenuUi,
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            row_gap: Val::Px(60.0),
            ..default()
        },
        children![
            (
                Text::new("Flappy Bird"),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextColor(TITLE_RED),
            ),
            labeled_button("Play", crate::render::PIPE_GREEN, PlayButton),
        ],
    ));
}

/// Starts a round when Play is clicked.
///
/// Adding `Button` to a UI node makes Bevy's UI system keep an `Interaction`
/// component on it up to date (None / Hovered / Pressed) from the cursor.
/// `Changed<Interaction>` narrows the query to buttons whose interaction
/// changed this frame, so holding the mouse down only fires once.
///
/// `NextState` only queues the transition. It is applied in the
/// `StateTransition` schedule before the next `Update`, which is when
/// `OnExit(Menu)` and `OnEnter(Playing)` run.
fn handle_play_button(
    buttons: Query<&Interaction, (Changed<Interaction>, With<PlayButton>)>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for interaction in &buttons {
        if *interaction == Interaction::Pressed {
            info!("Play pressed");
            next_state.set(GameState::Playing);
        }
    }
}

fn cleanup_menu(mut commands: Commands, query: Query<Entity, With<MenuUi>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn pressing_play_starts_a_round() {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<GameState>()
            .add_systems(Update, handle_play_button);
        let button = app.world_mut().spawn((PlayButton, Interaction::None)).id();
        app.update();
        assert_eq!(
            *app.world().resource::<State<GameState>>().get(),
            GameState::Menu
        );

        *app.world_mut().get_mut::<Interaction>(button).unwrap() = Interaction::Pressed;
        app.update();
        app.update();
        assert_eq!(
            *app.world().resource::<State<GameState>>().get(),
            GameState::Playing
        );
    }
}
