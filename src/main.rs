use bevy::{
    prelude::*,
    window::{MonitorSelection, WindowMode},
};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Flappy Bird".into(),
                mode: WindowMode::BorderlessFullscreen(MonitorSelection::Primary),
                ..default()
            }),
            ..default()
        }))
        .add_plugins((
            config::ConfigPlugin,
            save_load::SaveLoadPlugin,
            game_state::GameStatePlugin,
            assets::AssetsPlugin,
            audio::AudioPlugin,
            render::RenderPlugin,
            menu::MenuPlugin,
            round::RoundPlugin,
            game_over::GameOverPlugin,
        ))
        .run();
}

mod assets;
mod audio;
mod bird;
mod collision;
mod config;
mod game_over;
mod game_state;
mod menu;
mod pipes;
mod playfield;
mod render;
mod round;
mod save_load;
mod score;
