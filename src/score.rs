use bevy::prelude::*;

use crate::{
    config::Tuning,
    save_load::{save_to_disk, SaveData},
};

/// Pipes cleared this round.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score(pub u32);

impl Score {
    pub fn bump(&mut self) {
        self.0 = self.0.saturating_add(1);
    }
}

/// "Score: N" in the top-left corner while playing.
#[derive(Component)]
pub struct ScoreText;

/// Shown once the score reaches `Tuning::congrats_score`.
#[derive(Component)]
pub struct CongratsBanner;

pub fn score_text() -> impl Bundle {
    (
        ScoreText,
        Text::new("Score: 0"),
        TextFont {
            font_size: 32.0,
            ..default()
        },
        TextColor(Color::BLACK),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            top: Val::Px(20.0),
            ..default()
        },
    )
}

pub fn congrats_banner() -> impl Bundle {
    (
        CongratsBanner,
        Visibility::Hidden,
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(60.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        children![(
            Text::new("Congrats Buddy!"),
            TextFont {
                font_size: 32.0,
                ..default()
            },
            TextColor(Color::srgb_u8(0, 200, 0)),
        )],
    )
}

pub fn update_hud(
    score: Res<Score>,
    tuning: Res<Tuning>,
    mut texts: Query<&mut Text, With<ScoreText>>,
    mut banners: Query<&mut Visibility, With<CongratsBanner>>,
) {
    if !score.is_changed() {
        return;
    }

    for mut text in &mut texts {
        text.0 = format!("Score: {}", score.0);
    }

    let cheering = score.0 >= tuning.congrats_score;
    for mut visibility in &mut banners {
        visibility.set_if_neq(if cheering {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });
    }
}

/// Raises the best score if this round beat it and persists the change.
/// Returns whether a new best was set.
pub fn raise_best(save_data: &mut SaveData, score: Score) -> bool {
    if score.0 > save_data.best_score {
        save_data.best_score = score.0;
        true
    } else {
        false
    }
}

pub fn record_best_score(score: Res<Score>, mut save_data: ResMut<SaveData>) {
    if raise_best(&mut save_data, *score) {
        info!(best = save_data.best_score, "New best score");
        save_to_disk(&save_data);
    } else {
        info!(score = score.0, best = save_data.best_score, "Round over");
    }
}
