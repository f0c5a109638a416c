use serde::{Deserialize, Serialize};

use crate::TurnMode;

/// Rules of one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub turn_mode: TurnMode,
    /// Whether obstacles appear on the board.
    pub obstacles: bool,
    /// How many deliveries are pending at any time.
    pub delivery_target_count: usize,
    /// An obstacle appears after every this many completed deliveries.
    pub obstacle_interval: u32,
}

/// The two flavors of the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Teams take turns in order, the board stays open.
    Classic,
    /// Teams are picked explicitly, and obstacles pile up as pizzas get delivered.
    Obstacles,
}

impl GameConfig {
    pub fn new(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Self {
                turn_mode: TurnMode::Rotation,
                obstacles: false,
                delivery_target_count: 5,
                obstacle_interval: 2,
            },
            Variant::Obstacles => Self {
                turn_mode: TurnMode::Selection,
                obstacles: true,
                delivery_target_count: 5,
                obstacle_interval: 2,
            },
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(Variant::Classic)
    }
}

/// Whether the game is driven by questions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// No questions: every answer can be confirmed right away, and the game never ends.
    Free,
    Quiz,
}
