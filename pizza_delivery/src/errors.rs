use crate::{Cell, Swatch, Team};

/// The error type for [`GameState::attempt_move()`](crate::GameState::attempt_move).
#[derive(Debug, PartialEq, Eq)]
pub enum IllegalMove {
    /// No correct answer has unlocked a move yet.
    NotPermitted,
    NoActingTeam,
    OutOfBounds { target: Cell },
    NotAdjacent { from: Cell, target: Cell },
    Obstacle { target: Cell },
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::NotPermitted => {
                write!(f, "Moving is only allowed after a correct answer")
            }
            IllegalMove::NoActingTeam => write!(f, "No team has been selected"),
            IllegalMove::OutOfBounds { target } => {
                write!(f, "Cell {} is outside of the board", target)
            }
            IllegalMove::NotAdjacent { from, target } => write!(
                f,
                "Cell {} is not one step away from the team's position {}",
                target, from
            ),
            IllegalMove::Obstacle { target } => write!(f, "Cell {} is blocked", target),
        }
    }
}

/// The error type for confirming an answer.
#[derive(Debug, PartialEq, Eq)]
pub enum AnswerRejected {
    /// Only happens with explicit team selection.
    NoTeamSelected,
    MovePending,
    /// In quiz mode, while the questions haven't arrived.
    NoQuestion,
    /// The answer is not one of the options, or the question is not multiple choice.
    NotAnOption,
    GameOver,
}

impl std::error::Error for AnswerRejected {}

impl std::fmt::Display for AnswerRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerRejected::NoTeamSelected => write!(f, "Select a team first"),
            AnswerRejected::MovePending => {
                write!(f, "The current team has to move before the next answer")
            }
            AnswerRejected::NoQuestion => write!(f, "There is no question to answer"),
            AnswerRejected::NotAnOption => {
                write!(f, "That is not an option of the current question")
            }
            AnswerRejected::GameOver => write!(f, "The game is over"),
        }
    }
}

/// The error type for [`GameState::select_team()`](crate::GameState::select_team).
#[derive(Debug, PartialEq, Eq)]
pub enum SelectionRejected {
    /// Teams take turns in order, there is nothing to select.
    RotationMode,
    MovePending,
    GameOver,
}

impl std::error::Error for SelectionRejected {}

impl std::fmt::Display for SelectionRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionRejected::RotationMode => write!(f, "Teams play in a fixed order"),
            SelectionRejected::MovePending => {
                write!(f, "The selected team has to move first")
            }
            SelectionRejected::GameOver => write!(f, "The game is over"),
        }
    }
}

/// Returned when a team picks a color that another team already uses.
#[derive(Debug, PartialEq, Eq)]
pub struct ColorTaken {
    pub swatch: Swatch,
    pub owner: Team,
}

impl std::error::Error for ColorTaken {}

impl std::fmt::Display for ColorTaken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "The color {} is already used by team {}",
            self.swatch.css(),
            self.owner
        )
    }
}
