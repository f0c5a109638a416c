use serde::{Deserialize, Serialize};

use crate::{Team, TEAMS};

/// How the acting team is determined.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnMode {
    /// The teams take turns in a fixed order.
    Rotation,
    /// Someone picks the team before every answer.
    Selection,
}

/// Whose turn it is.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Turn {
    Rotation { current: Team },
    Selection { selected: Option<Team> },
}

impl Turn {
    pub fn new(mode: TurnMode) -> Self {
        match mode {
            TurnMode::Rotation => Turn::Rotation { current: TEAMS[0] },
            TurnMode::Selection => Turn::Selection { selected: None },
        }
    }

    pub fn mode(self) -> TurnMode {
        match self {
            Turn::Rotation { .. } => TurnMode::Rotation,
            Turn::Selection { .. } => TurnMode::Selection,
        }
    }

    /// The acting team, if there is one.
    pub fn team(self) -> Option<Team> {
        match self {
            Turn::Rotation { current } => Some(current),
            Turn::Selection { selected } => selected,
        }
    }

    /// The turn after a move or a wrong answer.
    #[must_use]
    pub fn advance(self) -> Self {
        match self {
            Turn::Rotation { current } => Turn::Rotation {
                current: current.next(),
            },
            Turn::Selection { .. } => Turn::Selection { selected: None },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_cycles_through_all_teams() {
        let mut turn = Turn::new(TurnMode::Rotation);
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.extend(turn.team());
            turn = turn.advance();
        }
        assert_eq!(
            seen,
            vec![Team::Red, Team::Blue, Team::Green, Team::Yellow, Team::Red]
        );
    }

    #[test]
    fn selection_resets_after_advance() {
        let turn = Turn::Selection {
            selected: Some(Team::Green),
        };
        assert_eq!(turn.team(), Some(Team::Green));
        assert_eq!(turn.advance().team(), None);
        assert_eq!(Turn::new(TurnMode::Selection).team(), None);
    }
}
