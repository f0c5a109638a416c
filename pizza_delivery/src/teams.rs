use serde::{Deserialize, Serialize};

use crate::ColorTaken;

/// The teams, in turn order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Team {
    Red,
    Blue,
    Green,
    Yellow,
}

pub const NUM_TEAMS: usize = 4;

pub const TEAMS: [Team; NUM_TEAMS] = [Team::Red, Team::Blue, Team::Green, Team::Yellow];

impl Team {
    pub fn index(self) -> usize {
        self as usize
    }

    /// The team that plays after this one in the rotation.
    pub fn next(self) -> Team {
        TEAMS[(self.index() + 1) % NUM_TEAMS]
    }

    pub fn default_name(self) -> String {
        format!("Team {}", self.index() + 1)
    }

    pub fn default_swatch(self) -> Swatch {
        match self {
            Team::Red => Swatch::Red,
            Team::Blue => Swatch::Blue,
            Team::Green => Swatch::Green,
            Team::Yellow => Swatch::Yellow,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Team::Red => "red",
            Team::Blue => "blue",
            Team::Green => "green",
            Team::Yellow => "yellow",
        };
        f.write_str(s)
    }
}

/// A color from the fixed palette that teams can pick from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Swatch {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
    Pink,
    Brown,
    GreenYellow,
    MediumTurquoise,
}

pub const PALETTE: [Swatch; 10] = [
    Swatch::Red,
    Swatch::Blue,
    Swatch::Green,
    Swatch::Yellow,
    Swatch::Purple,
    Swatch::Orange,
    Swatch::Pink,
    Swatch::Brown,
    Swatch::GreenYellow,
    Swatch::MediumTurquoise,
];

impl Swatch {
    /// The CSS name or hex code of the color.
    pub fn css(self) -> &'static str {
        match self {
            Swatch::Red => "red",
            Swatch::Blue => "blue",
            Swatch::Green => "green",
            Swatch::Yellow => "yellow",
            Swatch::Purple => "purple",
            Swatch::Orange => "orange",
            Swatch::Pink => "pink",
            Swatch::Brown => "brown",
            Swatch::GreenYellow => "#ADFF2F",
            Swatch::MediumTurquoise => "#48D1CC",
        }
    }

    /// The color as RGB, as CSS defines its named colors.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Swatch::Red => (0xff, 0x00, 0x00),
            Swatch::Blue => (0x00, 0x00, 0xff),
            Swatch::Green => (0x00, 0x80, 0x00),
            Swatch::Yellow => (0xff, 0xff, 0x00),
            Swatch::Purple => (0x80, 0x00, 0x80),
            Swatch::Orange => (0xff, 0xa5, 0x00),
            Swatch::Pink => (0xff, 0xc0, 0xcb),
            Swatch::Brown => (0xa5, 0x2a, 0x2a),
            Swatch::GreenYellow => (0xad, 0xff, 0x2f),
            Swatch::MediumTurquoise => (0x48, 0xd1, 0xcc),
        }
    }
}

/// Display names and colors of the teams.
///
/// No two teams ever share a color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamRoster {
    names: [String; NUM_TEAMS],
    swatches: [Swatch; NUM_TEAMS],
}

impl Default for TeamRoster {
    fn default() -> Self {
        Self {
            names: TEAMS.map(Team::default_name),
            swatches: TEAMS.map(Team::default_swatch),
        }
    }
}

impl TeamRoster {
    pub fn name(&self, team: Team) -> &str {
        &self.names[team.index()]
    }

    pub fn swatch(&self, team: Team) -> Swatch {
        self.swatches[team.index()]
    }

    /// The team currently using this color, if any.
    pub fn owner_of(&self, swatch: Swatch) -> Option<Team> {
        TEAMS.into_iter().find(|&t| self.swatch(t) == swatch)
    }

    pub fn rename(&mut self, team: Team, name: impl Into<String>) {
        self.names[team.index()] = name.into();
    }

    /// Fails if another team already uses the color. Picking the team's own
    /// color again is fine.
    pub fn set_swatch(&mut self, team: Team, swatch: Swatch) -> Result<(), ColorTaken> {
        match self.owner_of(swatch) {
            Some(owner) if owner != team => Err(ColorTaken { swatch, owner }),
            _ => {
                self.swatches[team.index()] = swatch;
                Ok(())
            }
        }
    }
}
