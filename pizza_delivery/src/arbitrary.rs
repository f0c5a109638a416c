use quickcheck::{Arbitrary, Gen};

use crate::{Cell, CellSet, Mode, Swatch, Team, Variant, BOARD_SIZE, PALETTE, TEAMS};

impl Arbitrary for Cell {
    fn arbitrary(g: &mut Gen) -> Self {
        Cell {
            row: u8::arbitrary(g) % BOARD_SIZE,
            col: u8::arbitrary(g) % BOARD_SIZE,
        }
    }
}

impl Arbitrary for Team {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&TEAMS).unwrap()
    }
}

impl Arbitrary for Swatch {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&PALETTE).unwrap()
    }
}

/// A board in the middle of a game, with enough free cells left for five deliveries.
#[derive(Clone, Debug)]
pub struct BoardScenario {
    pub seed: u64,
    pub team_positions: CellSet,
    /// At most five, not on the center, a team or an obstacle.
    pub deliveries: CellSet,
    /// At most twenty, not on the center or a team.
    pub obstacles: CellSet,
}

fn arbitrary_cells(g: &mut Gen, max: usize, exclude: CellSet) -> CellSet {
    let wanted = usize::arbitrary(g) % (max + 1);
    let mut set = CellSet::new();
    for _ in 0..wanted {
        let cell = Cell::arbitrary(g);
        if !exclude.contains(cell) {
            set = set.insert(cell);
        }
    }
    set
}

impl Arbitrary for BoardScenario {
    fn arbitrary(g: &mut Gen) -> Self {
        let center = CellSet::new().insert(Cell::CENTER);
        let team_positions: CellSet = (0..TEAMS.len()).map(|_| Cell::arbitrary(g)).collect();
        let obstacles = arbitrary_cells(g, 20, center | team_positions);
        let deliveries = arbitrary_cells(g, 5, center | team_positions | obstacles);
        BoardScenario {
            seed: u64::arbitrary(g),
            team_positions,
            deliveries,
            obstacles,
        }
    }
}

/// Something a player does during a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Select(Team),
    Answer(bool),
    Move(Cell),
    Reveal,
    Restart,
}

impl Arbitrary for Action {
    fn arbitrary(g: &mut Gen) -> Self {
        // Moves and answers are the interesting part, so they come up more often.
        match u8::arbitrary(g) % 16 {
            0..=2 => Action::Select(Team::arbitrary(g)),
            3..=6 => Action::Answer(bool::arbitrary(g)),
            7..=13 => Action::Move(Cell::arbitrary(g)),
            14 => Action::Reveal,
            _ => Action::Restart,
        }
    }
}

/// A whole game played by random actions.
#[derive(Clone, Debug)]
pub struct Script {
    pub seed: u64,
    pub variant: Variant,
    pub mode: Mode,
    pub num_questions: usize,
    pub actions: Vec<Action>,
}

impl Arbitrary for Script {
    fn arbitrary(g: &mut Gen) -> Self {
        Script {
            seed: u64::arbitrary(g),
            variant: *g.choose(&[Variant::Classic, Variant::Obstacles]).unwrap(),
            mode: *g.choose(&[Mode::Free, Mode::Quiz]).unwrap(),
            num_questions: usize::arbitrary(g) % 40,
            actions: Vec::arbitrary(g),
        }
    }
}
