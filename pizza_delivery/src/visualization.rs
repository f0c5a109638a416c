use crate::{Cell, GameState, Team, BOARD_SIZE};

/// Draws the board as text.
///
/// Pizzas are deliveries, `#` are obstacles and the letters `R`, `B`, `G`, `Y` are
/// teams. A cell with more than one team shows the number of teams instead.
pub fn visualize_board(state: &GameState) -> String {
    let mut result = String::from("   ");
    for col in 0..BOARD_SIZE {
        result += &format!(" {}", col);
    }
    result += "\n  ╭";
    for _ in 0..BOARD_SIZE {
        result += "──";
    }
    result += "─╮\n";

    for row in 0..BOARD_SIZE {
        result += &format!("{:>2}│", row);
        for col in 0..BOARD_SIZE {
            let cell = Cell { row, col };
            result += " ";
            result += &cell_symbol(state, cell);
        }
        result += " │\n";
    }

    result += "  ╰";
    for _ in 0..BOARD_SIZE {
        result += "──";
    }
    result += "─╯";
    result
}

fn cell_symbol(state: &GameState, cell: Cell) -> String {
    let teams: Vec<Team> = state.teams_at(cell).collect();
    match teams.as_slice() {
        [] if state.board().is_obstacle(cell) => String::from("#"),
        [] if state.board().is_delivery(cell) => String::from("🍕"),
        [] => String::from("·"),
        [team] => team_letter(*team).to_string(),
        many => many.len().to_string(),
    }
}

fn team_letter(team: Team) -> char {
    match team {
        Team::Red => 'R',
        Team::Blue => 'B',
        Team::Green => 'G',
        Team::Yellow => 'Y',
    }
}
