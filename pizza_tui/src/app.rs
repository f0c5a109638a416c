use pizza_delivery::{
    AnswerRejected, Cell, GameConfig, GameState, Mode, Phase, Question, QuestionFeed, Team,
    BOARD_SIZE, PALETTE, TEAMS,
};
use rand::rngs::StdRng;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tracing::{debug, info, warn};

/// Which part of the screen receives key presses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    Board,
    /// Team names and colors. `editing_name` is true while typing a new name.
    TeamConfig { team: Team, swatch_idx: usize, editing_name: bool },
}

/// The game plus everything the terminal UI needs to draw it.
pub struct App {
    pub state: GameState,
    rng: StdRng,
    /// The cell that Enter moves to.
    pub cursor: Cell,
    pub panel: Panel,
    /// Shown until the next key press.
    pub notice: Option<String>,
    /// Why the questions could not be loaded.
    pub load_error: Option<String>,
    pub should_quit: bool,
}

/// Keys that pick a multiple choice option, in order.
pub const OPTION_KEYS: [char; 6] = ['a', 'b', 'c', 'd', 'e', 'f'];

impl App {
    pub fn new(config: GameConfig, mode: Mode, mut rng: StdRng) -> Self {
        let state = GameState::new(config, mode, &mut rng);
        Self {
            state,
            rng,
            cursor: Cell::CENTER,
            panel: Panel::Board,
            notice: None,
            load_error: None,
            should_quit: false,
        }
    }

    pub fn questions_loaded(&mut self, feed: QuestionFeed) {
        self.state = self.state.with_questions(feed);
    }

    /// The game stays without questions, but the player learns why.
    pub fn questions_failed(&mut self, error: String) {
        warn!(%error, "No questions");
        self.state = self.state.with_questions(QuestionFeed::default());
        self.load_error = Some(error);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.notice = None;
        match self.panel {
            Panel::Board => self.handle_board_key(key.code),
            Panel::TeamConfig {
                team,
                swatch_idx,
                editing_name,
            } => {
                if editing_name {
                    self.handle_name_key(team, swatch_idx, key.code)
                } else {
                    self.handle_config_key(team, swatch_idx, key.code)
                }
            }
        }
    }

    fn handle_board_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.shift_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.shift_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.shift_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.shift_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => self.move_to_cursor(),
            KeyCode::Tab => self.open_team_config(),
            KeyCode::Char(c @ '1'..='4') => {
                let team = TEAMS[c as usize - '1' as usize];
                match self.state.select_team(team) {
                    Ok(next) => self.state = next,
                    Err(err) => debug!(%team, "Selection ignored: {}", err),
                }
            }
            KeyCode::Char('s') => self.state = self.state.reveal_answer(),
            KeyCode::Char('y') => self.confirm(true),
            KeyCode::Char('n') => self.confirm(false),
            KeyCode::Char('r') if self.state.is_finished() => {
                info!("Restarting");
                self.state = self.state.restart(&mut self.rng);
                self.cursor = Cell::CENTER;
            }
            KeyCode::Char(c) if OPTION_KEYS.contains(&c) => self.choose_option(c),
            _ => {}
        }
    }

    fn shift_cursor(&mut self, d_row: i8, d_col: i8) {
        let row = self.cursor.row.saturating_add_signed(d_row).min(BOARD_SIZE - 1);
        let col = self.cursor.col.saturating_add_signed(d_col).min(BOARD_SIZE - 1);
        self.cursor = Cell { row, col };
    }

    fn move_to_cursor(&mut self) {
        match self.state.attempt_move(self.cursor, &mut self.rng) {
            Ok((next, outcome)) => {
                info!(
                    team = %outcome.team,
                    from = %outcome.from,
                    to = %outcome.to,
                    delivered = outcome.delivered,
                    "Moved"
                );
                if let Some(obstacle) = outcome.new_obstacle {
                    info!(%obstacle, "New obstacle");
                }
                self.state = next;
            }
            Err(err) => debug!(target_cell = %self.cursor, "Move ignored: {}", err),
        }
    }

    /// Yes/no is only offered in free mode, or for an open question whose
    /// answer has been revealed.
    fn confirm(&mut self, is_correct: bool) {
        let allowed = match self.state.current_question() {
            None => self.state.mode() == Mode::Free,
            Some(Question::Open { .. }) => {
                self.state.is_answer_revealed(self.state.question_cursor())
            }
            Some(Question::MultipleChoice { .. }) => false,
        };
        if allowed {
            self.apply_answer(self.state.confirm_answer(is_correct), is_correct);
        }
    }

    fn choose_option(&mut self, key: char) {
        let Some(question) = self.state.current_question() else {
            return;
        };
        let Question::MultipleChoice { options, .. } = question else {
            return;
        };
        let idx = key as usize - 'a' as usize;
        if let Some(option) = options.get(idx).cloned() {
            let is_correct = question.is_correct_option(&option) == Some(true);
            self.apply_answer(self.state.choose_option(&option), is_correct);
        }
    }

    fn apply_answer(&mut self, result: Result<GameState, AnswerRejected>, is_correct: bool) {
        match result {
            Ok(next) => {
                debug!(can_move = next.can_move(), "Answer confirmed");
                if is_correct && !next.can_move() {
                    if let Some(team) = self.state.current_team() {
                        info!(%team, "Walled in");
                        self.notice = Some(format!(
                            "{} is walled in and can't move",
                            self.state.roster().name(team)
                        ));
                    }
                }
                self.state = next;
                if let Some(team) = self.state.current_team() {
                    if self.state.phase() == Phase::Moving {
                        self.cursor = self.state.position(team);
                    }
                }
            }
            Err(AnswerRejected::NoTeamSelected) => {
                self.notice = Some(AnswerRejected::NoTeamSelected.to_string());
            }
            Err(err) => debug!("Answer ignored: {}", err),
        }
    }

    fn open_team_config(&mut self) {
        let team = TEAMS[0];
        self.panel = Panel::TeamConfig {
            team,
            swatch_idx: self.swatch_index_of(team),
            editing_name: false,
        };
    }

    fn swatch_index_of(&self, team: Team) -> usize {
        let swatch = self.state.roster().swatch(team);
        PALETTE.iter().position(|&s| s == swatch).unwrap_or(0)
    }

    fn handle_config_key(&mut self, team: Team, swatch_idx: usize, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Tab => self.panel = Panel::Board,
            KeyCode::Up | KeyCode::Down => {
                let offset = if code == KeyCode::Up { TEAMS.len() - 1 } else { 1 };
                let team = TEAMS[(team.index() + offset) % TEAMS.len()];
                self.panel = Panel::TeamConfig {
                    team,
                    swatch_idx: self.swatch_index_of(team),
                    editing_name: false,
                };
            }
            KeyCode::Left | KeyCode::Right => {
                let offset = if code == KeyCode::Left { PALETTE.len() - 1 } else { 1 };
                self.panel = Panel::TeamConfig {
                    team,
                    swatch_idx: (swatch_idx + offset) % PALETTE.len(),
                    editing_name: false,
                };
            }
            KeyCode::Enter => match self.state.change_color(team, PALETTE[swatch_idx]) {
                Ok(next) => self.state = next,
                Err(err) => debug!(%team, "Color change ignored: {}", err),
            },
            KeyCode::Char('e') => {
                self.panel = Panel::TeamConfig {
                    team,
                    swatch_idx,
                    editing_name: true,
                }
            }
            _ => {}
        }
    }

    fn handle_name_key(&mut self, team: Team, swatch_idx: usize, code: KeyCode) {
        let mut name = self.state.roster().name(team).to_string();
        match code {
            KeyCode::Enter | KeyCode::Esc => {
                self.panel = Panel::TeamConfig {
                    team,
                    swatch_idx,
                    editing_name: false,
                };
                return;
            }
            KeyCode::Backspace => {
                name.pop();
            }
            KeyCode::Char(c) => name.push(c),
            _ => return,
        }
        self.state = self.state.rename_team(team, name);
    }
}

#[cfg(test)]
mod tests {
    use pizza_delivery::{Board, Swatch, Variant};
    use rand::SeedableRng;
    use ratatui::crossterm::event::KeyModifiers;

    use super::*;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn app(variant: Variant, mode: Mode) -> App {
        App::new(GameConfig::new(variant), mode, StdRng::seed_from_u64(42))
    }

    #[test]
    fn free_mode_answer_then_move() {
        let mut app = app(Variant::Classic, Mode::Free);
        press(&mut app, KeyCode::Char('y'));
        assert!(app.state.can_move());
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.position(Team::Red), Cell { row: 4, col: 4 });
        assert!(!app.state.can_move());
        assert_eq!(app.state.current_team(), Some(Team::Blue));
    }

    #[test]
    fn open_answer_must_be_revealed_first() {
        let mut app = app(Variant::Classic, Mode::Quiz);
        app.questions_loaded(QuestionFeed::new(vec![Question::Open {
            question: String::from("q"),
            answer: String::from("a"),
        }]));
        press(&mut app, KeyCode::Char('y'));
        assert!(!app.state.can_move());
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.state.can_move());
    }

    #[test]
    fn correct_without_selection_shows_notice() {
        let mut app = app(Variant::Obstacles, Mode::Free);
        press(&mut app, KeyCode::Char('y'));
        assert!(!app.state.can_move());
        assert_eq!(app.notice.as_deref(), Some("Select a team first"));
        press(&mut app, KeyCode::Char('3'));
        assert!(app.notice.is_none());
        press(&mut app, KeyCode::Char('y'));
        assert!(app.state.can_move());
        assert_eq!(app.state.current_team(), Some(Team::Green));
    }

    #[test]
    fn multiple_choice_by_letter() {
        let mut app = app(Variant::Classic, Mode::Quiz);
        app.questions_loaded(QuestionFeed::new(vec![Question::MultipleChoice {
            question: String::from("2 + 2?"),
            options: vec![String::from("3"), String::from("4")],
            correct_answer: String::from("4"),
        }]));
        press(&mut app, KeyCode::Char('b'));
        assert!(app.state.can_move());
    }

    #[test]
    fn restart_after_the_last_question() {
        let mut app = app(Variant::Classic, Mode::Quiz);
        app.questions_loaded(QuestionFeed::new(vec![Question::MultipleChoice {
            question: String::from("2 + 2?"),
            options: vec![String::from("3"), String::from("4")],
            correct_answer: String::from("4"),
        }]));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.state.question_cursor(), 0);

        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.position(Team::Red), Cell { row: 2, col: 3 });
        assert!(app.state.is_finished());
        let questions = app.state.questions().clone();

        press(&mut app, KeyCode::Char('r'));
        assert!(!app.state.is_finished());
        assert_eq!(app.state.question_cursor(), 0);
        assert_eq!(app.cursor, Cell::CENTER);
        assert_eq!(app.state.current_team(), Some(Team::Red));
        for team in TEAMS {
            assert_eq!(app.state.position(team), Cell::CENTER);
            assert_eq!(app.state.score(team), 0);
        }
        assert_eq!(app.state.questions(), &questions);
    }

    #[test]
    fn walled_in_team_gets_a_notice() {
        let mut app = app(Variant::Obstacles, Mode::Free);
        app.state = app.state.with_board(Board {
            deliveries: [Cell { row: 0, col: 0 }].into_iter().collect(),
            obstacles: Cell::CENTER.neighbors().collect(),
        });
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('y'));
        assert!(!app.state.can_move());
        assert_eq!(app.state.current_team(), None);
        assert_eq!(app.notice.as_deref(), Some("Team 1 is walled in and can't move"));

        // Not stuck: the next team can still be picked
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.state.current_team(), Some(Team::Blue));
    }

    #[test]
    fn failed_fetch_is_remembered() {
        let mut app = app(Variant::Classic, Mode::Quiz);
        app.questions_failed(String::from("connection refused"));
        assert_eq!(app.load_error.as_deref(), Some("connection refused"));
        assert_eq!(app.state.phase(), Phase::WaitingForQuestions);
        press(&mut app, KeyCode::Char('y'));
        assert!(!app.state.can_move());
    }

    #[test]
    fn rename_and_recolor() {
        let mut app = app(Variant::Classic, Mode::Free);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('e'));
        for _ in 0.."Team 1".len() {
            press(&mut app, KeyCode::Backspace);
        }
        type_str(&mut app, "Margherita");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.roster().name(Team::Red), "Margherita");

        // Blue is taken by the blue team
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.roster().swatch(Team::Red), Swatch::Red);
        // Purple is free
        for _ in 0..3 {
            press(&mut app, KeyCode::Right);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.roster().swatch(Team::Red), Swatch::Purple);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.panel, Panel::Board);
        assert!(!app.should_quit);
    }
}
