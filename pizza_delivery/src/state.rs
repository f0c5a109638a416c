use std::collections::BTreeSet;

use rand::Rng;

use crate::{
    generate_deliveries, generate_obstacle, AnswerRejected, Board, Cell, CellSet, ColorTaken,
    GameConfig, IllegalMove, Mode, Question, QuestionFeed, SelectionRejected, Swatch, Team,
    TeamRoster, Turn, NUM_TEAMS, TEAMS,
};

/// Position and score of one team.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TeamState {
    pub position: Cell,
    pub score: u32,
}

impl Default for TeamState {
    fn default() -> Self {
        Self {
            position: Cell::CENTER,
            score: 0,
        }
    }
}

/// What the game is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Quiz mode, but the questions have not arrived (or failed to).
    WaitingForQuestions,
    /// A question has to be answered, possibly after selecting a team.
    Answering,
    /// The acting team answered correctly and may move.
    Moving,
    /// Every question has been asked.
    Finished,
}

/// Summarizes an accepted move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub team: Team,
    pub from: Cell,
    pub to: Cell,
    /// The team reached a delivery and scored a point.
    pub delivered: bool,
    pub new_obstacle: Option<Cell>,
}

/// A complete snapshot of a game.
///
/// Every operation leaves `self` untouched and returns the next snapshot, or
/// an error if the operation is not allowed right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    config: GameConfig,
    mode: Mode,
    questions: QuestionFeed,
    teams: [TeamState; NUM_TEAMS],
    roster: TeamRoster,
    board: Board,
    turn: Turn,
    can_move: bool,
    question_cursor: usize,
    /// Indices of the open questions whose answer has been shown.
    revealed: BTreeSet<usize>,
    deliveries_completed: u32,
}

impl GameState {
    /// All teams in the center with zero points, default names and colors.
    ///
    /// In quiz mode, the questions are supplied later with [`Self::with_questions()`].
    pub fn new<R: Rng + ?Sized>(config: GameConfig, mode: Mode, rng: &mut R) -> Self {
        let teams = [TeamState::default(); NUM_TEAMS];
        let board = Board::new(
            rng,
            config.delivery_target_count,
            positions_of(&teams),
        );
        Self {
            config,
            mode,
            questions: QuestionFeed::default(),
            teams,
            roster: TeamRoster::default(),
            board,
            turn: Turn::new(config.turn_mode),
            can_move: false,
            question_cursor: 0,
            revealed: BTreeSet::new(),
            deliveries_completed: 0,
        }
    }

    /// Continues on a given board instead of the generated one. The caller keeps
    /// the deliveries off the teams and obstacles.
    #[must_use]
    pub fn with_board(&self, board: Board) -> Self {
        Self {
            board,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_questions(&self, questions: QuestionFeed) -> Self {
        Self {
            questions,
            ..self.clone()
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn questions(&self) -> &QuestionFeed {
        &self.questions
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn roster(&self) -> &TeamRoster {
        &self.roster
    }

    pub fn team(&self, team: Team) -> TeamState {
        self.teams[team.index()]
    }

    pub fn position(&self, team: Team) -> Cell {
        self.teams[team.index()].position
    }

    pub fn score(&self, team: Team) -> u32 {
        self.teams[team.index()].score
    }

    /// The cells occupied by at least one team.
    pub fn team_positions(&self) -> CellSet {
        positions_of(&self.teams)
    }

    /// The teams standing on `cell`, in turn order.
    pub fn teams_at(&self, cell: Cell) -> impl Iterator<Item = Team> + '_ {
        TEAMS.into_iter().filter(move |&t| self.position(t) == cell)
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// The team that answers and moves, if one has been determined.
    pub fn current_team(&self) -> Option<Team> {
        self.turn.team()
    }

    pub fn can_move(&self) -> bool {
        self.can_move
    }

    pub fn question_cursor(&self) -> usize {
        self.question_cursor
    }

    pub fn deliveries_completed(&self) -> u32 {
        self.deliveries_completed
    }

    /// The question to answer now. Always `None` in free mode.
    pub fn current_question(&self) -> Option<&Question> {
        match self.mode {
            Mode::Free => None,
            Mode::Quiz => self.questions.get(self.question_cursor),
        }
    }

    pub fn is_answer_revealed(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }

    /// Free mode never ends.
    pub fn is_finished(&self) -> bool {
        self.mode == Mode::Quiz && self.questions.is_exhausted(self.question_cursor)
    }

    pub fn phase(&self) -> Phase {
        if self.is_finished() {
            Phase::Finished
        } else if self.can_move {
            Phase::Moving
        } else if self.mode == Mode::Quiz && self.current_question().is_none() {
            Phase::WaitingForQuestions
        } else {
            Phase::Answering
        }
    }

    /// Shows the answer of the current open question. Does nothing otherwise.
    #[must_use]
    pub fn reveal_answer(&self) -> Self {
        match self.current_question() {
            Some(q) if q.is_open() => {
                let mut next = self.clone();
                next.revealed.insert(self.question_cursor);
                next
            }
            _ => self.clone(),
        }
    }

    /// Picks the team that answers the next question.
    pub fn select_team(&self, team: Team) -> Result<Self, SelectionRejected> {
        if self.is_finished() {
            return Err(SelectionRejected::GameOver);
        }
        if self.can_move {
            return Err(SelectionRejected::MovePending);
        }
        match self.turn {
            Turn::Rotation { .. } => Err(SelectionRejected::RotationMode),
            Turn::Selection { .. } => Ok(Self {
                turn: Turn::Selection {
                    selected: Some(team),
                },
                ..self.clone()
            }),
        }
    }

    /// A correct answer lets the acting team move. A wrong answer moves on to
    /// the next question and the next turn.
    ///
    /// A team walled in by obstacles has nowhere to go, so its correct answer
    /// is treated like a wrong one.
    pub fn confirm_answer(&self, is_correct: bool) -> Result<Self, AnswerRejected> {
        if self.is_finished() {
            return Err(AnswerRejected::GameOver);
        }
        if self.can_move {
            return Err(AnswerRejected::MovePending);
        }
        if self.mode == Mode::Quiz && self.current_question().is_none() {
            return Err(AnswerRejected::NoQuestion);
        }
        if is_correct {
            let team = self.current_team().ok_or(AnswerRejected::NoTeamSelected)?;
            if self.has_moves(team) {
                return Ok(Self {
                    can_move: true,
                    ..self.clone()
                });
            }
        }
        Ok(Self {
            turn: self.turn.advance(),
            question_cursor: self.question_cursor + 1,
            ..self.clone()
        })
    }

    /// Answers the current multiple choice question with one of its options.
    pub fn choose_option(&self, selected: &str) -> Result<Self, AnswerRejected> {
        if self.is_finished() {
            return Err(AnswerRejected::GameOver);
        }
        let question = self.current_question().ok_or(AnswerRejected::NoQuestion)?;
        match question {
            Question::MultipleChoice { options, .. } if options.iter().any(|o| o == selected) => {
                let is_correct = question.is_correct_option(selected) == Some(true);
                self.confirm_answer(is_correct)
            }
            _ => Err(AnswerRejected::NotAnOption),
        }
    }

    /// The cells that [`Self::attempt_move()`] would accept right now.
    pub fn valid_moves(&self) -> CellSet {
        match self.current_team() {
            Some(team) if self.can_move => self
                .position(team)
                .neighbors()
                .filter(|&c| !self.board.is_obstacle(c))
                .collect(),
            _ => CellSet::new(),
        }
    }

    /// Whether `team` has anywhere to go. A team can get walled in by obstacles
    /// and the edge of the board.
    pub fn has_moves(&self, team: Team) -> bool {
        self.position(team)
            .neighbors()
            .any(|c| !self.board.is_obstacle(c))
    }

    /// Moves the acting team one step.
    ///
    /// Reaching a delivery scores a point and puts a new delivery on the board,
    /// and with obstacles enabled, every few deliveries add an obstacle.
    /// Either way, the next question and the next turn follow.
    pub fn attempt_move<R: Rng + ?Sized>(
        &self,
        target: Cell,
        rng: &mut R,
    ) -> Result<(Self, MoveOutcome), IllegalMove> {
        if !self.can_move {
            return Err(IllegalMove::NotPermitted);
        }
        let team = self.current_team().ok_or(IllegalMove::NoActingTeam)?;
        if !target.is_in_bounds() {
            return Err(IllegalMove::OutOfBounds { target });
        }
        let from = self.position(team);
        if !from.is_adjacent(target) {
            return Err(IllegalMove::NotAdjacent { from, target });
        }
        if self.board.is_obstacle(target) {
            return Err(IllegalMove::Obstacle { target });
        }

        let mut next = self.clone();
        next.teams[team.index()].position = target;

        let delivered = self.board.is_delivery(target);
        let mut new_obstacle = None;
        if delivered {
            next.teams[team.index()].score += 1;
            next.deliveries_completed += 1;
            let positions = next.team_positions();
            next.board.deliveries = generate_deliveries(
                rng,
                self.config.delivery_target_count,
                next.board.deliveries.remove(target),
                next.board.obstacles,
                positions,
            );
            if self.config.obstacles
                && self.config.obstacle_interval > 0
                && next.deliveries_completed % self.config.obstacle_interval == 0
            {
                new_obstacle = generate_obstacle(
                    rng,
                    next.board.deliveries,
                    next.board.obstacles,
                    positions,
                    self.config.delivery_target_count,
                );
                if let Some(cell) = new_obstacle {
                    next.board.obstacles = next.board.obstacles.insert(cell);
                }
            }
        }

        next.can_move = false;
        next.turn = self.turn.advance();
        next.question_cursor += 1;

        let outcome = MoveOutcome {
            team,
            from,
            to: target,
            delivered,
            new_obstacle,
        };
        Ok((next, outcome))
    }

    #[must_use]
    pub fn rename_team(&self, team: Team, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.roster.rename(team, name);
        next
    }

    pub fn change_color(&self, team: Team, swatch: Swatch) -> Result<Self, ColorTaken> {
        let mut next = self.clone();
        next.roster.set_swatch(team, swatch)?;
        Ok(next)
    }

    /// Starts over with the same questions, names and colors.
    #[must_use]
    pub fn restart<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let fresh = Self::new(self.config, self.mode, rng);
        Self {
            questions: self.questions.clone(),
            roster: self.roster.clone(),
            ..fresh
        }
    }

    /// Every team with the highest score.
    pub fn winners(&self) -> Vec<Team> {
        let max_score = self.teams.iter().map(|t| t.score).max().unwrap_or(0);
        TEAMS
            .into_iter()
            .filter(|&t| self.score(t) == max_score)
            .collect()
    }
}

fn positions_of(teams: &[TeamState; NUM_TEAMS]) -> CellSet {
    teams.iter().map(|t| t.position).collect()
}
