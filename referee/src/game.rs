use pizza_delivery::{GameConfig, GameState, Mode, Phase, QuestionFeed, Team, NUM_TEAMS, TEAMS};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, trace};

use crate::contestant::Contestant;
use crate::recording::{Recorder, Step};

/// How a game ended.
#[derive(Debug)]
pub struct GameResult {
    pub scores: [u32; NUM_TEAMS],
    pub winners: Vec<Team>,
    pub deliveries: u32,
    pub obstacles: usize,
}

/// Plays one game until every question has been asked.
///
/// With explicit team selection, the referee picks a random team for every
/// question.
pub fn play_game(
    rng: &mut StdRng,
    config: GameConfig,
    questions: &QuestionFeed,
    contestants: &mut [Box<dyn Contestant>; NUM_TEAMS],
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    if questions.is_empty() {
        anyhow::bail!("A game needs at least one question");
    }
    let mut state = GameState::new(config, Mode::Quiz, rng).with_questions(questions.clone());

    while state.phase() != Phase::Finished {
        if state.current_team().is_none() {
            let team = *TEAMS.choose(rng).unwrap_or(&TEAMS[0]);
            state = state.select_team(team)?;
        }
        let team = state
            .current_team()
            .ok_or_else(|| anyhow::anyhow!("No team could be selected"))?;
        let question_index = state.question_cursor();
        let contestant = &mut contestants[team.index()];

        let correct = contestant.answers_correctly(state.current_question(), rng);
        trace!(%team, question_index, correct, "Answer");
        state = state.confirm_answer(correct)?;

        let mut step = Step {
            team,
            question_index,
            correct,
            target: None,
            delivered: false,
            new_obstacle: None,
        };
        // A walled-in team can't move even after a correct answer
        if state.can_move() {
            let target = contestant.choose_move(&state, team, rng);
            let (next, outcome) = state.attempt_move(target, rng)?;
            trace!(%team, to = %outcome.to, delivered = outcome.delivered, "Move");
            step.target = Some(outcome.to);
            step.delivered = outcome.delivered;
            step.new_obstacle = outcome.new_obstacle;
            state = next;
        }
        if let Some(rec) = recorder {
            rec.store_step(step);
        }
    }

    if let Some(rec) = recorder {
        rec.write_game_recording()?;
    }

    let result = GameResult {
        scores: TEAMS.map(|t| state.score(t)),
        winners: state.winners(),
        deliveries: state.deliveries_completed(),
        obstacles: state.board().obstacles.len(),
    };
    debug!(?result, "Game over");
    Ok(result)
}
