use pizza_delivery::{Cell, GameState, Question, Team};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::Rng;

/// A scripted player, standing in for the people at the screen.
pub trait Contestant {
    fn name(&self) -> &str;

    /// Whether the team gets the question right. `None` means free mode.
    fn answers_correctly(&mut self, question: Option<&Question>, rng: &mut StdRng) -> bool;

    /// Picks one of `state.valid_moves()`, which is never empty when this is called.
    fn choose_move(&mut self, state: &GameState, team: Team, rng: &mut StdRng) -> Cell;
}

/// Which kind of [`Contestant`] plays a team.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Wanders around at random.
    Random,
    /// Heads for the closest delivery.
    Greedy,
}

impl Strategy {
    pub fn contestant(self, accuracy: f64) -> Box<dyn Contestant> {
        match self {
            Strategy::Random => Box::new(RandomContestant { accuracy }),
            Strategy::Greedy => Box::new(GreedyContestant { accuracy }),
        }
    }
}

/// Knows the answer with probability `accuracy`, or picks a random option
/// for multiple choice questions it doesn't know.
fn guess(accuracy: f64, question: Option<&Question>, rng: &mut StdRng) -> bool {
    if rng.gen_bool(accuracy.clamp(0.0, 1.0)) {
        return true;
    }
    match question {
        Some(Question::MultipleChoice {
            options,
            correct_answer,
            ..
        }) => options.iter().choose(rng) == Some(correct_answer),
        _ => false,
    }
}

pub struct RandomContestant {
    pub accuracy: f64,
}

impl Contestant for RandomContestant {
    fn name(&self) -> &str {
        "random"
    }

    fn answers_correctly(&mut self, question: Option<&Question>, rng: &mut StdRng) -> bool {
        guess(self.accuracy, question, rng)
    }

    fn choose_move(&mut self, state: &GameState, team: Team, rng: &mut StdRng) -> Cell {
        state
            .valid_moves()
            .into_iter()
            .choose(rng)
            .unwrap_or_else(|| state.position(team))
    }
}

pub struct GreedyContestant {
    pub accuracy: f64,
}

impl Contestant for GreedyContestant {
    fn name(&self) -> &str {
        "greedy"
    }

    fn answers_correctly(&mut self, question: Option<&Question>, rng: &mut StdRng) -> bool {
        guess(self.accuracy, question, rng)
    }

    /// Takes the step that ends closest to any delivery. Obstacles are ignored
    /// when measuring the distance.
    fn choose_move(&mut self, state: &GameState, team: Team, _rng: &mut StdRng) -> Cell {
        let deliveries = state.board().deliveries;
        state
            .valid_moves()
            .into_iter()
            .min_by_key(|&cell| {
                deliveries
                    .into_iter()
                    .map(|d| d.chebyshev_distance(cell))
                    .min()
                    .unwrap_or(u8::MAX)
            })
            .unwrap_or_else(|| state.position(team))
    }
}

#[cfg(test)]
mod tests {
    use pizza_delivery::{GameConfig, Mode};
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn greedy_steps_towards_a_delivery() {
        let mut rng = StdRng::seed_from_u64(3);
        let state = GameState::new(GameConfig::default(), Mode::Free, &mut rng)
            .confirm_answer(true)
            .unwrap();
        let before = nearest(&state, Cell::CENTER);
        let target = GreedyContestant { accuracy: 1.0 }.choose_move(&state, Team::Red, &mut rng);
        assert!(state.valid_moves().contains(target));
        assert_eq!(nearest(&state, target), before - 1);
    }

    fn nearest(state: &GameState, from: Cell) -> u8 {
        state
            .board()
            .deliveries
            .into_iter()
            .map(|d| d.chebyshev_distance(from))
            .min()
            .unwrap()
    }

    #[test]
    fn perfect_accuracy_is_always_right() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut contestant = RandomContestant { accuracy: 1.0 };
        assert!((0..50).all(|_| contestant.answers_correctly(None, &mut rng)));
        let mut contestant = RandomContestant { accuracy: 0.0 };
        assert!((0..50).all(|_| !contestant.answers_correctly(None, &mut rng)));
    }
}
