use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A single quiz question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Question {
    /// Answered out loud. The answer is hidden until someone reveals it, and the
    /// players then judge for themselves whether they were right.
    Open { question: String, answer: String },
    /// One of `options` is equal to `correct_answer`.
    MultipleChoice {
        question: String,
        options: Vec<String>,
        correct_answer: String,
    },
}

impl Question {
    pub fn text(&self) -> &str {
        match self {
            Question::Open { question, .. } | Question::MultipleChoice { question, .. } => question,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Question::Open { .. })
    }

    /// Whether `selected` is the right option. `None` for open questions.
    pub fn is_correct_option(&self, selected: &str) -> Option<bool> {
        match self {
            Question::Open { .. } => None,
            Question::MultipleChoice { correct_answer, .. } => Some(selected == correct_answer),
        }
    }
}

/// The ordered list of questions for one game.
///
/// Cheap to clone, so it can be part of every game state snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionFeed {
    questions: Arc<[Question]>,
}

impl Default for QuestionFeed {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl QuestionFeed {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions: questions.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// True once every question has been asked. An empty feed is never exhausted,
    /// since it may simply not have arrived yet.
    pub fn is_exhausted(&self, cursor: usize) -> bool {
        !self.is_empty() && cursor >= self.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

impl FromIterator<Question> for QuestionFeed {
    fn from_iter<T: IntoIterator<Item = Question>>(iter: T) -> Self {
        Self {
            questions: iter.into_iter().collect(),
        }
    }
}
