//! The JSON returned by the question service, and its conversion into a [`QuestionFeed`].

use pizza_delivery::{Question, QuestionFeed};
use serde::{Deserialize, Serialize};

/// The questions of a single topic, as the service sends them.
///
/// Depending on the service version, the multiple choice questions are called
/// `mcQuestions` or `multipleChoiceQuestions`. If both are present, the
/// `mcQuestions` come first. Missing lists count as empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireTopic")]
pub struct TopicQuestions {
    pub open_questions: Vec<OpenQuestion>,
    pub mc_questions: Vec<MultipleChoiceQuestion>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireTopic {
    #[serde(default)]
    open_questions: Vec<OpenQuestion>,
    #[serde(default)]
    mc_questions: Vec<MultipleChoiceQuestion>,
    #[serde(default)]
    multiple_choice_questions: Vec<MultipleChoiceQuestion>,
}

impl From<WireTopic> for TopicQuestions {
    fn from(wire: WireTopic) -> Self {
        let mut mc_questions = wire.mc_questions;
        mc_questions.extend(wire.multiple_choice_questions);
        Self {
            open_questions: wire.open_questions,
            mc_questions,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenQuestion {
    pub question: String,
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceQuestion {
    pub question: String,
    pub answers: Vec<String>,
    pub correct_answer: String,
}

/// One topic, or one entry per requested topic.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum Topics {
    Many(Vec<TopicQuestions>),
    One(TopicQuestions),
}

impl Topics {
    fn into_list(self) -> Vec<TopicQuestions> {
        match self {
            Topics::Many(list) => list,
            Topics::One(topic) => vec![topic],
        }
    }
}

/// Parses a response of the question service into its topics.
///
/// The service wraps its payload in `data`, but the bare payload is accepted
/// as well, e.g. for hand-written question files.
pub fn parse_topics(json: &str) -> anyhow::Result<Vec<TopicQuestions>> {
    let mut value: serde_json::Value = serde_json::from_str(json)?;
    let payload = match value.as_object_mut().and_then(|map| map.remove("data")) {
        Some(data) => data,
        None => value,
    };
    let topics: Topics = serde_json::from_value(payload)?;
    Ok(topics.into_list())
}

/// Flattens the topics into one feed: first every open question, then every
/// multiple choice question, each in the order they were received.
pub fn normalize(topics: &[TopicQuestions]) -> QuestionFeed {
    let open = topics.iter().flat_map(|t| &t.open_questions).map(|q| Question::Open {
        question: q.question.clone(),
        answer: q.answer.clone(),
    });
    let multiple_choice = topics
        .iter()
        .flat_map(|t| &t.mc_questions)
        .map(|q| Question::MultipleChoice {
            question: q.question.clone(),
            options: q.answers.clone(),
            correct_answer: q.correct_answer.clone(),
        });
    open.chain(multiple_choice).collect()
}

/// [`parse_topics()`] followed by [`normalize()`].
pub fn parse_feed(json: &str) -> anyhow::Result<QuestionFeed> {
    Ok(normalize(&parse_topics(json)?))
}
