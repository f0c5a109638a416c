use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use pizza_delivery::QuestionFeed;
use tracing::debug;

use crate::{parse_feed, TopicIds};

pub const DEFAULT_API_BASE: &str = "http://148.206.168.178/vaep/api/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Somewhere questions come from.
pub trait QuestionSource: Send {
    fn fetch(&self, topics: &TopicIds) -> anyhow::Result<QuestionFeed>;
}

impl<S: QuestionSource + ?Sized> QuestionSource for Box<S> {
    fn fetch(&self, topics: &TopicIds) -> anyhow::Result<QuestionFeed> {
        (**self).fetch(topics)
    }
}

/// The question service, queried with `GET {base}/theme/{ids}`.
pub struct HttpSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, topics: &TopicIds) -> String {
        format!("{}/theme/{}", self.base_url, topics.joined())
    }
}

impl QuestionSource for HttpSource {
    fn fetch(&self, topics: &TopicIds) -> anyhow::Result<QuestionFeed> {
        let url = self.url_for(topics);
        debug!(%url, "Fetching questions");
        let body = self
            .client
            .get(url.as_str())
            .send()?
            .error_for_status()?
            .text()?;
        parse_feed(&body).with_context(|| format!("Unexpected response from {}", url))
    }
}

/// A JSON file in the same format as the service's responses.
///
/// The file holds the questions for every topic it wants to provide, so the
/// requested topics are not used to filter.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl QuestionSource for FileSource {
    fn fetch(&self, _topics: &TopicIds) -> anyhow::Result<QuestionFeed> {
        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Could not read '{}'", self.path.display()))?;
        parse_feed(&json).with_context(|| format!("Invalid question file '{}'", self.path.display()))
    }
}
