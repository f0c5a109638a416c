use pizza_delivery::QuestionFeed;
use tracing::{error, info};

use crate::{QuestionSource, TopicIds};

/// Fetches the questions for a game, at most once.
///
/// A failed fetch is logged and treated like an empty result, so the game
/// simply has no questions to show. The error stays available through
/// [`FeedLoader::failure()`].
pub struct FeedLoader<S> {
    source: S,
    topics: TopicIds,
    fetched: bool,
    failure: Option<String>,
}

impl<S: QuestionSource> FeedLoader<S> {
    pub fn new(source: S, topics: TopicIds) -> Self {
        Self {
            source,
            topics,
            fetched: false,
            failure: None,
        }
    }

    pub fn topics(&self) -> &TopicIds {
        &self.topics
    }

    /// Why the fetch failed, if it did.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Returns `None` in free mode and on every call after the first.
    pub fn load(&mut self) -> Option<QuestionFeed> {
        if self.fetched || self.topics.is_empty() {
            return None;
        }
        self.fetched = true;
        match self.source.fetch(&self.topics) {
            Ok(feed) => {
                info!(topics = %self.topics, num_questions = feed.len(), "Loaded questions");
                Some(feed)
            }
            Err(err) => {
                error!(topics = %self.topics, "Error loading questions: {:#}", err);
                self.failure = Some(format!("{:#}", err));
                Some(QuestionFeed::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use pizza_delivery::Question;

    use super::*;

    struct CountingSource {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl QuestionSource for CountingSource {
        fn fetch(&self, _topics: &TopicIds) -> anyhow::Result<QuestionFeed> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("service unavailable");
            }
            Ok(QuestionFeed::new(vec![Question::Open {
                question: String::from("q"),
                answer: String::from("a"),
            }]))
        }
    }

    fn loader(fail: bool, topics: TopicIds) -> (FeedLoader<CountingSource>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            calls: Arc::clone(&calls),
            fail,
        };
        (FeedLoader::new(source, topics), calls)
    }

    #[test]
    fn fetches_only_once() {
        let (mut loader, calls) = loader(false, TopicIds::new(["1"]));
        assert_eq!(loader.load().map(|f| f.len()), Some(1));
        assert_eq!(loader.failure(), None);
        assert_eq!(loader.load(), None);
        assert_eq!(loader.load(), None);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failure_gives_empty_feed() {
        let (mut loader, calls) = loader(true, TopicIds::new(["1"]));
        assert_eq!(loader.load(), Some(QuestionFeed::default()));
        assert_eq!(loader.failure(), Some("service unavailable"));
        assert_eq!(loader.load(), None);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn free_mode_never_fetches() {
        let (mut loader, calls) = loader(false, TopicIds::default());
        assert_eq!(loader.load(), None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
