use pizza_delivery::Mode;

/// Query parameters that carry topic identifiers.
const QUERY_KEYS: [&str; 3] = ["topics", "ids", "id"];

/// The topics to ask questions about. No topics means free mode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TopicIds(Vec<String>);

impl TopicIds {
    /// Blank identifiers are dropped.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            ids.into_iter()
                .map(|id| id.as_ref().trim().to_string())
                .filter(|id| !id.is_empty())
                .collect(),
        )
    }

    /// Extracts the topics from a route such as `/12`, `/12,15` or `/?topics=12,15`.
    ///
    /// A query parameter wins over the path. Otherwise the last path segment is used.
    pub fn from_route(route: &str) -> Self {
        let (path, query) = route.split_once('?').unwrap_or((route, ""));
        let from_query = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| QUERY_KEYS.contains(key))
            .map(|(_, value)| value);
        let raw = match from_query {
            Some(value) => value,
            None => path.rsplit('/').find(|s| !s.is_empty()).unwrap_or(""),
        };
        Self::new(raw.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn mode(&self) -> Mode {
        if self.is_empty() {
            Mode::Free
        } else {
            Mode::Quiz
        }
    }

    /// The identifiers as the service expects them in the URL.
    pub fn joined(&self) -> String {
        self.0.join(",")
    }
}

impl std::fmt::Display for TopicIds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.joined())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes() {
        assert_eq!(TopicIds::from_route("/12"), TopicIds::new(["12"]));
        assert_eq!(TopicIds::from_route("/12,15"), TopicIds::new(["12", "15"]));
        assert_eq!(TopicIds::from_route("/play?topics=3,4&x=1"), TopicIds::new(["3", "4"]));
        assert_eq!(TopicIds::from_route("7"), TopicIds::new(["7"]));
        assert_eq!(TopicIds::from_route("/12/"), TopicIds::new(["12"]));
    }

    #[test]
    fn no_topics_is_free_mode() {
        assert_eq!(TopicIds::from_route("/").mode(), Mode::Free);
        assert_eq!(TopicIds::from_route("").mode(), Mode::Free);
        assert_eq!(TopicIds::new([" ", ""]).mode(), Mode::Free);
        assert_eq!(TopicIds::from_route("/9").mode(), Mode::Quiz);
    }
}
