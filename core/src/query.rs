use crate::error::{Result, SearchError};
use crate::index::SearchServer;
use crate::tokenizer::{is_valid_word, split_into_words};

/// Parsed query. Words borrow from the raw query text; both lists are sorted and deduplicated.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query<'q> {
    pub plus_words: Vec<&'q str>,
    pub minus_words: Vec<&'q str>,
}

struct QueryWord<'q> {
    data: &'q str,
    is_minus: bool,
    is_stop: bool,
}

impl SearchServer {
    fn parse_query_word<'q>(&self, token: &'q str) -> Result<QueryWord<'q>> {
        let (data, is_minus) = match token.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (token, false),
        };
        if data.is_empty() || data.starts_with('-') || !is_valid_word(data) {
            return Err(SearchError::InvalidQueryWord(token.to_string()));
        }
        Ok(QueryWord { data, is_minus, is_stop: self.is_stop_word(data) })
    }

    /// Parse raw query text into plus and minus words, dropping stop words.
    pub fn parse_query<'q>(&self, text: &'q str) -> Result<Query<'q>> {
        let mut query = Query::default();
        for token in split_into_words(text) {
            let word = self.parse_query_word(token)?;
            if word.is_stop {
                continue;
            }
            if word.is_minus {
                query.minus_words.push(word.data);
            } else {
                query.plus_words.push(word.data);
            }
        }
        query.plus_words.sort_unstable();
        query.plus_words.dedup();
        query.minus_words.sort_unstable();
        query.minus_words.dedup();

        tracing::trace!(plus = ?query.plus_words, minus = ?query.minus_words, "query parsed");
        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> SearchServer {
        SearchServer::new("in the").unwrap()
    }

    #[test]
    fn splits_plus_and_minus() {
        let server = server();
        let query = server.parse_query("cat -collar fluffy cat -collar").unwrap();
        assert_eq!(query.plus_words, vec!["cat", "fluffy"]);
        assert_eq!(query.minus_words, vec!["collar"]);
    }

    #[test]
    fn stop_words_are_dropped_on_both_sides() {
        let server = server();
        let query = server.parse_query("cat in -the").unwrap();
        assert_eq!(query.plus_words, vec!["cat"]);
        assert!(query.minus_words.is_empty());
    }

    #[test]
    fn same_word_may_be_plus_and_minus() {
        let query = server().parse_query("cat -cat").unwrap();
        assert_eq!(query.plus_words, vec!["cat"]);
        assert_eq!(query.minus_words, vec!["cat"]);
    }

    #[test]
    fn malformed_minus_words_fail() {
        let server = server();
        for raw in ["cat -", "--cat", "cat -\u{1}x", "ca\u{1f}t"] {
            assert!(
                matches!(server.parse_query(raw), Err(SearchError::InvalidQueryWord(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn inner_hyphen_is_fine() {
        let query = server().parse_query("well-groomed -semi-wild").unwrap();
        assert_eq!(query.plus_words, vec!["well-groomed"]);
        assert_eq!(query.minus_words, vec!["semi-wild"]);
    }

    #[test]
    fn empty_query_is_empty() {
        assert_eq!(server().parse_query("   ").unwrap(), Query::default());
    }
}
