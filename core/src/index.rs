use crate::error::{Result, SearchError};
use crate::execution::ExecutionPolicy;
use crate::tokenizer::{is_valid_word, split_into_words};
use crate::{DocId, DocumentStatus};
use rayon::prelude::*;
use std::collections::{btree_set, BTreeMap, BTreeSet};
use std::iter::Copied;
use std::sync::Arc;

/// Word -> term frequency row of one document.
pub type WordFrequencies = BTreeMap<Arc<str>, f64>;

static EMPTY_FREQUENCIES: WordFrequencies = BTreeMap::new();

#[derive(Debug, Clone, Copy)]
pub(crate) struct DocumentData {
    pub rating: i32,
    pub status: DocumentStatus,
}

/// In-memory document store with a word -> document inverted index and a document -> word
/// forward index. Both indexes hold the same (word, id, tf) triples at all times, and each
/// distinct word is allocated once and shared between them.
///
/// Reads take `&self` and may run concurrently; `add_document` and `remove_document` take
/// `&mut self`.
#[derive(Debug, Default)]
pub struct SearchServer {
    stop_words: BTreeSet<String>,
    pub(crate) word_to_document_freqs: BTreeMap<Arc<str>, BTreeMap<DocId, f64>>,
    pub(crate) document_to_word_freqs: BTreeMap<DocId, WordFrequencies>,
    pub(crate) documents: BTreeMap<DocId, DocumentData>,
    document_ids: BTreeSet<DocId>,
}

impl SearchServer {
    /// Build a server from space separated stop words.
    pub fn new(stop_words_text: &str) -> Result<Self> {
        Self::from_stop_words(split_into_words(stop_words_text))
    }

    pub fn from_stop_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stop_words = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() { continue; }
            if !is_valid_word(word) {
                return Err(SearchError::InvalidStopWord(word.to_string()));
            }
            stop_words.insert(word.to_string());
        }
        Ok(Self { stop_words, ..Self::default() })
    }

    pub fn stop_words(&self) -> &BTreeSet<String> { &self.stop_words }

    pub(crate) fn is_stop_word(&self, word: &str) -> bool { self.stop_words.contains(word) }

    fn split_into_words_no_stop<'t>(&self, text: &'t str) -> Result<Vec<&'t str>> {
        let mut words = Vec::new();
        for word in split_into_words(text) {
            if !is_valid_word(word) {
                return Err(SearchError::InvalidWord(word.to_string()));
            }
            if !self.is_stop_word(word) {
                words.push(word);
            }
        }
        Ok(words)
    }

    fn compute_average_rating(ratings: &[i32]) -> i32 {
        if ratings.is_empty() {
            return 0;
        }
        let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
        (sum / ratings.len() as i64) as i32
    }

    /// Index a document. Nothing is modified when an error is returned.
    pub fn add_document(&mut self, id: DocId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        if id < 0 {
            return Err(SearchError::InvalidDocumentId(id));
        }
        if self.document_ids.contains(&id) {
            return Err(SearchError::DuplicateDocumentId(id));
        }
        let words = self.split_into_words_no_stop(text)?;

        let inv_word_count = 1.0 / words.len() as f64;
        let mut row = WordFrequencies::new();
        for &word in &words {
            let key = match self.word_to_document_freqs.get_key_value(word) {
                Some((key, _)) => Arc::clone(key),
                None => Arc::from(word),
            };
            *self.word_to_document_freqs.entry(Arc::clone(&key)).or_default().entry(id).or_insert(0.0) += inv_word_count;
            *row.entry(key).or_insert(0.0) += inv_word_count;
        }
        self.document_to_word_freqs.insert(id, row);
        self.documents.insert(id, DocumentData { rating: Self::compute_average_rating(ratings), status });
        self.document_ids.insert(id);

        tracing::debug!(document_id = id, words = words.len(), ?status, "document added");
        Ok(())
    }

    /// Remove a document from both indexes. Unknown ids are ignored.
    pub fn remove_document(&mut self, id: DocId) {
        self.remove_document_with_policy(ExecutionPolicy::Sequential, id)
    }

    pub fn remove_document_with_policy(&mut self, policy: ExecutionPolicy, id: DocId) {
        if !self.document_ids.remove(&id) {
            return;
        }
        self.documents.remove(&id);
        let row = self.document_to_word_freqs.remove(&id).unwrap_or_default();

        match policy {
            ExecutionPolicy::Sequential => {
                for word in row.keys() {
                    if let Some(postings) = self.word_to_document_freqs.get_mut(word) {
                        postings.remove(&id);
                    }
                }
            }
            ExecutionPolicy::Parallel => {
                let mut touched: Vec<(Arc<str>, BTreeMap<DocId, f64>)> =
                    row.keys().filter_map(|word| self.word_to_document_freqs.remove_entry(word)).collect();
                touched.par_iter_mut().for_each(|(_, postings)| {
                    postings.remove(&id);
                });
                self.word_to_document_freqs.extend(touched.into_iter().filter(|(_, postings)| !postings.is_empty()));
            }
        }
        for word in row.keys() {
            if self.word_to_document_freqs.get(word).is_some_and(BTreeMap::is_empty) {
                self.word_to_document_freqs.remove(word);
            }
        }

        tracing::debug!(document_id = id, words = row.len(), ?policy, "document removed");
    }

    /// Term frequencies of a document; empty for unknown ids.
    pub fn word_frequencies(&self, id: DocId) -> &WordFrequencies {
        self.document_to_word_freqs.get(&id).unwrap_or(&EMPTY_FREQUENCIES)
    }

    pub fn document_count(&self) -> usize { self.documents.len() }

    /// Live document ids in ascending order.
    pub fn iter(&self) -> Copied<btree_set::Iter<'_, DocId>> { self.document_ids.iter().copied() }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocId;
    type IntoIter = Copied<btree_set::Iter<'a, DocId>>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}
