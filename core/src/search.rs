//! TF-IDF ranking over the index store.
//!
//! Every entry point funnels into [`SearchServer::find_top_documents_with_policy`]; the
//! execution policy decides only whether the posting scans and the final sort run on the
//! rayon pool, never what they compute.

use crate::concurrent_map::ConcurrentMap;
use crate::error::{Result, SearchError};
use crate::execution::ExecutionPolicy;
use crate::index::SearchServer;
use crate::query::Query;
use crate::{DocId, Document, DocumentStatus};

pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;
pub const RELEVANCE_EPSILON: f64 = 1e-6;
pub const ACCUMULATOR_BUCKETS: usize = 500;

impl SearchServer {
    /// Top documents with status [`DocumentStatus::Actual`].
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.find_top_documents_by(raw_query, move |_, document_status, _| document_status == status)
    }

    pub fn find_top_documents_by<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        self.find_top_documents_with_policy(ExecutionPolicy::Sequential, raw_query, predicate)
    }

    pub fn par_find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.par_find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    /// Parallel counterpart of [`SearchServer::find_top_documents_by_status`]. Arbitrary
    /// predicates go through [`SearchServer::find_top_documents_with_policy`].
    pub fn par_find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.find_top_documents_with_policy(ExecutionPolicy::Parallel, raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Rank documents by TF-IDF relevance to `raw_query`, keeping those accepted by
    /// `predicate(id, status, rating)` and not containing any minus word. At most
    /// [`MAX_RESULT_DOCUMENT_COUNT`] documents are returned.
    pub fn find_top_documents_with_policy<P>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = self.parse_query(raw_query)?;
        let mut matched = self.find_all_documents(policy, &query, &predicate);
        sort_by_relevance(policy, &mut matched);
        matched.truncate(MAX_RESULT_DOCUMENT_COUNT);
        Ok(matched)
    }

    fn find_all_documents<P>(&self, policy: ExecutionPolicy, query: &Query<'_>, predicate: &P) -> Vec<Document>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let relevance: ConcurrentMap<DocId, f64> = ConcurrentMap::new(ACCUMULATOR_BUCKETS);

        policy.for_each(&query.plus_words, |word| {
            let Some(postings) = self.word_to_document_freqs.get(*word) else { return };
            let idf = self.inverse_document_freq(postings.len());
            policy.for_each(postings, |(&id, &tf)| {
                let Some(data) = self.documents.get(&id) else { return };
                if predicate(id, data.status, data.rating) {
                    *relevance.access(id) += tf * idf;
                }
            });
        });

        policy.for_each(&query.minus_words, |word| {
            if let Some(postings) = self.word_to_document_freqs.get(*word) {
                policy.for_each(postings, |(&id, _)| relevance.erase(id));
            }
        });

        relevance
            .build_ordinary_map()
            .into_iter()
            .filter_map(|(id, rel)| self.documents.get(&id).map(|data| Document::new(id, rel, data.rating)))
            .collect()
    }

    fn inverse_document_freq(&self, documents_with_word: usize) -> f64 {
        (self.document_count() as f64 / documents_with_word as f64).ln()
    }

    /// Plus words of `raw_query` found in document `id`, or nothing if any minus word is found.
    /// Returned words borrow from the index.
    pub fn match_document<'s>(&'s self, raw_query: &str, id: DocId) -> Result<(Vec<&'s str>, DocumentStatus)> {
        self.match_document_with_policy(ExecutionPolicy::Sequential, raw_query, id)
    }

    pub fn match_document_with_policy<'s>(
        &'s self,
        policy: ExecutionPolicy,
        raw_query: &str,
        id: DocId,
    ) -> Result<(Vec<&'s str>, DocumentStatus)> {
        let query = self.parse_query(raw_query)?;
        let status = self.documents.get(&id).ok_or(SearchError::DocumentNotFound(id))?.status;
        let row = self.word_frequencies(id);

        if policy.any(&query.minus_words, |word| row.contains_key(*word)) {
            return Ok((Vec::new(), status));
        }
        let matched = policy.filter_map(&query.plus_words, |word| row.get_key_value(*word).map(|(key, _)| &**key));
        Ok((matched, status))
    }
}

/// Descending relevance; relevances within [`RELEVANCE_EPSILON`] of a run's first document tie
/// and are ordered by descending rating. Remaining ties fall back to ascending id.
fn sort_by_relevance(policy: ExecutionPolicy, documents: &mut [Document]) {
    policy.sort_by(documents, |lhs, rhs| {
        rhs.relevance.total_cmp(&lhs.relevance).then(lhs.id.cmp(&rhs.id))
    });
    let mut start = 0;
    while start < documents.len() {
        let leader = documents[start].relevance;
        let run = documents[start..]
            .iter()
            .take_while(|doc| leader - doc.relevance < RELEVANCE_EPSILON)
            .count();
        documents[start..start + run].sort_by(|lhs, rhs| rhs.rating.cmp(&lhs.rating).then(lhs.id.cmp(&rhs.id)));
        start += run;
    }
}
