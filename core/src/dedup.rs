use crate::index::SearchServer;
use crate::DocId;
use std::collections::{BTreeSet, HashSet};

/// Remove every document whose set of words equals that of a document with a smaller id.
/// Word counts and order are ignored. Returns the removed ids in ascending order.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocId> {
    let mut seen: HashSet<BTreeSet<&str>> = HashSet::new();
    let mut duplicates = Vec::new();
    for id in server.iter() {
        let words: BTreeSet<&str> = server.word_frequencies(id).keys().map(|w| &**w).collect();
        if !seen.insert(words) {
            duplicates.push(id);
        }
    }
    drop(seen);

    for &id in &duplicates {
        tracing::info!(document_id = id, "found duplicate document");
        server.remove_document(id);
    }
    duplicates
}
