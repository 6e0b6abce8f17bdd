use docsearch::{
    DocId, Document, DocumentStatus, ExecutionPolicy, SearchError, SearchServer, MAX_RESULT_DOCUMENT_COUNT,
    RELEVANCE_EPSILON,
};
use proptest::prelude::*;

const VOCABULARY: &[&str] = &["cat", "dog", "fluffy", "tail", "collar", "white", "fancy", "and", "in", "parrot"];

fn pets() -> SearchServer {
    let mut server = SearchServer::new("and").unwrap();
    server.add_document(1, "white cat and fancy collar", DocumentStatus::Actual, &[8, -3]).unwrap();
    server.add_document(2, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
    server
}

fn ids(found: &[Document]) -> Vec<DocId> {
    found.iter().map(|d| d.id).collect()
}

#[test]
fn fluffy_cat_ranks_first() {
    let found = pets().find_top_documents("fluffy well-groomed cat").unwrap();
    assert_eq!(ids(&found), vec![2, 1]);
    assert!(found[0].relevance > found[1].relevance);
}

#[test]
fn minus_word_hides_document() {
    let server = pets();
    assert_eq!(ids(&server.find_top_documents("cat -collar").unwrap()), vec![2]);
    assert_eq!(ids(&server.par_find_top_documents("cat -collar").unwrap()), vec![2]);
    let (words, status) = server.match_document("cat -collar", 1).unwrap();
    assert!(words.is_empty());
    assert_eq!(status, DocumentStatus::Actual);
}

#[test]
fn bad_ids_are_rejected() {
    let mut server = pets();
    let err = server.add_document(-1, "cat", DocumentStatus::Actual, &[]).unwrap_err();
    assert_eq!(err, SearchError::InvalidDocumentId(-1));
    assert!(err.is_invalid_argument());
    let err = server.add_document(1, "dog", DocumentStatus::Actual, &[]).unwrap_err();
    assert_eq!(err, SearchError::DuplicateDocumentId(1));
    assert_eq!(server.document_count(), 2);
}

#[test]
fn remove_then_readd_uses_new_content() {
    let mut server = pets();
    server.remove_document(1);
    server.remove_document(1);
    assert!(server.find_top_documents("collar").unwrap().is_empty());
    server.add_document(1, "parrot collar", DocumentStatus::Actual, &[3]).unwrap();
    let found = server.find_top_documents("collar white").unwrap();
    assert_eq!(ids(&found), vec![1]);
    assert_eq!(found[0].rating, 3);
    assert_eq!(server.match_document("white parrot", 1).unwrap().0, vec!["parrot"]);
}

#[test]
fn unknown_document_has_no_frequencies() {
    let server = pets();
    assert!(server.word_frequencies(99).is_empty());
    assert_eq!(server.iter().collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn matched_words_borrow_from_the_store() {
    let server = pets();
    let owned_query = String::from("tail cat");
    let (words, _) = server.match_document(&owned_query, 2).unwrap();
    drop(owned_query);
    assert_eq!(words, vec!["cat", "tail"]);
}

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCABULARY), 0..8).prop_map(|words| words.join(" "))
}

fn arb_status() -> impl Strategy<Value = DocumentStatus> {
    prop_oneof![
        4 => Just(DocumentStatus::Actual),
        1 => Just(DocumentStatus::Irrelevant),
        1 => Just(DocumentStatus::Banned),
        1 => Just(DocumentStatus::Removed),
    ]
}

fn arb_docs() -> impl Strategy<Value = Vec<(String, DocumentStatus, Vec<i32>)>> {
    prop::collection::vec((arb_text(), arb_status(), prop::collection::vec(-10..10i32, 0..4)), 0..30)
}

fn arb_query() -> impl Strategy<Value = String> {
    prop::collection::vec((prop::sample::select(VOCABULARY), any::<bool>()), 1..6).prop_map(|words| {
        words
            .into_iter()
            .map(|(w, minus)| if minus { format!("-{w}") } else { w.to_string() })
            .collect::<Vec<_>>()
            .join(" ")
    })
}

fn build(docs: &[(String, DocumentStatus, Vec<i32>)]) -> SearchServer {
    let mut server = SearchServer::new("and in").unwrap();
    for (id, (text, status, ratings)) in (0..).zip(docs) {
        server.add_document(id, text, *status, ratings).unwrap();
    }
    server
}

proptest! {
    #[test]
    fn results_are_capped_and_ordered(docs in arb_docs(), query in arb_query()) {
        let server = build(&docs);
        let found = server.find_top_documents(&query).unwrap();
        prop_assert!(found.len() <= MAX_RESULT_DOCUMENT_COUNT);
        // Each run holds the documents within epsilon of its first one, ordered by rating.
        let mut start = 0;
        while start < found.len() {
            let leader = found[start].relevance;
            let run: Vec<&Document> =
                found[start..].iter().take_while(|d| leader - d.relevance < RELEVANCE_EPSILON).collect();
            prop_assert!(run.windows(2).all(|pair| pair[0].rating >= pair[1].rating));
            if let Some(next) = found.get(start + run.len()) {
                prop_assert!(run.iter().all(|d| d.relevance > next.relevance));
            }
            start += run.len();
        }
    }

    #[test]
    fn sequential_and_parallel_agree(docs in arb_docs(), query in arb_query()) {
        let server = build(&docs);
        let seq = server
            .find_top_documents_with_policy(ExecutionPolicy::Sequential, &query, |_, _, rating| rating >= 0)
            .unwrap();
        let par = server
            .find_top_documents_with_policy(ExecutionPolicy::Parallel, &query, |_, _, rating| rating >= 0)
            .unwrap();
        prop_assert_eq!(seq.len(), par.len());
        for (s, p) in seq.iter().zip(&par) {
            prop_assert_eq!(s.id, p.id);
            prop_assert_eq!(s.rating, p.rating);
            prop_assert!((s.relevance - p.relevance).abs() < 1e-9);
        }
        for id in server.iter() {
            let seq_match = server.match_document_with_policy(ExecutionPolicy::Sequential, &query, id).unwrap();
            let par_match = server.match_document_with_policy(ExecutionPolicy::Parallel, &query, id).unwrap();
            prop_assert_eq!(seq_match, par_match);
        }
    }

    #[test]
    fn minus_words_always_exclude(docs in arb_docs(), query in arb_query()) {
        let server = build(&docs);
        let parsed = server.parse_query(&query).unwrap();
        let found = server.find_top_documents_by(&query, |_, _, _| true).unwrap();
        for doc in &found {
            let freqs = server.word_frequencies(doc.id);
            prop_assert!(parsed.minus_words.iter().all(|w| !freqs.contains_key(*w)));
        }
        for id in server.iter() {
            let freqs = server.word_frequencies(id);
            if parsed.minus_words.iter().any(|w| freqs.contains_key(*w)) {
                prop_assert!(server.match_document(&query, id).unwrap().0.is_empty());
            }
        }
    }
}
