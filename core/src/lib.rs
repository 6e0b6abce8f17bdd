//! In-memory document search with TF-IDF ranking.
//!
//! ```
//! use docsearch::{DocumentStatus, SearchServer};
//!
//! let mut server = SearchServer::new("and in on").unwrap();
//! server.add_document(1, "white cat and fancy collar", DocumentStatus::Actual, &[8, -3]).unwrap();
//! server.add_document(2, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
//!
//! let found = server.find_top_documents("fluffy cat -collar").unwrap();
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].id, 2);
//! ```

pub mod concurrent_map;
pub mod dedup;
pub mod document;
pub mod error;
pub mod execution;
pub mod index;
pub mod log_duration;
pub mod paginator;
pub mod process_queries;
pub mod query;
pub mod request_queue;
pub mod search;
pub mod tokenizer;

pub use concurrent_map::{Access, BucketKey, ConcurrentMap};
pub use dedup::remove_duplicates;
pub use document::{DocId, Document, DocumentStatus};
pub use error::{Result, SearchError};
pub use execution::ExecutionPolicy;
pub use index::{SearchServer, WordFrequencies};
pub use log_duration::LogDuration;
pub use paginator::{paginate, Page, Paginator};
pub use process_queries::{process_queries, process_queries_joined};
pub use query::Query;
pub use request_queue::{RequestQueue, REQUEST_WINDOW};
pub use search::{ACCUMULATOR_BUCKETS, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
