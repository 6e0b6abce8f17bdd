use crate::error::Result;
use crate::index::SearchServer;
use crate::{DocId, Document, DocumentStatus};
use std::collections::VecDeque;

/// Number of most recent requests the queue keeps, one per minute of a day.
pub const REQUEST_WINDOW: usize = 1440;

/// Wraps a server and remembers which of the latest [`REQUEST_WINDOW`] searches came back empty.
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    requests: VecDeque<bool>,
    no_result_requests: usize,
}

impl<'a> RequestQueue<'a> {
    pub fn new(server: &'a SearchServer) -> Self {
        Self { server, requests: VecDeque::with_capacity(REQUEST_WINDOW), no_result_requests: 0 }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let found = self.server.find_top_documents(raw_query)?;
        self.record(&found);
        Ok(found)
    }

    pub fn add_find_request_by_status(&mut self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        let found = self.server.find_top_documents_by_status(raw_query, status)?;
        self.record(&found);
        Ok(found)
    }

    pub fn add_find_request_by<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let found = self.server.find_top_documents_by(raw_query, predicate)?;
        self.record(&found);
        Ok(found)
    }

    /// Record a result list that was produced elsewhere, e.g. by a batch run.
    pub fn record(&mut self, found: &[Document]) {
        let empty = found.is_empty();
        if self.requests.len() == REQUEST_WINDOW {
            if let Some(true) = self.requests.pop_front() {
                self.no_result_requests -= 1;
            }
        }
        self.requests.push_back(empty);
        if empty {
            self.no_result_requests += 1;
        }
    }

    pub fn no_result_requests(&self) -> usize { self.no_result_requests }
}
