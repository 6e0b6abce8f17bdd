use crate::error::Result;
use crate::index::SearchServer;
use crate::Document;
use rayon::prelude::*;

/// Run every query in parallel against `server`; results keep the order of `queries`.
/// Fails with the first error in query order.
pub fn process_queries<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    queries.par_iter().map(|query| server.par_find_top_documents(query.as_ref())).collect()
}

/// Like [`process_queries`], flattened into one list.
pub fn process_queries_joined<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?.into_iter().flatten().collect())
}
