use crate::types::{QueryResult, SparseVector};

/// A fitted text representation with a frozen basis.
pub trait Vectorizer: Send + Sync {
    fn dim(&self) -> usize;
    fn transform(&self, text: &str) -> SparseVector;
}

/// Anything that can answer a free-text question from a catalog.
pub trait Responder: Send + Sync {
    fn respond(&self, question: &str) -> QueryResult;
}
