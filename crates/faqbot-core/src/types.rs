//! Domain types shared by the vectorizer, matcher and front-ends.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One known question with its canned answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub question: String,
    pub answer: String,
}

impl CatalogEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self { question: question.into(), answer: answer.into() }
    }
}

/// Ordered, non-empty, immutable set of FAQ entries.
///
/// Position is the entry's identity: it drives the tie-break when two
/// questions score the same, and the order topics are listed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    pub(crate) entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize { self.entries.len() }

    /// Always false for a constructed catalog.
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> { self.entries.get(index) }

    pub fn entries(&self) -> &[CatalogEntry] { &self.entries }

    pub fn questions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.question.as_str())
    }
}

/// Outcome of a single query.
///
/// `answer` and `matched_question` are both `Some` exactly when
/// `confidence` cleared the threshold the query ran with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub answer: Option<String>,
    pub confidence: f32,
    pub matched_question: Option<String>,
}

impl QueryResult {
    pub fn matched(entry: &CatalogEntry, confidence: f32) -> Self {
        Self {
            answer: Some(entry.answer.clone()),
            confidence,
            matched_question: Some(entry.question.clone()),
        }
    }

    pub fn no_match(confidence: f32) -> Self {
        Self { answer: None, confidence, matched_question: None }
    }

    pub fn is_match(&self) -> bool { self.answer.is_some() }
}

/// Sparse weight vector: `(index, weight)` pairs kept sorted by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f32)>,
}

impl SparseVector {
    /// Builds a vector from unordered pairs; duplicate indices are summed and
    /// zero weights dropped.
    pub fn from_pairs(mut pairs: Vec<(usize, f32)>) -> Self {
        pairs.sort_by_key(|(i, _)| *i);
        let mut entries: Vec<(usize, f32)> = Vec::with_capacity(pairs.len());
        for (i, w) in pairs {
            match entries.last_mut() {
                Some((last, acc)) if *last == i => *acc += w,
                _ => entries.push((i, w)),
            }
        }
        entries.retain(|(_, w)| *w != 0.0);
        Self { entries }
    }

    pub fn is_zero(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ { self.entries.iter().copied() }

    pub fn weight(&self, index: usize) -> f32 {
        self.entries
            .binary_search_by_key(&index, |(i, _)| *i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Merge-join dot product over the two sorted index lists.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut a, mut b) = (self.entries.iter().peekable(), other.entries.iter().peekable());
        let mut sum = 0.0f32;
        while let (Some(&&(ia, wa)), Some(&&(ib, wb))) = (a.peek(), b.peek()) {
            match ia.cmp(&ib) {
                std::cmp::Ordering::Less => { a.next(); }
                std::cmp::Ordering::Greater => { b.next(); }
                std::cmp::Ordering::Equal => { sum += wa * wb; a.next(); b.next(); }
            }
        }
        sum
    }

    /// Scales to unit L2 norm. The zero vector stays zero.
    pub fn normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries { *w /= norm; }
        }
        self
    }
}
