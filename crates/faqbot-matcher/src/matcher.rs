use tracing::{debug, info};

use faqbot_core::config::MatcherSettings;
use faqbot_core::traits::{Responder, Vectorizer};
use faqbot_core::{Catalog, Error, QueryResult, Result, SparseVector};
use faqbot_text::{normalize, TfidfConfig, TfidfVectorizer};

use crate::similarity::{argmax, cosine_similarity};

pub const DEFAULT_THRESHOLD: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatcherConfig {
    pub threshold: f32,
    pub tfidf: TfidfConfig,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self { threshold: DEFAULT_THRESHOLD, tfidf: TfidfConfig::default() }
    }
}

impl From<&MatcherSettings> for MatcherConfig {
    fn from(s: &MatcherSettings) -> Self {
        Self {
            threshold: s.threshold,
            tfidf: TfidfConfig { max_features: s.max_features, ngram_min: s.ngram_min, ngram_max: s.ngram_max },
        }
    }
}

fn check_threshold(threshold: f32) -> Result<f32> {
    if (0.0..=1.0).contains(&threshold) { Ok(threshold) } else { Err(Error::InvalidThreshold(threshold)) }
}

/// Maps free-text questions onto the closest catalog entry.
///
/// The vectorizer basis and the per-question vectors are computed once in
/// [`Matcher::build`] and never change afterwards, so a `Matcher` can be shared
/// across threads by reference.
pub struct Matcher<V = TfidfVectorizer> {
    catalog: Catalog,
    vectorizer: V,
    question_vectors: Vec<SparseVector>,
    threshold: f32,
}

impl Matcher<TfidfVectorizer> {
    pub fn build(catalog: Catalog) -> Result<Self> {
        Self::build_with(catalog, MatcherConfig::default())
    }

    pub fn build_with(catalog: Catalog, config: MatcherConfig) -> Result<Self> {
        let threshold = check_threshold(config.threshold)?;
        let questions: Vec<String> = catalog.questions().map(normalize).collect();
        let vectorizer = TfidfVectorizer::fit(&questions, config.tfidf)?;
        info!(entries = catalog.len(), vocabulary = vectorizer.vocabulary_size(), threshold, "matcher built");
        Ok(Self::from_parts(catalog, vectorizer, threshold))
    }
}

impl<V: Vectorizer> Matcher<V> {
    /// Assembles a matcher around an already fitted vectorizer.
    pub fn with_vectorizer(catalog: Catalog, vectorizer: V, threshold: f32) -> Result<Self> {
        Ok(Self::from_parts(catalog, vectorizer, check_threshold(threshold)?))
    }

    fn from_parts(catalog: Catalog, vectorizer: V, threshold: f32) -> Self {
        let question_vectors = catalog.questions().map(|q| vectorizer.transform(&normalize(q))).collect();
        Self { catalog, vectorizer, question_vectors, threshold }
    }

    pub fn catalog(&self) -> &Catalog { &self.catalog }

    pub fn threshold(&self) -> f32 { self.threshold }

    pub fn vectorizer(&self) -> &V { &self.vectorizer }

    fn scores(&self, text: &str) -> Vec<f32> {
        let query = self.vectorizer.transform(&normalize(text));
        self.question_vectors
            .iter()
            .map(|q| cosine_similarity(&query, q).clamp(0.0, 1.0))
            .collect()
    }

    /// Best entry for `text` under the configured threshold.
    pub fn query(&self, text: &str) -> QueryResult {
        self.decide(text, self.threshold)
    }

    pub fn query_with_threshold(&self, text: &str, threshold: f32) -> Result<QueryResult> {
        Ok(self.decide(text, check_threshold(threshold)?))
    }

    fn decide(&self, text: &str, threshold: f32) -> QueryResult {
        let Some((index, score)) = argmax(&self.scores(text)) else {
            return QueryResult::no_match(0.0);
        };
        debug!(index, score, threshold, "best catalog candidate");
        match self.catalog.get(index) {
            Some(entry) if score >= threshold => QueryResult::matched(entry, score),
            _ => QueryResult::no_match(score),
        }
    }

    /// Top `k` catalog indices by score, best first, ties by index.
    pub fn ranked(&self, text: &str, k: usize) -> Vec<(usize, f32)> {
        let mut scored: Vec<(usize, f32)> = self.scores(text).into_iter().enumerate().collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored
    }
}

impl<V: Vectorizer> Responder for Matcher<V> {
    fn respond(&self, question: &str) -> QueryResult { self.query(question) }
}
