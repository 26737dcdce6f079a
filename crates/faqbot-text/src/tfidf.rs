use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use faqbot_core::traits::Vectorizer;
use faqbot_core::{Error, Result, SparseVector};

use crate::analyzer::TermAnalyzer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TfidfConfig {
    pub max_features: usize,
    pub ngram_min: usize,
    pub ngram_max: usize,
}

impl Default for TfidfConfig {
    fn default() -> Self {
        Self { max_features: 1000, ngram_min: 1, ngram_max: 2 }
    }
}

/// TF-IDF weighting over a vocabulary frozen at fit time.
///
/// `idf(t) = ln((1 + n) / (1 + df(t))) + 1`; document vectors are raw term
/// counts times idf, L2-normalized.
#[derive(Clone)]
pub struct TfidfVectorizer {
    analyzer: TermAnalyzer,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    pub fn fit<S: AsRef<str>>(documents: &[S], config: TfidfConfig) -> Result<Self> {
        if config.max_features == 0 {
            return Err(Error::InvalidConfig("max_features must be positive".into()));
        }
        if config.ngram_min == 0 || config.ngram_min > config.ngram_max {
            return Err(Error::InvalidConfig(format!(
                "n-gram range {}..={} is empty",
                config.ngram_min, config.ngram_max
            )));
        }
        let analyzer = TermAnalyzer::new(config.ngram_min, config.ngram_max);

        // term -> (corpus frequency, document frequency), alphabetical
        let mut stats: BTreeMap<String, (usize, usize)> = BTreeMap::new();
        for doc in documents {
            let mut seen: HashMap<String, usize> = HashMap::new();
            for term in analyzer.terms(doc.as_ref()) {
                *seen.entry(term).or_default() += 1;
            }
            for (term, count) in seen {
                let entry = stats.entry(term).or_default();
                entry.0 += count;
                entry.1 += 1;
            }
        }
        if stats.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        let mut kept: Vec<(String, usize, usize)> = stats.into_iter().map(|(t, (tf, df))| (t, tf, df)).collect();
        if kept.len() > config.max_features {
            // stable sort keeps alphabetical order among equal frequencies
            kept.sort_by(|a, b| b.1.cmp(&a.1));
            kept.truncate(config.max_features);
            kept.sort_by(|a, b| a.0.cmp(&b.0));
        }

        let n = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(kept.len());
        let mut idf = Vec::with_capacity(kept.len());
        for (index, (term, _, df)) in kept.into_iter().enumerate() {
            idf.push((((1.0 + n) / (1.0 + df as f64)).ln() + 1.0) as f32);
            vocabulary.insert(term, index);
        }
        debug!(documents = documents.len(), terms = vocabulary.len(), "fitted tf-idf vocabulary");
        Ok(Self { analyzer, vocabulary, idf })
    }

    pub fn vocabulary_size(&self) -> usize { self.vocabulary.len() }

    pub fn term_index(&self, term: &str) -> Option<usize> { self.vocabulary.get(term).copied() }

    pub fn idf(&self, term: &str) -> Option<f32> { self.term_index(term).map(|i| self.idf[i]) }

    /// Projects `text` into the fitted basis. Unknown terms are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        let pairs = self
            .analyzer
            .terms(text)
            .into_iter()
            .filter_map(|term| self.vocabulary.get(&term).map(|&i| (i, self.idf[i])))
            .collect();
        SparseVector::from_pairs(pairs).normalized()
    }
}

impl Vectorizer for TfidfVectorizer {
    fn dim(&self) -> usize { self.vocabulary_size() }
    fn transform(&self, text: &str) -> SparseVector { TfidfVectorizer::transform(self, text) }
}
