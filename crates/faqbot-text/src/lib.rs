//! faqbot-text
//!
//! Query normalization, tantivy-based term analysis and the TF-IDF
//! vectorizer the matcher scores with.
pub mod analyzer;
pub mod normalize;
pub mod stop_words;
pub mod tfidf;

pub use analyzer::TermAnalyzer;
pub use normalize::normalize;
pub use tfidf::{TfidfConfig, TfidfVectorizer};
