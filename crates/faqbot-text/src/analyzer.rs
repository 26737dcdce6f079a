use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, StopWordFilter, TextAnalyzer, TokenStream};

use crate::stop_words;

/// Shortest token kept; single letters and digits carry no signal.
const MIN_TOKEN_LEN: usize = 2;

/// Splits text into the word n-grams the vectorizer counts.
///
/// Tokens come from a tantivy analyzer chain (simple tokenizer, lowercasing,
/// English stop words). N-grams are built over the surviving tokens and their
/// words are joined with a single space.
#[derive(Clone)]
pub struct TermAnalyzer {
    analyzer: TextAnalyzer,
    ngram_min: usize,
    ngram_max: usize,
}

impl TermAnalyzer {
    pub fn new(ngram_min: usize, ngram_max: usize) -> Self {
        let analyzer = TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(LowerCaser)
            .filter(StopWordFilter::remove(stop_words::ENGLISH.iter().map(|s| s.to_string())))
            .build();
        Self { analyzer, ngram_min: ngram_min.max(1), ngram_max: ngram_max.max(ngram_min.max(1)) }
    }

    pub fn tokens(&self, text: &str) -> Vec<String> {
        // token_stream takes &mut self
        let mut analyzer = self.analyzer.clone();
        let mut stream = analyzer.token_stream(text);
        let mut tokens = Vec::new();
        while stream.advance() {
            let token = &stream.token().text;
            if token.chars().count() >= MIN_TOKEN_LEN {
                tokens.push(token.clone());
            }
        }
        tokens
    }

    pub fn terms(&self, text: &str) -> Vec<String> {
        let tokens = self.tokens(text);
        let mut terms = Vec::new();
        for n in self.ngram_min..=self.ngram_max {
            if n > tokens.len() { break; }
            terms.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        terms
    }
}

impl Default for TermAnalyzer {
    fn default() -> Self { Self::new(1, 2) }
}
