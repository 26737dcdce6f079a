//! faqbot-matcher
//!
//! Ranks a catalog of FAQ entries against free-text questions and wraps the
//! result in a chat session with a flat transcript.
pub mod matcher;
pub mod session;
pub mod similarity;

pub use matcher::{Matcher, MatcherConfig, DEFAULT_THRESHOLD};
pub use session::{Message, Reply, Role, Session};
