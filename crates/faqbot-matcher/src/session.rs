//! Chat session over a [`Matcher`]: a flat transcript plus the fallback reply
//! shown when no catalog entry is close enough.

use serde::{Deserialize, Serialize};
use tracing::debug;

use faqbot_core::traits::Vectorizer;
use faqbot_core::QueryResult;

use crate::matcher::Matcher;

pub const DEFAULT_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// What the bot said in response to one question.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub result: QueryResult,
}

pub struct Session<'m, V: Vectorizer> {
    matcher: &'m Matcher<V>,
    history: Vec<Message>,
    suggestions: usize,
}

impl<'m, V: Vectorizer> Session<'m, V> {
    pub fn new(matcher: &'m Matcher<V>) -> Self {
        Self::with_suggestions(matcher, DEFAULT_SUGGESTIONS)
    }

    pub fn with_suggestions(matcher: &'m Matcher<V>, suggestions: usize) -> Self {
        Self { matcher, history: Vec::new(), suggestions }
    }

    /// Catalog questions in listing order.
    pub fn faq_topics(&self) -> Vec<&str> {
        self.matcher.catalog().questions().collect()
    }

    /// Asks the catalog question at `index`, if there is one.
    pub fn select(&mut self, index: usize) -> Option<Reply> {
        let question = self.matcher.catalog().get(index)?.question.clone();
        self.ask(&question)
    }

    /// Answers `text` and records the exchange. Blank input is ignored.
    pub fn ask(&mut self, text: &str) -> Option<Reply> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if !self.last_is(Role::User, text) {
            self.history.push(Message { role: Role::User, content: text.to_string() });
        }

        let result = self.matcher.query(text);
        let reply = match &result.answer {
            Some(answer) => {
                if !self.last_is(Role::Bot, answer) {
                    self.history.push(Message { role: Role::Bot, content: answer.clone() });
                }
                answer.clone()
            }
            None => {
                let fallback = self.fallback();
                if self.last_bot() != Some(fallback.as_str()) {
                    self.history.push(Message { role: Role::Bot, content: fallback.clone() });
                }
                fallback
            }
        };
        debug!(confidence = result.confidence, matched = result.is_match(), "session reply");
        Some(Reply { text: reply, result })
    }

    /// Reply used when nothing clears the threshold.
    pub fn fallback(&self) -> String {
        let topics: Vec<&str> = self.matcher.catalog().questions().take(self.suggestions).collect();
        if topics.is_empty() {
            return "I'm here to answer questions about our services. Please pick one of the FAQ topics.".to_string();
        }
        format!(
            "I'm here to answer questions about our services. \
             Please pick one of the FAQ topics or ask about one of these:\n- {}\n...and more!",
            topics.join("\n- ")
        )
    }

    /// Raw transcript, in order.
    pub fn history(&self) -> &[Message] { &self.history }

    /// Transcript for display: a message is hidden when it repeats the
    /// previous message of the same role.
    pub fn transcript(&self) -> Vec<&Message> {
        let (mut last_user, mut last_bot): (Option<&str>, Option<&str>) = (None, None);
        let mut shown = Vec::new();
        for m in &self.history {
            let last = match m.role {
                Role::User => &mut last_user,
                Role::Bot => &mut last_bot,
            };
            if *last != Some(m.content.as_str()) {
                shown.push(m);
            }
            *last = Some(m.content.as_str());
        }
        shown
    }

    pub fn clear(&mut self) { self.history.clear(); }

    fn last_is(&self, role: Role, content: &str) -> bool {
        self.history.last().is_some_and(|m| m.role == role && m.content == content)
    }

    fn last_bot(&self) -> Option<&str> {
        self.history.iter().rev().find(|m| m.role == Role::Bot).map(|m| m.content.as_str())
    }
}
