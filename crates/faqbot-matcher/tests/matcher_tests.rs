use faqbot_core::catalog::sample_catalog;
use faqbot_core::traits::{Responder, Vectorizer};
use faqbot_core::{Catalog, CatalogEntry, Error, SparseVector};
use faqbot_matcher::{Matcher, Role, Session};

fn sample_matcher() -> Matcher {
    Matcher::build(sample_catalog()).expect("build")
}

#[test]
fn contraction_matches_return_policy() {
    let m = sample_matcher();
    let r = m.query("what's your return policy");
    assert_eq!(r.matched_question.as_deref(), Some("What is your return policy?"));
    assert!(r.answer.as_deref().is_some_and(|a| a.starts_with("We offer a 30-day return policy")));
    assert!(r.confidence >= 0.3, "confidence {}", r.confidence);
}

#[test]
fn gibberish_is_not_matched() {
    let m = sample_matcher();
    let r = m.query("asdkjaslkdj random text");
    assert!(r.answer.is_none());
    assert!(r.matched_question.is_none());
    assert!(r.confidence < 0.05, "confidence {}", r.confidence);
}

#[test]
fn empty_query_is_not_matched() {
    let m = sample_matcher();
    for q in ["", "   ", "?!?"] {
        let r = m.query(q);
        assert!(r.answer.is_none());
        assert_eq!(r.confidence, 0.0);
    }
}

#[test]
fn every_catalog_question_matches_itself() {
    let m = sample_matcher();
    let unrelated = m.query("asdkjaslkdj random text").confidence;
    for entry in m.catalog().entries() {
        let r = m.query(&entry.question);
        assert_eq!(r.answer.as_deref(), Some(entry.answer.as_str()), "question {:?}", entry.question);
        assert!(r.confidence >= unrelated);
        assert!(r.confidence > 0.99, "self-similarity {}", r.confidence);
    }
}

#[test]
fn queries_are_deterministic_and_bounded() {
    let m = sample_matcher();
    let queries = ["shipping", "how do I get a refund", "loyalty points program", "zzz", "Do you have an app for android?"];
    for q in queries {
        let a = m.query(q);
        let b = m.query(q);
        assert_eq!(a, b);
        assert!((0.0..=1.0).contains(&a.confidence));
        assert_eq!(a.answer.is_some(), a.matched_question.is_some());
    }
    let again = sample_matcher();
    for q in queries {
        assert_eq!(m.query(q), again.query(q), "rebuilt matcher differs on {q:?}");
    }
}

#[test]
fn threshold_boundary_is_inclusive() {
    let m = sample_matcher();
    let probe = m.query_with_threshold("shipping", 0.0).expect("query");
    let score = probe.confidence;
    assert!(score > 0.0 && score < 1.0, "score {score}");

    let at = m.query_with_threshold("shipping", score).expect("query");
    assert!(at.answer.is_some(), "score equal to threshold must match");
    assert_eq!(at.confidence, score);

    let above = m.query_with_threshold("shipping", (score + 1e-3).min(1.0)).expect("query");
    assert!(above.answer.is_none());
}

#[test]
fn empty_catalog_fails_fast() {
    assert!(matches!(Catalog::new(Vec::new()), Err(Error::EmptyCatalog)));
}

#[test]
fn stop_word_only_catalog_is_rejected() {
    let catalog = Catalog::new(vec![CatalogEntry::new("What is it?", "Nothing.")]).unwrap();
    assert!(matches!(Matcher::build(catalog), Err(Error::EmptyVocabulary)));
}

#[test]
fn matcher_is_shareable_across_threads() {
    let m = sample_matcher();
    let expected = m.query("track my order");
    let shared = &m;
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(move || shared.respond("track my order"))).collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}

#[test]
fn query_result_serializes_with_nulls_on_no_match() {
    let m = sample_matcher();
    let json = serde_json::to_value(m.query("asdkjaslkdj")).unwrap();
    assert!(json["answer"].is_null());
    assert!(json["matched_question"].is_null());
    assert!(json["confidence"].is_number());
}

#[test]
fn session_suppresses_consecutive_duplicates() {
    let m = sample_matcher();
    let mut session = Session::new(&m);
    session.ask("Do you offer refunds?").unwrap();
    session.ask("Do you offer refunds?").unwrap();
    assert_eq!(session.history().len(), 4);
    assert_eq!(session.transcript().len(), 2, "repeated exchange is hidden from display");

    session.ask("asdkjaslkdj").unwrap();
    session.ask("qwpoeiruty").unwrap();
    let bots = session.history().iter().filter(|m| m.role == Role::Bot).count();
    assert_eq!(bots, 3, "fallback recorded once");
    let shown: Vec<&str> = session.transcript().iter().map(|m| m.content.as_str()).collect();
    assert_eq!(shown.len(), 5);
    assert_eq!(shown[2], "asdkjaslkdj");
    assert_eq!(shown[4], "qwpoeiruty");
}

#[test]
fn session_fallback_lists_first_topics() {
    let m = sample_matcher();
    let mut session = Session::with_suggestions(&m, 2);
    let reply = session.ask("asdkjaslkdj").unwrap();
    assert!(reply.result.answer.is_none());
    assert!(reply.text.contains("- What is your return policy?"));
    assert!(reply.text.contains("- How can I contact customer support?"));
    assert!(!reply.text.contains("What payment methods"));
    assert!(reply.text.ends_with("...and more!"));
}

#[test]
fn session_fallback_without_suggestions_has_no_topic_list() {
    let m = sample_matcher();
    let mut session = Session::with_suggestions(&m, 0);
    let reply = session.ask("asdkjaslkdj").unwrap();
    assert!(reply.result.answer.is_none());
    assert!(!reply.text.contains("- "), "unexpected bullet in {:?}", reply.text);
    assert!(!reply.text.contains("...and more!"));
    assert!(reply.text.starts_with("I'm here to answer questions about our services."));
}

#[test]
fn session_select_clear_and_blank_input() {
    let m = sample_matcher();
    let mut session = Session::new(&m);
    assert!(session.ask("   ").is_none());
    assert_eq!(session.faq_topics().len(), 15);

    let reply = session.select(7).unwrap();
    assert_eq!(reply.result.matched_question.as_deref(), Some("Do you have a mobile app?"));
    assert!(session.select(99).is_none());

    session.clear();
    assert!(session.history().is_empty());
}

/// One dimension per keyword, present or absent.
struct KeywordVectorizer {
    keywords: Vec<&'static str>,
}

impl Vectorizer for KeywordVectorizer {
    fn dim(&self) -> usize { self.keywords.len() }

    fn transform(&self, text: &str) -> SparseVector {
        let pairs = text
            .split_whitespace()
            .filter_map(|word| self.keywords.iter().position(|k| *k == word))
            .map(|i| (i, 1.0))
            .collect();
        SparseVector::from_pairs(pairs).normalized()
    }
}

fn keyword_catalog() -> Catalog {
    Catalog::new(vec![
        CatalogEntry::new("How much is shipping?", "It depends on weight."),
        CatalogEntry::new("Can I get a refund?", "Within 30 days."),
        CatalogEntry::new("Shipping refund rules", "Shipping is refunded for defects."),
    ])
    .unwrap()
}

fn keyword_vectorizer() -> KeywordVectorizer {
    KeywordVectorizer { keywords: vec!["shipping", "refund", "hours"] }
}

#[test]
fn custom_vectorizer_drives_matching() {
    let m = Matcher::with_vectorizer(keyword_catalog(), keyword_vectorizer(), 0.8).expect("matcher");
    assert_eq!(m.vectorizer().dim(), 3);
    assert_eq!(m.threshold(), 0.8);

    let r = m.query("Shipping refund?");
    assert_eq!(r.matched_question.as_deref(), Some("Shipping refund rules"));
    assert!(r.confidence > 0.99);

    let ranked = m.ranked("shipping", 3);
    assert_eq!(ranked.iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![0, 2, 1]);
    assert!((ranked[1].1 - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-4);
    assert_eq!(ranked[2].1, 0.0);

    // best is entry 0 at ~0.707, below 0.8
    let below = m.query("shipping hours");
    assert!(below.answer.is_none());
    assert!((below.confidence - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-4);
    let lowered = m.query_with_threshold("shipping hours", 0.7).expect("query");
    assert_eq!(lowered.matched_question.as_deref(), Some("How much is shipping?"));

    assert!(m.query("opening hours").answer.is_none());
}

#[test]
fn custom_vectorizer_threshold_is_validated() {
    for t in [-0.5, 1.5, f32::NAN] {
        let built = Matcher::with_vectorizer(keyword_catalog(), keyword_vectorizer(), t);
        assert!(matches!(built, Err(Error::InvalidThreshold(_))));
    }
}
