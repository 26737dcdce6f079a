use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use faqbot_core::catalog::{catalog_from_settings, load_catalog};
use faqbot_core::config::Config;
use faqbot_core::traits::Vectorizer;
use faqbot_matcher::{Matcher, MatcherConfig, Role, Session};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset; the `faqbot` prefix covers every workspace crate.
const DEFAULT_LOG_FILTER: &str = "faqbot=info";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;
    let catalog = match env::args().nth(1) {
        Some(path) => load_catalog(&PathBuf::from(path))?,
        None => catalog_from_settings(&settings.catalog, Path::new("."))?,
    };
    let matcher = Matcher::build_with(catalog, MatcherConfig::from(&settings.matcher))?;
    info!(entries = matcher.catalog().len(), "catalog loaded");

    let mut session = Session::with_suggestions(&matcher, settings.chat.suggestions);
    println!("🤖 FAQ Chatbot\n=============");
    println!("Ask a question, or type /faqs for topics, /N to pick one, /history, /clear, /quit.\n");
    print_topics(&session);

    let stdin = io::stdin();
    let mut out = io::stdout();
    loop {
        print!("\nYou: ");
        out.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 { break; }
        let line = line.trim();
        let reply = match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/faqs" => { print_topics(&session); continue; }
            "/clear" => { session.clear(); println!("🧹 Chat history cleared"); continue; }
            "/history" => {
                for m in session.transcript() {
                    let who = match m.role { Role::User => "You", Role::Bot => "Bot" };
                    println!("{}: {}", who, m.content);
                }
                continue;
            }
            cmd if cmd.starts_with('/') => match cmd[1..].parse::<usize>() {
                Ok(n) if n >= 1 => match session.select(n - 1) {
                    Some(reply) => reply,
                    None => { eprintln!("No FAQ topic #{}", n); continue; }
                },
                _ => { eprintln!("Unknown command: {}", cmd); continue; }
            },
            question => match session.ask(question) {
                Some(reply) => reply,
                None => continue,
            },
        };
        println!("Bot: {}", reply.text);
        match &reply.result.matched_question {
            Some(q) => println!("     (matched \"{}\", confidence {:.2})", q, reply.result.confidence),
            None => println!("     (no confident match, best {:.2})", reply.result.confidence),
        }
    }
    println!("👋 Bye");
    Ok(())
}

fn print_topics<V: Vectorizer>(session: &Session<'_, V>) {
    println!("You can ask about these topics:");
    for (i, q) in session.faq_topics().iter().enumerate() {
        println!("  /{:<3} {}", i + 1, q);
    }
}
