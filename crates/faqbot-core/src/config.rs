//! Layered configuration.
//!
//! Uses Figment to merge built-in defaults, `config.toml`, `config.<env>.toml`
//! and `FAQBOT_*` env vars (`FAQBOT_MATCHER__THRESHOLD=0.4`).

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Same layering as [`Config::load`] but with config files looked up in `dir`.
    pub fn load_from(dir: &Path) -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(dir.join("config.toml")));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("FAQBOT_").split("__"));

        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn settings(&self) -> anyhow::Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to read settings: {}", e))
    }

    fn validate(&self) -> anyhow::Result<()> {
        let settings = self.settings()?;
        let t = settings.matcher.threshold;
        if !(0.0..=1.0).contains(&t) {
            return Err(Error::InvalidThreshold(t).into());
        }
        if settings.matcher.max_features == 0 {
            return Err(Error::InvalidConfig("matcher.max_features must be positive".into()).into());
        }
        let (lo, hi) = (settings.matcher.ngram_min, settings.matcher.ngram_max);
        if lo == 0 || lo > hi {
            return Err(Error::InvalidConfig(format!("matcher n-gram range {}..={} is empty", lo, hi)).into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub matcher: MatcherSettings,
    #[serde(default)]
    pub chat: ChatSettings,
}

/// Where the FAQ entries come from. `None` means the built-in sample set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl CatalogSettings {
    /// The configured catalog file, expanded and resolved against `base`.
    pub fn resolved_path(&self, base: &Path) -> Option<PathBuf> {
        self.path.as_deref().map(|p| resolve_with_base(base, p))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherSettings {
    pub threshold: f32,
    pub max_features: usize,
    pub ngram_min: usize,
    pub ngram_max: usize,
}

impl Default for MatcherSettings {
    fn default() -> Self {
        Self { threshold: 0.3, max_features: 1000, ngram_min: 1, ngram_max: 2 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    /// Number of catalog questions offered when nothing matches.
    pub suggestions: usize,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self { suggestions: 3 }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
