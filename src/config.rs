use log::warn;
use std::env;
use std::str::FromStr;

use crate::blockchain::{DEFAULT_DIFFICULTY, SealScope};

const HOST_KEY: &str = "HOST";
const PORT_KEY: &str = "PORT";
const DIFFICULTY_KEY: &str = "LEDGER_DIFFICULTY";
const SEAL_SCOPE_KEY: &str = "LEDGER_SEAL_SCOPE";

/// An empty prefix would accept every hash.
const MIN_DIFFICULTY: usize = 1;
/// Difficulty above this would make a single block take hours.
const MAX_DIFFICULTY: usize = 8;

/// Runtime settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub difficulty: usize,
    pub seal_scope: SealScope,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            difficulty: DEFAULT_DIFFICULTY,
            seal_scope: SealScope::Header,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup; missing or malformed values fall
    /// back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let difficulty = parse_or(&lookup, DIFFICULTY_KEY, defaults.difficulty);
        let clamped = difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
        if clamped != difficulty {
            warn!(
                "{DIFFICULTY_KEY}={difficulty} outside {MIN_DIFFICULTY}..={MAX_DIFFICULTY}, using {clamped}"
            );
        }

        let seal_scope = match lookup(SEAL_SCOPE_KEY).as_deref().map(str::trim) {
            None => defaults.seal_scope,
            Some(v) if v.eq_ignore_ascii_case("header") => SealScope::Header,
            Some(v) if v.eq_ignore_ascii_case("full") => SealScope::Full,
            Some(other) => {
                warn!("{SEAL_SCOPE_KEY}={other:?} not recognised, using header");
                defaults.seal_scope
            }
        };

        Self {
            host: lookup(HOST_KEY).unwrap_or(defaults.host),
            port: parse_or(&lookup, PORT_KEY, defaults.port),
            difficulty: clamped,
            seal_scope,
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{key}={raw:?} is not valid, using default");
            default
        }),
    }
}
