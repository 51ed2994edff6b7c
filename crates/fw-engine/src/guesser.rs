//! The statistical intent guesser.
//!
//! A naive-Bayes bag-of-words classifier over verb categories, trained
//! on short example phrases per verb. The trained state round-trips
//! through JSON so it can be built once (`fw train`) and loaded at
//! session start; concurrent sessions share a loaded model read-only.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

/// Training phrases per canonical verb, mirroring the near-synonyms
/// players actually type.
const DEFAULT_CORPUS: &[(&str, &[&str])] = &[
    (
        "move",
        &[
            "walk", "walk over", "run", "head", "head over", "travel", "wander", "stroll",
            "march",
        ],
    ),
    (
        "look",
        &[
            "look at", "examine", "inspect", "view", "observe", "study", "peer at", "check",
        ],
    ),
    (
        "get",
        &[
            "grab", "take", "pick up", "snatch", "fetch", "collect", "steal", "pocket",
        ],
    ),
    (
        "drop",
        &["drop", "put down", "discard", "leave", "toss", "release", "dump"],
    ),
    (
        "inventory",
        &[
            "what am i carrying",
            "check my bag",
            "show inventory",
            "list my items",
            "check pockets",
        ],
    ),
    (
        "quit",
        &[
            "goodbye", "bye", "farewell", "exit", "leave the game", "log off", "stop playing",
        ],
    ),
];

/// Token counts for one verb category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Pool {
    tokens: HashMap<String, u32>,
    total: u32,
    phrases: u32,
}

/// A naive-Bayes bag-of-words classifier over verb categories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Guesser {
    pools: HashMap<String, Pool>,
    phrases: u32,
}

impl Guesser {
    /// Create an untrained guesser.
    pub fn new() -> Self {
        Self::default()
    }

    /// A guesser trained from the built-in phrase corpus.
    pub fn with_default_corpus() -> Self {
        let mut guesser = Self::new();
        for (category, phrases) in DEFAULT_CORPUS {
            for phrase in *phrases {
                guesser.train(category, phrase);
            }
        }
        guesser
    }

    /// Train one example phrase into a category.
    pub fn train(&mut self, category: &str, phrase: &str) {
        let pool = self.pools.entry(category.to_string()).or_default();
        for token in tokenize(phrase) {
            *pool.tokens.entry(token).or_insert(0) += 1;
            pool.total += 1;
        }
        pool.phrases += 1;
        self.phrases += 1;
    }

    /// Rank categories against `text`, best first, as normalized
    /// posterior probabilities.
    ///
    /// The ranking is empty when the model is untrained or no token of
    /// `text` appears in any trained pool — a phrase the model has no
    /// opinion on gives the caller nothing to act on.
    pub fn guess(&self, text: &str) -> Vec<(String, f64)> {
        if self.phrases == 0 {
            return Vec::new();
        }
        let known: Vec<String> = tokenize(text)
            .into_iter()
            .filter(|token| {
                self.pools
                    .values()
                    .any(|pool| pool.tokens.contains_key(token))
            })
            .collect();
        if known.is_empty() {
            return Vec::new();
        }

        let vocabulary = self.vocabulary_size() as f64;
        let mut scores: Vec<(String, f64)> = self
            .pools
            .iter()
            .map(|(category, pool)| {
                let prior = f64::from(pool.phrases) / f64::from(self.phrases);
                let mut log_score = prior.ln();
                for token in &known {
                    let count = f64::from(pool.tokens.get(token).copied().unwrap_or(0));
                    // Laplace smoothing keeps unseen tokens from zeroing a pool.
                    log_score += ((count + 1.0) / (f64::from(pool.total) + vocabulary)).ln();
                }
                (category.clone(), log_score)
            })
            .collect();

        let max = scores
            .iter()
            .map(|(_, score)| *score)
            .fold(f64::NEG_INFINITY, f64::max);
        let total: f64 = scores.iter().map(|(_, score)| (score - max).exp()).sum();
        for (_, score) in &mut scores {
            *score = (*score - max).exp() / total;
        }

        scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scores
    }

    /// Persist the trained state as JSON.
    pub fn save(&self, path: &Path) -> EngineResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Load previously persisted state.
    pub fn load(path: &Path) -> EngineResult<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    fn vocabulary_size(&self) -> usize {
        let mut vocabulary: HashSet<&str> = HashSet::new();
        for pool in self.pools.values() {
            vocabulary.extend(pool.tokens.keys().map(String::as_str));
        }
        vocabulary.len()
    }
}

/// Lowercase and split on anything that is not alphanumeric.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
