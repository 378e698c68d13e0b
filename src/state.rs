//! Application state: the verb bank and its indices.
//!
//! This module owns:
//!   - the verb bank (built-in seeds merged with the optional TOML bank)
//!   - an index by infinitive
//!
//! The bank is immutable after startup, so handlers share it without locks.

use std::collections::HashMap;

use tracing::{error, info, instrument};

use crate::config::{load_quiz_config_from_env, QuizConfig};
use crate::conjugation::conjugate_tense;
use crate::domain::{Tense, VerbEntry, VerbKind};
use crate::seeds::seed_verbs;

#[derive(Clone, Debug)]
pub struct AppState {
    pub verbs: Vec<VerbEntry>,
    pub by_infinitive: HashMap<String, usize>,
}

impl AppState {
    /// Build state from env: load config, merge the verb bank, build indices.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        Self::from_config(load_quiz_config_from_env().unwrap_or_default())
    }

    pub fn from_config(cfg: QuizConfig) -> Self {
        let mut verbs: Vec<VerbEntry> = Vec::new();
        let mut by_infinitive = HashMap::<String, usize>::new();

        // Built-in seeds first, then config entries (which replace same-named seeds).
        for v in seed_verbs().into_iter().chain(cfg.verbs) {
            if let Some(tense) = first_unconjugatable_tense(&v) {
                error!(target: "verbos_backend", verb = %v.infinitive, tense = tense.key(), "Skipping bank verb: tense cannot be conjugated.");
                continue;
            }
            match by_infinitive.get(&v.infinitive) {
                Some(&idx) => verbs[idx] = v,
                None => {
                    by_infinitive.insert(v.infinitive.clone(), verbs.len());
                    verbs.push(v);
                }
            }
        }

        let irregular = verbs.iter().filter(|v| v.kind == VerbKind::Irregular).count();
        info!(target: "question", total = verbs.len(), regular = verbs.len() - irregular, irregular, "Startup verb inventory");

        Self { verbs, by_infinitive }
    }

    /// Read-only access to a verb by infinitive.
    pub fn get_verb(&self, infinitive: &str) -> Option<&VerbEntry> {
        self.by_infinitive.get(infinitive).map(|&idx| &self.verbs[idx])
    }
}

fn first_unconjugatable_tense(v: &VerbEntry) -> Option<Tense> {
    Tense::ALL
        .iter()
        .copied()
        .find(|t| conjugate_tense(v, *t).map_or(true, |forms| forms.iter().any(|f| f.trim().is_empty())))
}
