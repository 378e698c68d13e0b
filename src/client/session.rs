//! Score and session counters owned by the controller.

use crate::domain::Question;

pub const POINTS_PER_CORRECT: u32 = 10;

/// Miss counts keyed by label, remembering first-occurrence order so that
/// ranking ties resolve to whichever key was missed first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
  entries: Vec<(String, u32)>,
}

impl Tally {
  pub fn add(&mut self, key: &str) {
    match self.entries.iter_mut().find(|(k, _)| k == key) {
      Some((_, n)) => *n += 1,
      None => self.entries.push((key.to_string(), 1)),
    }
  }

  #[cfg(test)]
  pub fn get(&self, key: &str) -> u32 {
    self.entries.iter().find(|(k, _)| k == key).map_or(0, |(_, n)| *n)
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(|(k, _)| k.as_str())
  }

  /// Highest counts first; `sort_by` is stable so insertion order breaks ties.
  pub fn top(&self, n: usize) -> Vec<(String, u32)> {
    let mut ranked = self.entries.clone();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
  }
}

/// Score and streaks. `best_streak` never decreases and is never below
/// `current_streak`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreState {
  pub score: u32,
  pub current_streak: u32,
  pub best_streak: u32,
}

impl ScoreState {
  pub fn with_best(best_streak: u32) -> Self {
    Self { best_streak, ..Self::default() }
  }

  /// Apply one answer. Returns true when the best streak just grew.
  pub fn record(&mut self, correct: bool) -> bool {
    if !correct {
      self.current_streak = 0;
      return false;
    }
    self.score += POINTS_PER_CORRECT;
    self.current_streak += 1;
    if self.current_streak > self.best_streak {
      self.best_streak = self.current_streak;
      return true;
    }
    false
  }

  /// New run: score and streak go back to zero, the best streak stays.
  pub fn reset_run(&mut self) {
    self.score = 0;
    self.current_streak = 0;
  }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
  pub active: bool,
  pub questions_seen: u32,
  pub correct_count: u32,
  pub incorrect_count: u32,
  pub errors_by_tense: Tally,
  pub errors_by_question_type: Tally,
  pub errors_by_verb: Tally,
}

impl SessionState {
  pub fn start() -> Self {
    Self { active: true, ..Self::default() }
  }

  pub fn record(&mut self, q: &Question, correct: bool) {
    self.questions_seen += 1;
    if correct {
      self.correct_count += 1;
    } else {
      self.incorrect_count += 1;
      self.errors_by_tense.add(q.tense.key());
      self.errors_by_question_type.add(q.question_type.key());
      self.errors_by_verb.add(&q.verb);
    }
  }

  /// Percentage of the session answered correctly, rounded half up.
  pub fn accuracy(&self, session_length: u32) -> u32 {
    if session_length == 0 {
      return 0;
    }
    (f64::from(self.correct_count) / f64::from(session_length) * 100.0).round() as u32
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn consecutive_correct_answers_accumulate() {
    let mut s = ScoreState::with_best(3);
    for _ in 0..5 {
      s.record(true);
    }
    assert_eq!(s, ScoreState { score: 50, current_streak: 5, best_streak: 5 });
  }

  #[test]
  fn best_streak_survives_a_miss() {
    let mut s = ScoreState::with_best(10);
    assert!(!s.record(true));
    assert!(!s.record(true));
    assert!(!s.record(false));
    assert_eq!(s, ScoreState { score: 20, current_streak: 0, best_streak: 10 });
  }

  #[test]
  fn record_reports_only_new_bests() {
    let mut s = ScoreState::default();
    assert!(s.record(true));
    assert!(s.record(true));
    s.record(false);
    assert!(!s.record(true));
    assert_eq!(s.best_streak, 2);
  }

  #[test]
  fn tally_ranks_by_count_then_first_occurrence() {
    let mut t = Tally::default();
    for k in ["b", "a", "c", "a", "c", "d"] {
      t.add(k);
    }
    assert_eq!(t.top(3), vec![("a".to_string(), 2), ("c".to_string(), 2), ("b".to_string(), 1)]);
    assert_eq!(t.get("d"), 1);
    assert_eq!(t.get("z"), 0);
  }

  #[test]
  fn accuracy_rounds() {
    let s = SessionState { correct_count: 13, ..SessionState::start() };
    assert_eq!(s.accuracy(20), 65);
    let s = SessionState { correct_count: 1, ..SessionState::start() };
    assert_eq!(s.accuracy(3), 33);
    let s = SessionState { correct_count: 2, ..SessionState::start() };
    assert_eq!(s.accuracy(3), 67);
    assert_eq!(s.accuracy(0), 0);
  }
}
