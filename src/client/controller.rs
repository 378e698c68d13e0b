//! Quiz session state machine.
//!
//! Phases: awaiting-question -> question-displayed -> answered -> (next
//! question | session-complete). Question fetches and answer checks are the
//! only suspension points; `&mut self` keeps them strictly sequential.

use tracing::{debug, info, instrument, warn};

use crate::config::SessionSettings;
use crate::domain::Question;
use crate::protocol::{CheckIn, CheckOut};

use super::backend::QuizBackend;
use super::feedback::{answer_feedback, generate_feedback, SessionFeedback};
use super::session::{ScoreState, SessionState};
use super::storage::{read_best_streak, ClientStorage, BEST_STREAK_KEY};

pub const LOAD_ERROR_TEXT: &str = "Error loading question";

/// Free practice fills the progress bar in blocks of this many answers.
const FREE_PRACTICE_BLOCK: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
  AwaitingQuestion,
  QuestionDisplayed,
  Answered,
  SessionComplete,
}

/// Result of one answer, kept until the next question loads.
#[derive(Clone, Debug, PartialEq)]
pub struct AnswerOutcome {
  pub chosen: String,
  pub correct: bool,
  /// Every option to highlight as correct.
  pub correct_answers: Vec<String>,
  pub feedback: String,
  /// Server enrichment; `None` when the check endpoint was unreachable.
  pub details: Option<CheckOut>,
  pub new_best: bool,
  pub summary_due: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionSummary {
  pub total: u32,
  pub correct: u32,
  pub incorrect: u32,
  pub accuracy: u32,
  pub feedback: SessionFeedback,
}

pub struct SessionController<B, S> {
  backend: B,
  storage: S,
  settings: SessionSettings,
  phase: Phase,
  current: Option<Question>,
  answer_locked: bool,
  load_error: Option<String>,
  score: ScoreState,
  session: SessionState,
  answered_total: u32,
  last_outcome: Option<AnswerOutcome>,
  summary: Option<SessionSummary>,
}

impl<B: QuizBackend, S: ClientStorage> SessionController<B, S> {
  /// Build a controller; the best streak is read from storage once, here.
  pub fn new(backend: B, storage: S, settings: SessionSettings) -> Self {
    let best = read_best_streak(&storage).unwrap_or(0);
    debug!(target: "verbos_backend", best, "Best streak loaded");
    Self {
      backend,
      storage,
      settings,
      phase: Phase::AwaitingQuestion,
      current: None,
      answer_locked: false,
      load_error: None,
      score: ScoreState::with_best(best),
      session: SessionState::default(),
      answered_total: 0,
      last_outcome: None,
      summary: None,
    }
  }

  pub fn phase(&self) -> Phase { self.phase }
  pub fn current_question(&self) -> Option<&Question> { self.current.as_ref() }
  pub fn score(&self) -> &ScoreState { &self.score }
  pub fn session(&self) -> &SessionState { &self.session }
  pub fn settings(&self) -> &SessionSettings { &self.settings }
  pub fn load_error(&self) -> Option<&str> { self.load_error.as_deref() }
  pub fn last_outcome(&self) -> Option<&AnswerOutcome> { self.last_outcome.as_ref() }
  pub fn summary(&self) -> Option<&SessionSummary> { self.summary.as_ref() }

  /// Whether an answer may still be selected for the current question.
  pub fn can_answer(&self) -> bool {
    self.phase == Phase::QuestionDisplayed && !self.answer_locked
  }

  /// Begin a fresh session: counters, score and streak reset; best streak kept.
  pub fn start_session(&mut self) {
    self.session = SessionState::start();
    self.score.reset_run();
    self.summary = None;
    if self.phase == Phase::SessionComplete {
      self.phase = Phase::AwaitingQuestion;
    }
    info!(target: "verbos_backend", length = self.settings.length, "Session started");
  }

  /// Leave the session (or its summary) and return to free practice.
  pub fn close_session(&mut self) {
    self.session = SessionState::default();
    self.summary = None;
    if self.phase == Phase::SessionComplete {
      self.phase = Phase::AwaitingQuestion;
    }
    info!(target: "verbos_backend", "Session closed");
  }

  /// Fetch the next question. A failure leaves the controller waiting with
  /// an error message; nothing is retried until the next manual request.
  #[instrument(level = "debug", skip(self))]
  pub async fn load_question(&mut self) -> bool {
    if self.phase == Phase::SessionComplete || self.summary_due() {
      debug!(target: "verbos_backend", "Ignoring load request on a finished session");
      return false;
    }
    self.phase = Phase::AwaitingQuestion;
    self.answer_locked = false;
    self.current = None;
    self.last_outcome = None;

    match self.backend.fetch_question().await {
      Ok(q) => {
        debug!(target: "verbos_backend", id = %q.id, kind = q.question_type.key(), "Question displayed");
        self.current = Some(q);
        self.load_error = None;
        self.phase = Phase::QuestionDisplayed;
        true
      }
      Err(e) => {
        warn!(target: "verbos_backend", error = %e, "Question fetch failed");
        self.load_error = Some(LOAD_ERROR_TEXT.to_string());
        false
      }
    }
  }

  /// Answer by option position (0-based).
  pub async fn select_option(&mut self, index: usize) -> Option<&AnswerOutcome> {
    let answer = self.current.as_ref()?.options.get(index)?.clone();
    self.select_answer(&answer).await
  }

  /// Answer the current question once. Correctness is decided locally; the
  /// server only contributes explanatory text, and an unreachable server
  /// changes nothing but that text.
  pub async fn select_answer(&mut self, answer: &str) -> Option<&AnswerOutcome> {
    if !self.can_answer() {
      return None;
    }
    let q = self.current.clone()?;
    self.answer_locked = true;

    let correct = q.accepts(answer);
    let details = match self.backend.check_answer(&CheckIn::for_question(&q, answer)).await {
      Ok(out) => {
        if out.correct != correct {
          warn!(target: "verbos_backend", id = %q.id, local = correct, server = out.correct, "Server disagrees with local check; keeping local result");
        }
        Some(out)
      }
      Err(e) => {
        warn!(target: "verbos_backend", error = %e, "Answer check failed; using local result");
        None
      }
    };

    self.apply_answer(&q, answer, correct, details);
    self.last_outcome.as_ref()
  }

  fn apply_answer(&mut self, q: &Question, answer: &str, correct: bool, details: Option<CheckOut>) {
    let new_best = self.score.record(correct);
    if new_best {
      if let Err(e) = self.storage.set(BEST_STREAK_KEY, &self.score.best_streak.to_string()) {
        warn!(target: "verbos_backend", error = %e, "Failed to persist best streak");
      }
    }

    if self.session.active && self.session.questions_seen < self.settings.length {
      self.session.record(q, correct);
    }
    let summary_due = self.session.active && self.session.questions_seen >= self.settings.length;

    let feedback = answer_feedback(q, correct, details.as_ref(), self.answered_total as usize);
    self.answered_total += 1;

    let mut correct_answers = q.all_correct_answers.clone();
    if !correct_answers.contains(&q.correct_answer) {
      correct_answers.insert(0, q.correct_answer.clone());
    }

    info!(target: "verbos_backend", id = %q.id, correct, score = self.score.score, streak = self.score.current_streak, "Answer recorded");
    self.last_outcome = Some(AnswerOutcome {
      chosen: answer.to_string(),
      correct,
      correct_answers,
      feedback,
      details,
      new_best,
      summary_due,
    });
    self.phase = Phase::Answered;
  }

  /// True once the session has reached its length and the summary is pending.
  pub fn summary_due(&self) -> bool {
    self.session.active && self.session.questions_seen >= self.settings.length && self.summary.is_none()
  }

  /// Wait the configured delay, then compute the summary.
  pub async fn await_summary(&mut self) -> Option<&SessionSummary> {
    if !self.summary_due() {
      return None;
    }
    tokio::time::sleep(self.settings.summary_delay()).await;
    self.complete_session()
  }

  /// Compute the summary and end the session, if it has reached its length.
  pub fn complete_session(&mut self) -> Option<&SessionSummary> {
    if !self.summary_due() {
      return None;
    }
    let accuracy = self.session.accuracy(self.settings.length);
    let feedback = generate_feedback(accuracy, &self.session, self.score.score);
    info!(target: "verbos_backend", accuracy, score = self.score.score, tier = ?feedback.tier, "Session complete");
    self.summary = Some(SessionSummary {
      total: self.settings.length,
      correct: self.session.correct_count,
      incorrect: self.session.incorrect_count,
      accuracy,
      feedback,
    });
    self.session.active = false;
    self.phase = Phase::SessionComplete;
    self.summary.as_ref()
  }

  /// Progress bar fill, 0..=100. Sessions count toward their length; free
  /// practice fills in blocks of ten answers.
  pub fn progress_percent(&self) -> u32 {
    if self.session.active || self.summary.is_some() {
      let len = self.settings.length.max(1);
      (self.session.questions_seen.min(len) * 100) / len
    } else {
      (self.answered_total % FREE_PRACTICE_BLOCK) * (100 / FREE_PRACTICE_BLOCK)
    }
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;
  use crate::client::backend::ClientError;
  use crate::client::storage::MemoryStorage;
  use crate::domain::{Pronoun, QuestionKind, Tense};
  use std::collections::VecDeque;
  use std::sync::Mutex;
  use uuid::Uuid;

  /// In-memory backend: serves queued questions, optionally failing checks.
  #[derive(Default)]
  pub(crate) struct FakeBackend {
    pub questions: Mutex<VecDeque<Question>>,
    pub check_fails: bool,
    pub server_says: Option<bool>,
    pub checks: Mutex<Vec<CheckIn>>,
  }

  impl FakeBackend {
    pub fn with_questions(qs: Vec<Question>) -> Self {
      Self { questions: Mutex::new(qs.into()), ..Self::default() }
    }
  }

  fn offline() -> ClientError {
    ClientError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE)
  }

  impl QuizBackend for FakeBackend {
    async fn fetch_question(&self) -> Result<Question, ClientError> {
      self.questions.lock().unwrap().pop_front().ok_or_else(offline)
    }

    async fn check_answer(&self, req: &CheckIn) -> Result<CheckOut, ClientError> {
      self.checks.lock().unwrap().push(req.clone());
      if self.check_fails {
        return Err(offline());
      }
      Ok(CheckOut {
        correct: self.server_says.unwrap_or(req.answer == req.correct_answer),
        correct_answer: req.correct_answer.clone(),
        tense_name: Some("Presente".into()),
        tense_description: Some("Now.".into()),
        hint: None,
      })
    }
  }

  pub(crate) fn conjugation(n: usize) -> Question {
    Question {
      id: Uuid::new_v4(),
      question_type: QuestionKind::Conjugation,
      verb: format!("verb{n}"),
      english: "to test".into(),
      pronoun: Pronoun::Yo,
      tense: Tense::Presente,
      tense_name: "Presente".into(),
      conjugated_form: "hablo".into(),
      options: vec!["hablo".into(), "hablas".into(), "habla".into(), "hablan".into()],
      correct_answer: "hablo".into(),
      all_correct_answers: vec!["hablo".into()],
    }
  }

  pub(crate) fn ambiguous_pronoun() -> Question {
    Question {
      id: Uuid::new_v4(),
      question_type: QuestionKind::IdentifyPronoun,
      verb: "hablar".into(),
      english: "to speak".into(),
      pronoun: Pronoun::Yo,
      tense: Tense::Imperfecto,
      tense_name: "Imperfecto".into(),
      conjugated_form: "hablaba".into(),
      options: vec!["tú".into(), "él/ella".into(), "yo".into(), "ellos".into()],
      correct_answer: "yo".into(),
      all_correct_answers: vec!["yo".into(), "él/ella".into()],
    }
  }

  fn settings(length: u32) -> SessionSettings {
    SessionSettings { length, summary_delay_ms: 0 }
  }

  fn controller(backend: FakeBackend) -> SessionController<FakeBackend, MemoryStorage> {
    SessionController::new(backend, MemoryStorage::default(), settings(20))
  }

  #[tokio::test]
  async fn best_streak_is_read_from_storage() {
    let mut storage = MemoryStorage::default();
    storage.set(BEST_STREAK_KEY, "9").unwrap();
    let c = SessionController::new(FakeBackend::default(), storage, settings(20));
    assert_eq!(c.score().best_streak, 9);
  }

  #[tokio::test]
  async fn consecutive_correct_answers_score_and_persist() {
    let qs = (0..5).map(conjugation).collect();
    let mut c = controller(FakeBackend::with_questions(qs));
    for _ in 0..5 {
      assert!(c.load_question().await);
      let out = c.select_answer("hablo").await.unwrap();
      assert!(out.correct);
    }
    assert_eq!(*c.score(), ScoreState { score: 50, current_streak: 5, best_streak: 5 });
    assert_eq!(read_best_streak(&c.storage), Some(5));
  }

  #[tokio::test]
  async fn miss_resets_streak_and_keeps_score() {
    let qs = (0..3).map(conjugation).collect();
    let mut c = controller(FakeBackend::with_questions(qs));
    c.load_question().await;
    c.select_answer("hablo").await;
    c.load_question().await;
    c.select_answer("hablo").await;
    c.load_question().await;
    let out = c.select_answer("hablas").await.unwrap().clone();
    assert!(!out.correct);
    assert_eq!(out.correct_answers, vec!["hablo".to_string()]);
    assert!(out.feedback.contains("Correct answer: hablo"));
    assert_eq!(*c.score(), ScoreState { score: 20, current_streak: 0, best_streak: 2 });
  }

  #[tokio::test]
  async fn answering_is_one_shot() {
    let backend = FakeBackend::with_questions(vec![conjugation(0)]);
    let mut c = controller(backend);
    c.load_question().await;
    assert!(c.select_answer("hablas").await.is_some());
    assert!(c.select_answer("hablo").await.is_none());
    assert!(c.select_option(0).await.is_none());
    assert_eq!(c.score().score, 0);
    assert_eq!(c.backend.checks.lock().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn unreachable_check_keeps_scoring_but_drops_explanations() {
    let backend = FakeBackend { check_fails: true, ..FakeBackend::with_questions(vec![conjugation(0)]) };
    let mut c = controller(backend);
    c.load_question().await;
    let out = c.select_answer("hablo").await.unwrap().clone();
    assert!(out.correct);
    assert!(out.details.is_none());
    assert!(!out.feedback.contains("Presente"));
    assert_eq!(c.score().score, 10);
    assert_eq!(c.score().current_streak, 1);
    assert_eq!(c.phase(), Phase::Answered);
  }

  #[tokio::test]
  async fn server_disagreement_is_not_reconciled() {
    let backend = FakeBackend { server_says: Some(false), ..FakeBackend::with_questions(vec![conjugation(0)]) };
    let mut c = controller(backend);
    c.load_question().await;
    assert!(c.select_answer("hablo").await.unwrap().correct);
    assert_eq!(c.score().score, 10);
  }

  #[tokio::test]
  async fn either_valid_pronoun_is_correct() {
    for pick in ["yo", "él/ella"] {
      let mut c = controller(FakeBackend::with_questions(vec![ambiguous_pronoun()]));
      c.load_question().await;
      assert!(c.select_answer(pick).await.unwrap().correct, "{pick}");
    }

    let mut c = controller(FakeBackend::with_questions(vec![ambiguous_pronoun()]));
    c.load_question().await;
    let out = c.select_option(0).await.unwrap();
    assert!(!out.correct);
    assert_eq!(out.chosen, "tú");
    assert_eq!(out.correct_answers, vec!["yo".to_string(), "él/ella".to_string()]);
  }

  #[tokio::test]
  async fn fetch_failure_shows_error_until_manual_reload() {
    let mut c = controller(FakeBackend::default());
    assert!(!c.load_question().await);
    assert_eq!(c.phase(), Phase::AwaitingQuestion);
    assert_eq!(c.load_error(), Some(LOAD_ERROR_TEXT));
    assert!(c.select_answer("hablo").await.is_none());

    c.backend.questions.lock().unwrap().push_back(conjugation(1));
    assert!(c.load_question().await);
    assert_eq!(c.load_error(), None);
    assert_eq!(c.phase(), Phase::QuestionDisplayed);
  }

  #[tokio::test]
  async fn errors_are_tallied_only_inside_a_session() {
    let qs = (0..2).map(conjugation).collect();
    let mut c = controller(FakeBackend::with_questions(qs));
    c.load_question().await;
    c.select_answer("hablas").await;
    assert_eq!(c.session().questions_seen, 0);
    assert_eq!(c.session().errors_by_verb.get("verb0"), 0);

    c.start_session();
    c.load_question().await;
    c.select_answer("hablas").await;
    assert_eq!(c.session().questions_seen, 1);
    assert_eq!(c.session().incorrect_count, 1);
    assert_eq!(c.session().errors_by_verb.get("verb1"), 1);
    assert_eq!(c.session().errors_by_tense.get("presente"), 1);
  }

  #[tokio::test]
  async fn perfect_session_completes_at_twenty() {
    let qs = (0..21).map(conjugation).collect();
    let mut c = controller(FakeBackend::with_questions(qs));
    c.start_session();
    for i in 0..20 {
      assert!(c.load_question().await);
      let out = c.select_answer("hablo").await.unwrap();
      assert_eq!(out.summary_due, i == 19);
    }
    assert!(c.summary_due());
    let summary = c.await_summary().await.unwrap().clone();
    assert_eq!(summary.accuracy, 100);
    assert_eq!(summary.correct, 20);
    assert_eq!(summary.feedback.score, 200);
    assert!(summary.feedback.headline.contains("Excelente"));
    assert!(!summary.feedback.has_weak_areas());
    assert_eq!(c.phase(), Phase::SessionComplete);
    assert_eq!(c.progress_percent(), 100);

    // Completed sessions stay on the summary until restarted or closed.
    assert!(!c.load_question().await);
    c.close_session();
    assert!(c.load_question().await);
  }

  #[tokio::test]
  async fn nothing_is_counted_past_the_session_length() {
    let qs = (0..25).map(conjugation).collect();
    let mut c = controller(FakeBackend::with_questions(qs));
    c.start_session();
    for _ in 0..20 {
      c.load_question().await;
      c.select_answer("hablo").await;
    }
    assert!(c.summary_due());
    assert!(!c.load_question().await);
    assert!(c.select_answer("hablo").await.is_none());
    assert_eq!(c.phase(), Phase::Answered);

    let summary = c.complete_session().unwrap();
    assert_eq!(summary.correct, 20);
    assert_eq!(summary.accuracy, 100);
    assert_eq!(c.session().questions_seen, 20);
    assert_eq!(c.score().score, 200);
  }

  #[tokio::test]
  async fn mixed_session_accuracy_rounds() {
    let qs = (0..13).map(conjugation).collect();
    let mut c = SessionController::new(FakeBackend::with_questions(qs), MemoryStorage::default(), settings(3));
    c.start_session();
    for answer in ["hablo", "hablas", "hablo"] {
      c.load_question().await;
      c.select_answer(answer).await;
    }
    let summary = c.complete_session().unwrap();
    assert_eq!(summary.accuracy, 67);
    assert_eq!(summary.incorrect, 1);
    assert_eq!(summary.feedback.weak_verbs.len(), 1);
  }

  #[tokio::test]
  async fn restart_resets_counters_but_not_best() {
    let qs = (0..3).map(conjugation).collect();
    let mut c = controller(FakeBackend::with_questions(qs));
    c.start_session();
    c.load_question().await;
    c.select_answer("hablo").await;
    c.start_session();
    assert_eq!(c.session().questions_seen, 0);
    assert_eq!(c.score().score, 0);
    assert_eq!(c.score().best_streak, 1);
    assert!(c.complete_session().is_none());
  }

  #[tokio::test]
  async fn free_practice_progress_wraps_every_ten() {
    let qs = (0..12).map(conjugation).collect();
    let mut c = controller(FakeBackend::with_questions(qs));
    for _ in 0..12 {
      c.load_question().await;
      c.select_answer("hablo").await;
    }
    assert_eq!(c.progress_percent(), 20);
  }
}
