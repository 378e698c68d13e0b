//! Declarative view-models for whatever front end drives the controller.
//! One render function per question kind; no business logic lives here.

use crate::domain::{Question, QuestionKind};

use super::backend::QuizBackend;
use super::controller::{AnswerOutcome, Phase, SessionController, SessionSummary};
use super::storage::ClientStorage;

pub const MASKED_INFINITIVE: &str = "???";
pub const MASKED_GLOSS: &str = "(hidden)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
  /// Question still open.
  Open,
  /// One of the accepted answers, chosen or not.
  Correct,
  /// Chosen but wrong.
  Wrong,
  /// Answered; neither chosen nor correct.
  Inactive,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionView {
  /// 1-based, matching the digit key that selects it.
  pub number: usize,
  pub text: String,
  pub mark: OptionMark,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerView {
  pub correct: bool,
  pub feedback: String,
  pub new_best: bool,
  /// False when the check endpoint could not be reached.
  pub explained: bool,
  /// This answer ended the session.
  pub session_over: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionView {
  pub badge: String,
  pub title: String,
  pub subtitle: String,
  pub heading: String,
  pub prompt: String,
  pub options: Vec<OptionView>,
  pub answer: Option<AnswerView>,
  /// "Next" is offered once the question is answered.
  pub can_advance: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreboardView {
  pub score: u32,
  pub streak: u32,
  pub best_streak: u32,
  pub progress_percent: u32,
  /// "Question 3 / 20" while a session runs.
  pub session_label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryView {
  pub headline: String,
  pub message: String,
  pub stats: String,
  /// Empty when nothing was missed.
  pub weak_areas: Vec<String>,
  pub tips: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
  Loading,
  Error(String),
  Question(QuestionView),
  Summary(SummaryView),
}

fn render_conjugation(q: &Question) -> QuestionView {
  QuestionView {
    badge: q.tense_name.clone(),
    title: q.verb.clone(),
    subtitle: q.english.clone(),
    heading: "Conjugate for:".into(),
    prompt: q.pronoun.as_str().into(),
    ..QuestionView::empty()
  }
}

fn render_identify_tense(q: &Question) -> QuestionView {
  QuestionView {
    badge: format!("❓ {}", QuestionKind::IdentifyTense.label()),
    title: q.verb.clone(),
    subtitle: q.english.clone(),
    heading: "What tense is this conjugation?".into(),
    prompt: format!("{} {}", q.pronoun.as_str(), q.conjugated_form),
    ..QuestionView::empty()
  }
}

fn render_identify_pronoun(q: &Question) -> QuestionView {
  QuestionView {
    badge: q.tense_name.clone(),
    title: q.verb.clone(),
    subtitle: q.english.clone(),
    heading: "Which pronoun is this conjugation for?".into(),
    prompt: format!("? {}", q.conjugated_form),
    ..QuestionView::empty()
  }
}

fn render_identify_infinitive(q: &Question) -> QuestionView {
  QuestionView {
    badge: format!("🔍 {} · {}", QuestionKind::IdentifyInfinitive.label(), q.tense_name),
    title: MASKED_INFINITIVE.into(),
    subtitle: MASKED_GLOSS.into(),
    heading: "Which verb is this conjugation from?".into(),
    prompt: format!("{} {}", q.pronoun.as_str(), q.conjugated_form),
    ..QuestionView::empty()
  }
}

impl QuestionView {
  fn empty() -> Self {
    Self {
      badge: String::new(),
      title: String::new(),
      subtitle: String::new(),
      heading: String::new(),
      prompt: String::new(),
      options: Vec::new(),
      answer: None,
      can_advance: false,
    }
  }
}

/// Render a question, marking options when it has been answered.
pub fn render_question(q: &Question, outcome: Option<&AnswerOutcome>) -> QuestionView {
  let mut view = match q.question_type {
    QuestionKind::Conjugation => render_conjugation(q),
    QuestionKind::IdentifyTense => render_identify_tense(q),
    QuestionKind::IdentifyPronoun => render_identify_pronoun(q),
    QuestionKind::IdentifyInfinitive => render_identify_infinitive(q),
  };

  view.options = q
    .options
    .iter()
    .enumerate()
    .map(|(i, text)| OptionView { number: i + 1, text: text.clone(), mark: mark_for(text, outcome) })
    .collect();
  view.answer = outcome.map(|o| AnswerView {
    correct: o.correct,
    feedback: o.feedback.clone(),
    new_best: o.new_best,
    explained: o.details.is_some(),
    session_over: o.summary_due,
  });
  view.can_advance = outcome.is_some();
  view
}

fn mark_for(option: &str, outcome: Option<&AnswerOutcome>) -> OptionMark {
  match outcome {
    None => OptionMark::Open,
    Some(o) if o.correct_answers.iter().any(|a| a == option) => OptionMark::Correct,
    Some(o) if o.chosen == option => OptionMark::Wrong,
    Some(_) => OptionMark::Inactive,
  }
}

pub fn render_summary(s: &SessionSummary) -> SummaryView {
  let fb = &s.feedback;
  let mut weak_areas = Vec::new();
  if fb.has_weak_areas() {
    if let Some(t) = &fb.weak_tense {
      weak_areas.push(format!("Tense: {} ({} missed)", t.label, t.misses));
    }
    if let Some(k) = &fb.weak_question_type {
      weak_areas.push(format!("Question type: {} ({} missed)", k.label, k.misses));
    }
    if !fb.weak_verbs.is_empty() {
      let verbs: Vec<String> = fb.weak_verbs.iter().map(|v| format!("{} ({})", v.label, v.misses)).collect();
      weak_areas.push(format!("Verbs: {}", verbs.join(", ")));
    }
  }
  SummaryView {
    headline: fb.headline.clone(),
    message: fb.message.clone(),
    stats: format!(
      "{}/{} correct · {} missed · {}% accuracy · {} points",
      s.correct, s.total, s.incorrect, s.accuracy, fb.score
    ),
    weak_areas,
    tips: fb.tips.clone(),
  }
}

pub fn render_scoreboard<B: QuizBackend, S: ClientStorage>(c: &SessionController<B, S>) -> ScoreboardView {
  let session = c.session();
  let session_label = session
    .active
    .then(|| format!("Question {} / {}", (session.questions_seen + 1).min(c.settings().length), c.settings().length));
  ScoreboardView {
    score: c.score().score,
    streak: c.score().current_streak,
    best_streak: c.score().best_streak,
    progress_percent: c.progress_percent(),
    session_label,
  }
}

/// Everything the main area should show right now.
pub fn render_screen<B: QuizBackend, S: ClientStorage>(c: &SessionController<B, S>) -> Screen {
  match (c.phase(), c.summary(), c.current_question()) {
    (Phase::SessionComplete, Some(summary), _) => Screen::Summary(render_summary(summary)),
    (_, _, Some(q)) => Screen::Question(render_question(q, c.last_outcome())),
    _ => match c.load_error() {
      Some(e) => Screen::Error(e.to_string()),
      None => Screen::Loading,
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::client::controller::tests::{ambiguous_pronoun, conjugation, FakeBackend};
  use crate::client::controller::LOAD_ERROR_TEXT;
  use crate::client::storage::MemoryStorage;
  use crate::config::SessionSettings;

  fn controller(qs: Vec<Question>) -> SessionController<FakeBackend, MemoryStorage> {
    let settings = SessionSettings { length: 2, summary_delay_ms: 0 };
    SessionController::new(FakeBackend::with_questions(qs), MemoryStorage::default(), settings)
  }

  #[test]
  fn each_kind_has_its_own_prompt() {
    let mut q = conjugation(0);
    let v = render_question(&q, None);
    assert_eq!((v.badge.as_str(), v.heading.as_str(), v.prompt.as_str()), ("Presente", "Conjugate for:", "yo"));
    assert!(v.options.iter().all(|o| o.mark == OptionMark::Open));
    assert!(!v.can_advance);

    q.question_type = QuestionKind::IdentifyTense;
    let v = render_question(&q, None);
    assert_eq!(v.badge, "❓ Identify the Tense");
    assert_eq!(v.prompt, "yo hablo");

    q.question_type = QuestionKind::IdentifyPronoun;
    assert_eq!(render_question(&q, None).prompt, "? hablo");

    q.question_type = QuestionKind::IdentifyInfinitive;
    let v = render_question(&q, None);
    assert_eq!(v.title, MASKED_INFINITIVE);
    assert_eq!(v.subtitle, MASKED_GLOSS);
    assert!(!v.badge.contains(&q.verb));
  }

  #[tokio::test]
  async fn answered_question_marks_chosen_and_every_correct_option() {
    let mut c = controller(vec![ambiguous_pronoun()]);
    c.load_question().await;
    c.select_answer("ellos").await;
    let Screen::Question(v) = render_screen(&c) else { panic!("expected a question screen") };
    let marks: Vec<(&str, OptionMark)> = v.options.iter().map(|o| (o.text.as_str(), o.mark)).collect();
    assert_eq!(
      marks,
      vec![
        ("tú", OptionMark::Inactive),
        ("él/ella", OptionMark::Correct),
        ("yo", OptionMark::Correct),
        ("ellos", OptionMark::Wrong),
      ]
    );
    assert!(v.can_advance);
    let answer = v.answer.unwrap();
    assert!(!answer.correct);
    assert!(answer.explained);
    assert!(!answer.session_over);
  }

  #[tokio::test]
  async fn screens_follow_the_phase() {
    let mut c = controller(vec![conjugation(0), conjugation(1)]);
    assert_eq!(render_screen(&c), Screen::Loading);

    c.start_session();
    assert_eq!(render_scoreboard(&c).session_label.as_deref(), Some("Question 1 / 2"));
    for _ in 0..2 {
      c.load_question().await;
      c.select_answer("hablo").await;
    }
    c.await_summary().await;
    let Screen::Summary(s) = render_screen(&c) else { panic!("expected the summary") };
    assert!(s.weak_areas.is_empty());
    assert_eq!(s.stats, "2/2 correct · 0 missed · 100% accuracy · 20 points");

    let board = render_scoreboard(&c);
    assert_eq!((board.score, board.streak, board.progress_percent), (20, 2, 100));
    assert_eq!(board.session_label, None);

    c.close_session();
    c.load_question().await;
    assert_eq!(render_screen(&c), Screen::Error(LOAD_ERROR_TEXT.into()));
  }
}
