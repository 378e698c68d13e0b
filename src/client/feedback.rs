//! Feedback texts: the per-answer line and the end-of-session report.
//! Everything here is a pure function of its inputs.

use crate::domain::{Question, QuestionKind, Tense};
use crate::protocol::CheckOut;

use super::session::SessionState;

const CORRECT_MESSAGES: [&str; 5] = [
  "¡Excelente! 🎉",
  "¡Perfecto! ⭐",
  "¡Muy bien! 👏",
  "¡Increíble! 🌟",
  "¡Fantástico! 🎊",
];

const INCORRECT_MESSAGES: [&str; 4] = [
  "Not quite! Try again 💪",
  "Keep practicing! 📚",
  "Almost there! 🎯",
  "You'll get it next time! 🚀",
];

pub const TIP_LOW_ACCURACY: &str =
  "Slow down: review the conjugation tables for the tenses you missed before starting another session.";
pub const TIP_SUBJUNCTIVE: &str =
  "Subjunctive uses the opposite vowel: -ar verbs take -e endings, -er/-ir verbs take -a endings (hable, coma, viva).";
pub const TIP_IDENTIFICATION: &str =
  "For identification questions, read the ending first: it tells you the person, and the stem change tells you the tense.";

/// Per-answer feedback line. `nth` selects the encouragement so the text
/// rotates without randomness.
pub fn answer_feedback(q: &Question, correct: bool, details: Option<&CheckOut>, nth: usize) -> String {
  let mut message = if correct {
    CORRECT_MESSAGES[nth % CORRECT_MESSAGES.len()].to_string()
  } else {
    INCORRECT_MESSAGES[nth % INCORRECT_MESSAGES.len()].to_string()
  };

  if !correct {
    let label = match q.question_type {
      QuestionKind::IdentifyTense => "Correct tense",
      QuestionKind::IdentifyPronoun => "Correct pronoun",
      QuestionKind::IdentifyInfinitive => "Correct infinitive",
      QuestionKind::Conjugation => "Correct answer",
    };
    let answers = if q.all_correct_answers.is_empty() {
      q.correct_answer.clone()
    } else {
      q.all_correct_answers.join(" / ")
    };
    message.push_str(&format!(" {label}: {answers}"));
  }

  if let Some(d) = details {
    if let (Some(name), Some(desc)) = (&d.tense_name, &d.tense_description) {
      message.push_str(&format!("\n\n{name}: {desc}"));
    }
    if let Some(hint) = &d.hint {
      message.push_str(&format!("\n{hint}"));
    }
  }
  message
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackTier {
  Outstanding,
  Great,
  Good,
  KeepPracticing,
}

impl FeedbackTier {
  pub fn for_accuracy(accuracy: u32) -> Self {
    if accuracy >= 90 {
      FeedbackTier::Outstanding
    } else if accuracy >= 75 {
      FeedbackTier::Great
    } else if accuracy >= 60 {
      FeedbackTier::Good
    } else {
      FeedbackTier::KeepPracticing
    }
  }

  pub fn headline(self) -> &'static str {
    match self {
      FeedbackTier::Outstanding => "🏆 Outstanding! ¡Excelente!",
      FeedbackTier::Great => "🌟 Great job! ¡Muy bien!",
      FeedbackTier::Good => "👍 Good effort! ¡Bien hecho!",
      FeedbackTier::KeepPracticing => "💪 Keep practicing! ¡Sigue practicando!",
    }
  }

  pub fn message(self) -> &'static str {
    match self {
      FeedbackTier::Outstanding => "You have these conjugations down. Try to beat your best streak next time.",
      FeedbackTier::Great => "Solid work. A little more practice on your weak spots and you'll be perfect.",
      FeedbackTier::Good => "You're getting there. Focus on the areas below.",
      FeedbackTier::KeepPracticing => "Every session helps. Review the areas below and try again.",
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeakArea {
  pub label: String,
  pub misses: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionFeedback {
  pub tier: FeedbackTier,
  pub accuracy: u32,
  pub score: u32,
  pub headline: String,
  pub message: String,
  pub weak_tense: Option<WeakArea>,
  pub weak_question_type: Option<WeakArea>,
  pub weak_verbs: Vec<WeakArea>,
  pub tips: Vec<String>,
}

impl SessionFeedback {
  pub fn has_weak_areas(&self) -> bool {
    self.weak_tense.is_some() || self.weak_question_type.is_some() || !self.weak_verbs.is_empty()
  }
}

/// Session report: tier by accuracy (>= 90, >= 75, >= 60, else), the most
/// missed tense and question type, the three most missed verbs, and tips.
pub fn generate_feedback(accuracy: u32, session: &SessionState, score: u32) -> SessionFeedback {
  let tier = FeedbackTier::for_accuracy(accuracy);

  let weak_tense = session.errors_by_tense.top(1).into_iter().next().map(|(key, misses)| WeakArea {
    label: Tense::from_key(&key).map_or(key.clone(), |t| t.display_name().to_string()),
    misses,
  });
  let weak_question_type = session.errors_by_question_type.top(1).into_iter().next().map(|(key, misses)| WeakArea {
    label: QuestionKind::from_key(&key).map_or(key.clone(), |k| k.label().to_string()),
    misses,
  });
  let weak_verbs = session
    .errors_by_verb
    .top(3)
    .into_iter()
    .map(|(label, misses)| WeakArea { label, misses })
    .collect();

  let mut tips = Vec::new();
  if accuracy < 70 {
    tips.push(TIP_LOW_ACCURACY.to_string());
  }
  if session.errors_by_tense.keys().any(|k| Tense::from_key(k).is_some_and(Tense::is_subjunctive)) {
    tips.push(TIP_SUBJUNCTIVE.to_string());
  }
  if session
    .errors_by_question_type
    .keys()
    .any(|k| QuestionKind::from_key(k).is_some_and(QuestionKind::is_identification))
  {
    tips.push(TIP_IDENTIFICATION.to_string());
  }

  SessionFeedback {
    tier,
    accuracy,
    score,
    headline: tier.headline().to_string(),
    message: format!("{} You scored {} points with {}% accuracy.", tier.message(), score, accuracy),
    weak_tense,
    weak_question_type,
    weak_verbs,
    tips,
  }
}
