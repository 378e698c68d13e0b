//! Core behaviors behind the HTTP handlers.
//!
//! This includes:
//!   - Generating a random question of one of the four kinds
//!   - Checking an answer and attaching tense info and hints

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::conjugation::{all_forms, conjugate};
use crate::domain::{Pronoun, Question, QuestionKind, Tense, VerbEntry};
use crate::hints::hint_for;
use crate::protocol::{CheckIn, CheckOut};
use crate::state::AppState;
use crate::util::{normalize_answer, trunc_for_log};

pub const OPTION_COUNT: usize = 4;

/// Random question: verb, tense and pronoun uniformly, each kind 25%.
/// `None` only when the bank is empty.
pub fn generate_question<R: Rng>(state: &AppState, rng: &mut R) -> Option<Question> {
  let kind = QuestionKind::ALL[rng.gen_range(0..QuestionKind::ALL.len())];
  generate_question_of_kind(state, kind, rng)
}

pub fn generate_question_of_kind<R: Rng>(
  state: &AppState,
  kind: QuestionKind,
  rng: &mut R,
) -> Option<Question> {
  let verb = state.verbs.choose(rng)?;
  let tense = *Tense::ALL.choose(rng)?;
  let pronoun = *Pronoun::ALL.choose(rng)?;
  let form = conjugate(verb, tense, pronoun)?;

  let (correct, alternatives, pool) = match kind {
    QuestionKind::Conjugation => {
      let mut pool = all_forms(verb);
      pool.retain(|f| *f != form);
      (form.clone(), Vec::new(), pool)
    }
    QuestionKind::IdentifyTense => {
      // Tenses that yield the same form are accepted, never distractors.
      let (same, other): (Vec<Tense>, Vec<Tense>) = Tense::ALL
        .iter()
        .copied()
        .filter(|t| *t != tense)
        .partition(|t| conjugate(verb, *t, pronoun).as_deref() == Some(form.as_str()));
      (
        tense.display_name().to_string(),
        same.into_iter().map(|t| t.display_name().to_string()).collect(),
        other.into_iter().map(|t| t.display_name().to_string()).collect(),
      )
    }
    QuestionKind::IdentifyPronoun => {
      let (same, other): (Vec<Pronoun>, Vec<Pronoun>) = Pronoun::ALL
        .iter()
        .copied()
        .filter(|p| *p != pronoun)
        .partition(|p| conjugate(verb, tense, *p).as_deref() == Some(form.as_str()));
      (
        pronoun.as_str().to_string(),
        same.into_iter().map(|p| p.as_str().to_string()).collect(),
        other.into_iter().map(|p| p.as_str().to_string()).collect(),
      )
    }
    QuestionKind::IdentifyInfinitive => {
      let (same, other): (Vec<&VerbEntry>, Vec<&VerbEntry>) = state
        .verbs
        .iter()
        .filter(|v| v.infinitive != verb.infinitive)
        .partition(|v| conjugate(v, tense, pronoun).as_deref() == Some(form.as_str()));
      (
        verb.infinitive.clone(),
        same.into_iter().map(|v| v.infinitive.clone()).collect(),
        other.into_iter().map(|v| v.infinitive.clone()).collect(),
      )
    }
  };

  let (options, all_correct_answers) = build_options(&correct, alternatives, pool, rng);

  let q = Question {
    id: Uuid::new_v4(),
    question_type: kind,
    verb: verb.infinitive.clone(),
    english: verb.english.clone(),
    pronoun,
    tense,
    tense_name: tense.display_name().to_string(),
    conjugated_form: form,
    options,
    correct_answer: correct,
    all_correct_answers,
  };
  debug!(target: "question", id = %q.id, kind = kind.key(), verb = %q.verb, tense = tense.key(), pronoun = pronoun.as_str(), "Question generated");
  Some(q)
}

/// Correct answer + alternatives (capped so the options stay at four) +
/// distinct distractors, shuffled. Returns (options, all correct answers).
fn build_options<R: Rng>(
  correct: &str,
  alternatives: Vec<String>,
  mut pool: Vec<String>,
  rng: &mut R,
) -> (Vec<String>, Vec<String>) {
  let mut accepted = vec![correct.to_string()];
  for alt in alternatives {
    if accepted.len() == OPTION_COUNT - 1 {
      break;
    }
    if !accepted.contains(&alt) {
      accepted.push(alt);
    }
  }

  pool.sort();
  pool.dedup();
  pool.retain(|p| !accepted.contains(p));

  let mut options = accepted.clone();
  let wanted = OPTION_COUNT.saturating_sub(options.len());
  options.extend(pool.choose_multiple(rng, wanted).cloned());
  options.shuffle(rng);
  (options, accepted)
}

#[instrument(level = "info", skip(state, req), fields(question_type = %req.question_type, verb = %req.verb))]
pub fn check_answer(state: &AppState, req: &CheckIn) -> CheckOut {
  let given = normalize_answer(&req.answer);
  let correct = given == normalize_answer(&req.correct_answer)
    || req.all_correct_answers.iter().any(|a| normalize_answer(a) == given);

  let tense = Tense::from_key(&req.tense);
  let mut out = CheckOut {
    correct,
    correct_answer: req.correct_answer.clone(),
    tense_name: tense.map(|t| t.display_name().to_string()),
    tense_description: tense.map(|t| t.description().to_string()),
    hint: None,
  };

  if !correct {
    let kind = QuestionKind::from_key(&req.question_type).unwrap_or(QuestionKind::Conjugation);
    out.hint = hint_for(
      kind,
      &req.verb,
      state.get_verb(&req.verb),
      tense,
      Pronoun::from_str_opt(&req.pronoun),
    );
  }

  debug!(target: "question", answer = %trunc_for_log(&req.answer, 40), %correct, has_hint = out.hint.is_some(), "Answer checked");
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::QuizConfig;
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use std::collections::HashSet;

  fn state() -> AppState {
    AppState::from_config(QuizConfig::default())
  }

  #[test]
  fn options_hold_four_distinct_values_with_the_answer_once() {
    let state = state();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..400 {
      let q = generate_question(&state, &mut rng).unwrap();
      assert_eq!(q.options.len(), OPTION_COUNT, "{q:?}");
      let distinct: HashSet<_> = q.options.iter().collect();
      assert_eq!(distinct.len(), OPTION_COUNT, "{q:?}");
      assert_eq!(q.options.iter().filter(|o| **o == q.correct_answer).count(), 1);
      for a in &q.all_correct_answers {
        assert!(q.options.contains(a), "{q:?}");
      }
      assert!(q.all_correct_answers.contains(&q.correct_answer));
    }
  }

  #[test]
  fn conjugation_answer_matches_the_engine() {
    let state = state();
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
      let q = generate_question_of_kind(&state, QuestionKind::Conjugation, &mut rng).unwrap();
      let verb = state.get_verb(&q.verb).unwrap();
      assert_eq!(Some(q.correct_answer.clone()), conjugate(verb, q.tense, q.pronoun));
      assert_eq!(q.conjugated_form, q.correct_answer);
    }
  }

  #[test]
  fn identify_tense_distractors_never_share_the_form() {
    let state = state();
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
      let q = generate_question_of_kind(&state, QuestionKind::IdentifyTense, &mut rng).unwrap();
      assert_eq!(q.correct_answer, q.tense.display_name());
      let verb = state.get_verb(&q.verb).unwrap();
      for opt in q.options.iter().filter(|o| !q.all_correct_answers.contains(o)) {
        let t = Tense::ALL.iter().find(|t| t.display_name() == *opt).unwrap();
        assert_ne!(conjugate(verb, *t, q.pronoun).as_deref(), Some(q.conjugated_form.as_str()));
      }
    }
  }

  #[test]
  fn identify_pronoun_lists_every_pronoun_sharing_the_form() {
    let state = state();
    let mut rng = StdRng::seed_from_u64(5);
    let mut saw_ambiguous = false;
    for _ in 0..300 {
      let q = generate_question_of_kind(&state, QuestionKind::IdentifyPronoun, &mut rng).unwrap();
      let verb = state.get_verb(&q.verb).unwrap();
      let sharing: Vec<String> = Pronoun::ALL
        .iter()
        .filter(|p| conjugate(verb, q.tense, **p).as_deref() == Some(q.conjugated_form.as_str()))
        .map(|p| p.as_str().to_string())
        .collect();
      let mut listed = q.all_correct_answers.clone();
      listed.sort();
      let mut expected = sharing.clone();
      expected.sort();
      assert_eq!(listed, expected, "{q:?}");
      saw_ambiguous |= sharing.len() > 1;
    }
    assert!(saw_ambiguous, "imperfecto yo/él should come up in 300 draws");
  }

  #[test]
  fn questions_vary() {
    let state = state();
    let mut rng = StdRng::seed_from_u64(1);
    let seen: HashSet<_> = (0..10)
      .map(|_| {
        let q = generate_question(&state, &mut rng).unwrap();
        (q.verb, q.tense, q.pronoun)
      })
      .collect();
    assert!(seen.len() > 1);
  }

  #[test]
  fn check_is_case_and_space_insensitive() {
    let state = state();
    let req = CheckIn {
      answer: "  HABLO ".into(),
      correct_answer: "hablo".into(),
      tense: "presente".into(),
      ..Default::default()
    };
    let out = check_answer(&state, &req);
    assert!(out.correct);
    assert_eq!(out.correct_answer, "hablo");
    assert_eq!(out.tense_name.as_deref(), Some("Presente"));
    assert!(out.tense_description.is_some());
    assert!(out.hint.is_none());
  }

  #[test]
  fn wrong_regular_conjugation_gets_stem_hint() {
    let state = state();
    let req = CheckIn {
      answer: "hablas".into(),
      correct_answer: "hablo".into(),
      tense: "presente".into(),
      verb: "hablar".into(),
      pronoun: "yo".into(),
      question_type: "conjugation".into(),
      ..Default::default()
    };
    let out = check_answer(&state, &req);
    assert!(!out.correct);
    assert_eq!(out.hint.as_deref(), Some("💡 Hint: For regular -ar verbs in Presente, use stem 'habl' + '-o'"));
  }

  #[test]
  fn alternative_pronoun_counts_as_correct() {
    let state = state();
    let req = CheckIn {
      answer: "él/ella".into(),
      correct_answer: "yo".into(),
      question_type: "identify-pronoun".into(),
      all_correct_answers: vec!["yo".into(), "él/ella".into()],
      ..Default::default()
    };
    assert!(check_answer(&state, &req).correct);
  }

  #[test]
  fn bare_request_does_not_break() {
    let out = check_answer(&state(), &CheckIn::default());
    assert!(out.correct);
    assert!(out.tense_name.is_none() && out.hint.is_none());
  }
}
