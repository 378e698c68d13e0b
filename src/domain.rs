//! Domain models shared by the question service and the session controller:
//! tenses, pronouns, question kinds, verb bank entries and the question itself.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The ten tenses drilled by the game, in presentation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tense {
  #[serde(rename = "presente")]
  Presente,
  #[serde(rename = "pretérito")]
  Preterito,
  #[serde(rename = "imperfecto")]
  Imperfecto,
  #[serde(rename = "futuro")]
  Futuro,
  #[serde(rename = "condicional")]
  Condicional,
  #[serde(rename = "perfecto")]
  Perfecto,
  #[serde(rename = "pluscuamperfecto")]
  Pluscuamperfecto,
  #[serde(rename = "futuro perfecto")]
  FuturoPerfecto,
  #[serde(rename = "presente subjuntivo")]
  PresenteSubjuntivo,
  #[serde(rename = "imperfecto subjuntivo")]
  ImperfectoSubjuntivo,
}

impl Tense {
  pub const ALL: [Tense; 10] = [
    Tense::Presente,
    Tense::Preterito,
    Tense::Imperfecto,
    Tense::Futuro,
    Tense::Condicional,
    Tense::Perfecto,
    Tense::Pluscuamperfecto,
    Tense::FuturoPerfecto,
    Tense::PresenteSubjuntivo,
    Tense::ImperfectoSubjuntivo,
  ];

  /// Wire key, e.g. "presente subjuntivo".
  pub fn key(self) -> &'static str {
    match self {
      Tense::Presente => "presente",
      Tense::Preterito => "pretérito",
      Tense::Imperfecto => "imperfecto",
      Tense::Futuro => "futuro",
      Tense::Condicional => "condicional",
      Tense::Perfecto => "perfecto",
      Tense::Pluscuamperfecto => "pluscuamperfecto",
      Tense::FuturoPerfecto => "futuro perfecto",
      Tense::PresenteSubjuntivo => "presente subjuntivo",
      Tense::ImperfectoSubjuntivo => "imperfecto subjuntivo",
    }
  }

  pub fn from_key(key: &str) -> Option<Tense> {
    Tense::ALL.iter().copied().find(|t| t.key() == key)
  }

  pub fn display_name(self) -> &'static str {
    match self {
      Tense::Presente => "Presente",
      Tense::Preterito => "Pretérito",
      Tense::Imperfecto => "Imperfecto",
      Tense::Futuro => "Futuro",
      Tense::Condicional => "Condicional",
      Tense::Perfecto => "Pretérito Perfecto",
      Tense::Pluscuamperfecto => "Pluscuamperfecto",
      Tense::FuturoPerfecto => "Futuro Perfecto",
      Tense::PresenteSubjuntivo => "Presente de Subjuntivo",
      Tense::ImperfectoSubjuntivo => "Imperfecto de Subjuntivo",
    }
  }

  pub fn description(self) -> &'static str {
    match self {
      Tense::Presente => "Used for current actions, habitual actions, and general truths.",
      Tense::Preterito => "Used for completed actions in the past with a specific time frame.",
      Tense::Imperfecto => "Used for ongoing past actions, habitual past actions, and descriptions in the past.",
      Tense::Futuro => "Used for actions that will happen in the future.",
      Tense::Condicional => "Used for hypothetical situations, polite requests, and future actions from a past perspective.",
      Tense::Perfecto => "Used for actions that happened in the recent past or have relevance to the present.",
      Tense::Pluscuamperfecto => "Used for actions that had happened before another past action.",
      Tense::FuturoPerfecto => "Used for actions that will have been completed by a certain point in the future.",
      Tense::PresenteSubjuntivo => "Used to express wishes, doubts, emotions, recommendations, and uncertainty in present or future contexts.",
      Tense::ImperfectoSubjuntivo => "Used for hypothetical situations, wishes in the past, \"if\" clauses, and polite requests.",
    }
  }

  pub fn is_subjunctive(self) -> bool {
    matches!(self, Tense::PresenteSubjuntivo | Tense::ImperfectoSubjuntivo)
  }

  /// Compound tenses are built from a form of "haber" plus the participle.
  pub fn is_compound(self) -> bool {
    matches!(self, Tense::Perfecto | Tense::Pluscuamperfecto | Tense::FuturoPerfecto)
  }
}

/// Grammatical person, in conjugation-table order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pronoun {
  #[serde(rename = "yo")]
  Yo,
  #[serde(rename = "tú")]
  Tu,
  #[serde(rename = "él/ella")]
  El,
  #[serde(rename = "nosotros")]
  Nosotros,
  #[serde(rename = "vosotros")]
  Vosotros,
  #[serde(rename = "ellos")]
  Ellos,
}

impl Pronoun {
  pub const ALL: [Pronoun; 6] = [
    Pronoun::Yo,
    Pronoun::Tu,
    Pronoun::El,
    Pronoun::Nosotros,
    Pronoun::Vosotros,
    Pronoun::Ellos,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Pronoun::Yo => "yo",
      Pronoun::Tu => "tú",
      Pronoun::El => "él/ella",
      Pronoun::Nosotros => "nosotros",
      Pronoun::Vosotros => "vosotros",
      Pronoun::Ellos => "ellos",
    }
  }

  /// Row index into a six-form conjugation table.
  pub fn index(self) -> usize {
    match self {
      Pronoun::Yo => 0,
      Pronoun::Tu => 1,
      Pronoun::El => 2,
      Pronoun::Nosotros => 3,
      Pronoun::Vosotros => 4,
      Pronoun::Ellos => 5,
    }
  }

  pub fn from_str_opt(s: &str) -> Option<Pronoun> {
    Pronoun::ALL.iter().copied().find(|p| p.as_str() == s)
  }
}

/// Which of the four quiz modes a question uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
  /// Pick the conjugated form for a verb, tense and pronoun.
  Conjugation,
  IdentifyTense,
  IdentifyPronoun,
  /// Pick the infinitive of a conjugated form; verb and gloss are masked.
  IdentifyInfinitive,
}

impl QuestionKind {
  pub const ALL: [QuestionKind; 4] = [
    QuestionKind::Conjugation,
    QuestionKind::IdentifyTense,
    QuestionKind::IdentifyPronoun,
    QuestionKind::IdentifyInfinitive,
  ];

  pub fn key(self) -> &'static str {
    match self {
      QuestionKind::Conjugation => "conjugation",
      QuestionKind::IdentifyTense => "identify-tense",
      QuestionKind::IdentifyPronoun => "identify-pronoun",
      QuestionKind::IdentifyInfinitive => "identify-infinitive",
    }
  }

  pub fn from_key(key: &str) -> Option<QuestionKind> {
    QuestionKind::ALL.iter().copied().find(|k| k.key() == key)
  }

  pub fn label(self) -> &'static str {
    match self {
      QuestionKind::Conjugation => "Conjugation",
      QuestionKind::IdentifyTense => "Identify the Tense",
      QuestionKind::IdentifyPronoun => "Identify the Pronoun",
      QuestionKind::IdentifyInfinitive => "Identify the Infinitive",
    }
  }

  pub fn is_identification(self) -> bool {
    !matches!(self, QuestionKind::Conjugation)
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerbKind {
  #[default]
  Regular,
  Irregular,
}

/// Conjugation family, derived from the infinitive ending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerbClass {
  Ar,
  Er,
  Ir,
}

impl VerbClass {
  pub fn of(infinitive: &str) -> Option<VerbClass> {
    if infinitive.ends_with("ar") {
      Some(VerbClass::Ar)
    } else if infinitive.ends_with("er") {
      Some(VerbClass::Er)
    } else if infinitive.ends_with("ir") || infinitive.ends_with("ír") {
      Some(VerbClass::Ir)
    } else {
      None
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      VerbClass::Ar => "-ar",
      VerbClass::Er => "-er",
      VerbClass::Ir => "-ir",
    }
  }
}

/// One verb of the bank. Regular tenses are computed by the conjugation
/// engine; `forms` replaces whole tenses for irregular verbs.
#[derive(Clone, Debug, Deserialize)]
pub struct VerbEntry {
  pub infinitive: String,
  pub english: String,
  #[serde(default)]
  pub kind: VerbKind,
  #[serde(default)]
  pub participle: Option<String>,
  /// Stem used by futuro and condicional ("tendr" for tener).
  #[serde(default)]
  pub future_stem: Option<String>,
  #[serde(default, deserialize_with = "de_forms")]
  pub forms: HashMap<Tense, [String; 6]>,
}

impl VerbEntry {
  pub fn regular(infinitive: &str, english: &str) -> Self {
    Self {
      infinitive: infinitive.into(),
      english: english.into(),
      kind: VerbKind::Regular,
      participle: None,
      future_stem: None,
      forms: HashMap::new(),
    }
  }

  pub fn irregular(infinitive: &str, english: &str) -> Self {
    Self { kind: VerbKind::Irregular, ..Self::regular(infinitive, english) }
  }

  pub fn with_participle(mut self, participle: &str) -> Self {
    self.participle = Some(participle.into());
    self
  }

  pub fn with_future_stem(mut self, stem: &str) -> Self {
    self.future_stem = Some(stem.into());
    self
  }

  pub fn with_forms(mut self, tense: Tense, forms: [&str; 6]) -> Self {
    self.forms.insert(tense, forms.map(String::from));
    self
  }
}

// Config files key tenses by their wire key ("presente subjuntivo").
fn de_forms<'de, D>(deserializer: D) -> Result<HashMap<Tense, [String; 6]>, D::Error>
where
  D: serde::Deserializer<'de>,
{
  let raw = HashMap::<String, [String; 6]>::deserialize(deserializer)?;
  raw
    .into_iter()
    .map(|(key, forms)| {
      Tense::from_key(&key)
        .map(|t| (t, forms))
        .ok_or_else(|| serde::de::Error::custom(format!("unknown tense '{key}'")))
    })
    .collect()
}

/// A quiz question as served by `GET /api/question`.
/// Immutable once received; the controller discards it when the next loads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
  pub id: Uuid,
  pub question_type: QuestionKind,
  pub verb: String,
  pub english: String,
  pub pronoun: Pronoun,
  pub tense: Tense,
  pub tense_name: String,
  pub conjugated_form: String,
  pub options: Vec<String>,
  pub correct_answer: String,
  /// Every option that counts as correct. Holds more than `correct_answer`
  /// when a form is shared by several pronouns (or tenses).
  #[serde(default)]
  pub all_correct_answers: Vec<String>,
}

impl Question {
  /// Local correctness: exact match against the correct answer or any
  /// equally valid alternative.
  pub fn accepts(&self, answer: &str) -> bool {
    answer == self.correct_answer || self.all_correct_answers.iter().any(|a| a == answer)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tense_keys_round_trip_through_serde() {
    for t in Tense::ALL {
      let json = serde_json::to_string(&t).unwrap();
      assert_eq!(json, format!("\"{}\"", t.key()));
      assert_eq!(Tense::from_key(t.key()), Some(t));
    }
  }

  #[test]
  fn question_kind_uses_kebab_case_on_the_wire() {
    let json = serde_json::to_string(&QuestionKind::IdentifyInfinitive).unwrap();
    assert_eq!(json, "\"identify-infinitive\"");
    assert_eq!(QuestionKind::from_key("identify-pronoun"), Some(QuestionKind::IdentifyPronoun));
    assert_eq!(QuestionKind::from_key("bogus"), None);
  }

  #[test]
  fn accepts_any_listed_alternative() {
    let q = Question {
      id: Uuid::nil(),
      question_type: QuestionKind::IdentifyPronoun,
      verb: "hablar".into(),
      english: "to speak".into(),
      pronoun: Pronoun::Yo,
      tense: Tense::Imperfecto,
      tense_name: "Imperfecto".into(),
      conjugated_form: "hablaba".into(),
      options: vec!["yo".into(), "él/ella".into(), "tú".into(), "ellos".into()],
      correct_answer: "yo".into(),
      all_correct_answers: vec!["yo".into(), "él/ella".into()],
    };
    assert!(q.accepts("yo"));
    assert!(q.accepts("él/ella"));
    assert!(!q.accepts("tú"));
    assert!(!q.accepts("Yo"));
  }

  #[test]
  fn verb_class_follows_infinitive_ending() {
    assert_eq!(VerbClass::of("hablar"), Some(VerbClass::Ar));
    assert_eq!(VerbClass::of("comer"), Some(VerbClass::Er));
    assert_eq!(VerbClass::of("vivir"), Some(VerbClass::Ir));
    assert_eq!(VerbClass::of("oír"), Some(VerbClass::Ir));
    assert_eq!(VerbClass::of("xyz"), None);
  }
}
