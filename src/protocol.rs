//! Public protocol structs for the HTTP endpoints (serde ready).
//! Shared by the server handlers and the session controller's HTTP backend.

use serde::{Deserialize, Serialize};

use crate::domain::Question;

/// Body of `POST /api/check`. Every field is optional on the wire.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CheckIn {
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub correct_answer: String,
    #[serde(default)]
    pub tense: String,
    #[serde(default)]
    pub verb: String,
    #[serde(default)]
    pub pronoun: String,
    #[serde(default)]
    pub question_type: String,
    #[serde(default)]
    pub all_correct_answers: Vec<String>,
}

impl CheckIn {
    /// Request for `answer` with the question's correctness data and context.
    pub fn for_question(q: &Question, answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            correct_answer: q.correct_answer.clone(),
            tense: q.tense.key().to_string(),
            verb: q.verb.clone(),
            pronoun: q.pronoun.as_str().to_string(),
            question_type: q.question_type.key().to_string(),
            all_correct_answers: q.all_correct_answers.clone(),
        }
    }
}

/// Response of `POST /api/check`. Only used to enrich the feedback text,
/// so every field tolerates absence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckOut {
    #[serde(default)]
    pub correct: bool,
    #[serde(default)]
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tense_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tense_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
    pub verbs: usize,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_out_tolerates_missing_fields() {
        let out: CheckOut = serde_json::from_str("{}").unwrap();
        assert_eq!(out, CheckOut::default());

        let out: CheckOut = serde_json::from_str(r#"{"hint":"💡 x","extra":1}"#).unwrap();
        assert_eq!(out.hint.as_deref(), Some("💡 x"));
        assert!(out.tense_name.is_none());
    }

    #[test]
    fn check_out_omits_absent_enrichment() {
        let json = serde_json::to_value(CheckOut { correct: true, correct_answer: "hablo".into(), ..Default::default() }).unwrap();
        assert_eq!(json, serde_json::json!({ "correct": true, "correct_answer": "hablo" }));
    }
}
