//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs basic result info.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::{error, info, instrument};

use crate::logic::{check_answer, generate_question};
use crate::protocol::{CheckIn, ErrorOut, HealthOut};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(HealthOut { ok: true, verbs: state.verbs.len() })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_question(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  // ThreadRng is !Send; keep it inside this synchronous block.
  let question = {
    let mut rng = rand::thread_rng();
    generate_question(&state, &mut rng)
  };
  match question {
    Some(q) => {
      info!(target: "question", id = %q.id, kind = q.question_type.key(), verb = %q.verb, "HTTP question served");
      Json(q).into_response()
    }
    None => {
      error!(target: "question", "Verb bank is empty; cannot serve a question");
      (StatusCode::SERVICE_UNAVAILABLE, Json(ErrorOut { error: "no verbs available".into() })).into_response()
    }
  }
}

#[instrument(level = "info", skip(state, body), fields(question_type = %body.question_type, answer_len = body.answer.len()))]
pub async fn http_post_check(
  State(state): State<Arc<AppState>>,
  Json(body): Json<CheckIn>,
) -> impl IntoResponse {
  let out = check_answer(&state, &body);
  info!(target: "question", verb = %body.verb, correct = out.correct, "HTTP answer checked");
  Json(out)
}
