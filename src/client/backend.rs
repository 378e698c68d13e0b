//! Network seam of the session controller: the question service and the
//! answer-check endpoint.
//!
//! Calls are fire-and-await with no timeout; a slow server just delays the
//! next screen.

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::Question;
use crate::protocol::{CheckIn, CheckOut};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
  #[error("server answered with status {0}")]
  Status(reqwest::StatusCode),
  #[error(transparent)]
  Http(#[from] reqwest::Error),
}

/// The two remote calls the controller makes.
#[allow(async_fn_in_trait)]
pub trait QuizBackend {
  async fn fetch_question(&self) -> Result<Question, ClientError>;
  async fn check_answer(&self, req: &CheckIn) -> Result<CheckOut, ClientError>;
}

#[derive(Clone)]
pub struct HttpBackend {
  pub client: reqwest::Client,
  pub base_url: String,
}

impl HttpBackend {
  pub fn new(base_url: &str) -> Result<Self, ClientError> {
    let client = reqwest::Client::builder().build()?;
    Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
  }
}

impl QuizBackend for HttpBackend {
  #[instrument(level = "debug", skip(self), fields(base_url = %self.base_url))]
  async fn fetch_question(&self) -> Result<Question, ClientError> {
    let res = self
      .client
      .get(format!("{}/api/question", self.base_url))
      .header(USER_AGENT, "verbos-drill/0.1")
      .send()
      .await?;
    if !res.status().is_success() {
      return Err(ClientError::Status(res.status()));
    }
    let q: Question = res.json().await?;
    debug!(target: "verbos_backend", id = %q.id, kind = q.question_type.key(), "Question received");
    Ok(q)
  }

  #[instrument(level = "debug", skip(self, req), fields(base_url = %self.base_url, question_type = %req.question_type))]
  async fn check_answer(&self, req: &CheckIn) -> Result<CheckOut, ClientError> {
    let res = self
      .client
      .post(format!("{}/api/check", self.base_url))
      .header(USER_AGENT, "verbos-drill/0.1")
      .header(CONTENT_TYPE, "application/json")
      .json(req)
      .send()
      .await?;
    if !res.status().is_success() {
      return Err(ClientError::Status(res.status()));
    }
    Ok(res.json().await?)
  }
}
