//! Keyboard surface: key -> command table and command dispatch.

use crossterm::event::KeyCode;
use tracing::debug;

use super::backend::QuizBackend;
use super::controller::{Phase, SessionController};
use super::storage::ClientStorage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
  /// Enter: next question, or retry after a failed load.
  Next,
  /// Digit keys 1-4, stored 0-based.
  Select(usize),
  StartSession,
  CloseSession,
  Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
  Continue,
  /// The last answer ended the session; the summary follows after a delay.
  AwaitSummary,
  Quit,
}

/// Map one key press to a command. Keys that make no sense in the current
/// phase map to nothing.
pub fn command_for_key(code: KeyCode, phase: Phase) -> Option<Command> {
  match (code, phase) {
    (KeyCode::Char('q') | KeyCode::Esc, _) => Some(Command::Quit),
    (KeyCode::Char('s'), _) => Some(Command::StartSession),
    (KeyCode::Char('x'), _) => Some(Command::CloseSession),
    (KeyCode::Enter, Phase::Answered | Phase::AwaitingQuestion) => Some(Command::Next),
    (KeyCode::Char(c @ '1'..='4'), Phase::QuestionDisplayed) => Some(Command::Select(c as usize - '1' as usize)),
    _ => None,
  }
}

/// Key for one line of piped input: an empty line is Enter, otherwise the
/// first character.
pub fn key_for_line(line: &str) -> Option<KeyCode> {
  let line = line.trim();
  match line.chars().next() {
    None => Some(KeyCode::Enter),
    Some(c) if line.chars().count() == 1 => Some(KeyCode::Char(c)),
    Some(_) => None,
  }
}

/// Run a command against the controller.
pub async fn dispatch<B: QuizBackend, S: ClientStorage>(c: &mut SessionController<B, S>, cmd: Command) -> Flow {
  debug!(target: "verbos_backend", ?cmd, phase = ?c.phase(), "Dispatching command");
  match cmd {
    Command::Quit => return Flow::Quit,
    Command::Next => {
      c.load_question().await;
    }
    Command::Select(i) => {
      if c.select_option(i).await.is_some_and(|o| o.summary_due) {
        return Flow::AwaitSummary;
      }
    }
    Command::StartSession => {
      c.start_session();
      c.load_question().await;
    }
    Command::CloseSession => {
      c.close_session();
      if c.phase() == Phase::AwaitingQuestion {
        c.load_question().await;
      }
    }
  }
  Flow::Continue
}
