//! Terminal front end for the drill.
//!
//! On a TTY keys are read one at a time in raw mode: Enter advances, 1-4
//! answer, s/x/q as listed in the footer. Piped input falls back to one key
//! per line (an empty line is Enter). The screen is redrawn after every key.

use std::fmt::Write as _;
use std::io::{self, Write};

use crossterm::{
  cursor::MoveTo,
  event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
  execute,
  terminal::{self, Clear, ClearType},
  tty::IsTty,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use super::backend::QuizBackend;
use super::commands::{command_for_key, dispatch, key_for_line, Flow};
use super::controller::SessionController;
use super::storage::ClientStorage;
use super::view::{render_scoreboard, render_screen, OptionMark, QuestionView, Screen, ScoreboardView, SummaryView};

const BAR_WIDTH: usize = 20;

/// Raw mode for the lifetime of the guard; the previous mode is restored on
/// drop, including on early returns.
struct RawTerminal {
  was_raw: bool,
}

impl RawTerminal {
  fn new() -> io::Result<Self> {
    let was_raw = terminal::is_raw_mode_enabled()?;
    if !was_raw {
      terminal::enable_raw_mode()?;
    }
    Ok(Self { was_raw })
  }
}

impl Drop for RawTerminal {
  fn drop(&mut self) {
    if !self.was_raw {
      let _ = terminal::disable_raw_mode();
    }
  }
}

fn write_scoreboard(out: &mut String, b: &ScoreboardView) {
  let filled = (b.progress_percent.min(100) as usize * BAR_WIDTH) / 100;
  let _ = writeln!(
    out,
    "Score {}  Streak {}  Best {}  [{}{}] {}%{}",
    b.score,
    b.streak,
    b.best_streak,
    "#".repeat(filled),
    "-".repeat(BAR_WIDTH - filled),
    b.progress_percent,
    b.session_label.as_ref().map(|l| format!("  {l}")).unwrap_or_default(),
  );
}

fn write_question(out: &mut String, v: &QuestionView) {
  let _ = writeln!(out, "[{}]", v.badge);
  let _ = writeln!(out, "{} ({})", v.title, v.subtitle);
  let _ = writeln!(out, "{}  {}", v.heading, v.prompt);
  for o in &v.options {
    let mark = match o.mark {
      OptionMark::Open | OptionMark::Inactive => ' ',
      OptionMark::Correct => '✓',
      OptionMark::Wrong => '✗',
    };
    let _ = writeln!(out, " {mark} {}. {}", o.number, o.text);
  }
  if let Some(a) = &v.answer {
    let _ = writeln!(out, "\n{}", a.feedback);
    if !a.explained {
      let _ = writeln!(out, "(server unavailable: no explanation)");
    }
    if a.new_best {
      let _ = writeln!(out, "New best streak!");
    }
    if a.session_over {
      let _ = writeln!(out, "Session complete! Preparing your summary...");
    }
  }
}

fn write_summary(out: &mut String, s: &SummaryView) {
  let _ = writeln!(out, "{}", s.headline);
  let _ = writeln!(out, "{}", s.message);
  let _ = writeln!(out, "{}", s.stats);
  if !s.weak_areas.is_empty() {
    let _ = writeln!(out, "\nAreas to review:");
    for w in &s.weak_areas {
      let _ = writeln!(out, "  - {w}");
    }
  }
  for t in &s.tips {
    let _ = writeln!(out, "Tip: {t}");
  }
}

/// Keys that do something on this screen.
fn footer(screen: &Screen) -> &'static str {
  match screen {
    Screen::Question(v) if v.answer.as_ref().is_some_and(|a| a.session_over) => "[q] quit",
    Screen::Question(v) if v.can_advance => "[Enter] next  [s] start session  [x] close session  [q] quit",
    Screen::Question(_) => "[1-4] answer  [s] start session  [x] close session  [q] quit",
    Screen::Summary(_) => "[s] new session  [x] free practice  [q] quit",
    Screen::Loading | Screen::Error(_) => "[Enter] retry  [q] quit",
  }
}

/// Whole screen as text.
pub fn render_text(board: &ScoreboardView, screen: &Screen) -> String {
  let mut out = String::new();
  write_scoreboard(&mut out, board);
  out.push('\n');
  match screen {
    Screen::Loading => out.push_str("Loading question...\n"),
    Screen::Error(e) => {
      let _ = writeln!(out, "{e}");
    }
    Screen::Question(v) => write_question(&mut out, v),
    Screen::Summary(s) => write_summary(&mut out, s),
  }
  let _ = writeln!(out, "\n{}", footer(screen));
  out
}

fn current_text<B: QuizBackend, S: ClientStorage>(c: &SessionController<B, S>) -> String {
  render_text(&render_scoreboard(c), &render_screen(c))
}

/// Raw mode does not translate newlines, so each line ends in "\r\n".
fn draw_raw(text: &str) -> io::Result<()> {
  let mut stdout = io::stdout();
  execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
  stdout.write_all(text.replace('\n', "\r\n").as_bytes())?;
  stdout.flush()
}

fn draw_plain(text: &str) -> io::Result<()> {
  let mut stdout = io::stdout();
  stdout.write_all(text.as_bytes())?;
  stdout.flush()
}

/// Next key press from the terminal. Ctrl+C reads as `q`.
async fn next_key() -> io::Result<KeyCode> {
  loop {
    let ev = tokio::task::spawn_blocking(event::read)
      .await
      .map_err(|e| io::Error::new(io::ErrorKind::Other, e))??;
    let Event::Key(key) = ev else { continue };
    if key.kind != KeyEventKind::Press {
      continue;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      return Ok(KeyCode::Char('q'));
    }
    return Ok(key.code);
  }
}

async fn handle_key<B: QuizBackend, S: ClientStorage>(
  c: &mut SessionController<B, S>,
  key: KeyCode,
  draw: fn(&str) -> io::Result<()>,
) -> io::Result<Flow> {
  let Some(cmd) = command_for_key(key, c.phase()) else { return Ok(Flow::Continue) };
  let flow = dispatch(c, cmd).await;
  if flow == Flow::AwaitSummary {
    draw(&current_text(c))?;
    c.await_summary().await;
  }
  Ok(flow)
}

async fn run_raw<B: QuizBackend, S: ClientStorage>(c: &mut SessionController<B, S>) -> io::Result<()> {
  let _raw = RawTerminal::new()?;
  loop {
    draw_raw(&current_text(c))?;
    let key = next_key().await?;
    if handle_key(c, key, draw_raw).await? == Flow::Quit {
      return Ok(());
    }
  }
}

async fn run_piped<B: QuizBackend, S: ClientStorage>(c: &mut SessionController<B, S>) -> io::Result<()> {
  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  loop {
    draw_plain(&current_text(c))?;
    let Some(line) = lines.next_line().await? else { return Ok(()) };
    let Some(key) = key_for_line(&line) else { continue };
    if handle_key(c, key, draw_plain).await? == Flow::Quit {
      return Ok(());
    }
  }
}

/// Drive the controller from the keyboard until `q`, Ctrl+C or end of input.
pub async fn run<B: QuizBackend, S: ClientStorage>(mut c: SessionController<B, S>) -> io::Result<()> {
  c.load_question().await;
  if io::stdin().is_tty() {
    run_raw(&mut c).await?;
  } else {
    run_piped(&mut c).await?;
  }
  info!(target: "verbos_backend", score = c.score().score, best = c.score().best_streak, "Drill finished");
  Ok(())
}
