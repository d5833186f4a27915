use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use jobsentry_application::Dashboard;
use jobsentry_core::request::RequestState;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use super::read_upload;
use crate::render::render_turn;

const QUIT: &str = "/quit";
const UPLOAD: &str = "/upload";

/// Completion and highlighting for REPL commands.
struct ChatHelper {
    commands: Vec<&'static str>,
}

impl ChatHelper {
    fn new() -> Self {
        Self {
            commands: vec![QUIT, UPLOAD],
        }
    }
}

impl Helper for ChatHelper {}

impl Completer for ChatHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') {
            return Ok((0, vec![]));
        }

        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ChatHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ChatHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return None;
        }
        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for ChatHelper {}

/// Interactive conversation; `/upload <path>` sends a résumé into the same
/// transcript.
pub async fn run(dashboard: &mut Dashboard) -> Result<()> {
    let mut rl: Editor<ChatHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(ChatHelper::new()));

    println!("{}", "=== JobSentry career assistant ===".bright_magenta().bold());
    println!(
        "{}",
        format!("Type a message, '{UPLOAD} <resume.pdf>' to get role suggestions, or '{QUIT}' to exit.")
            .bright_black()
    );
    println!();

    loop {
        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        let trimmed = line.trim();

        if trimmed == QUIT {
            break;
        }
        if trimmed.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(trimmed);

        let seen = dashboard.chat.transcript().len();
        let failure = match upload_path(trimmed) {
            Some("") => Some(format!("Usage: {UPLOAD} <resume.pdf>")),
            Some(path) => upload(dashboard, Path::new(path)).await,
            None => {
                dashboard.chat.set_message(trimmed);
                dashboard.chat.submit();
                dashboard.chat.wait_settled().await;
                None
            }
        };

        for turn in dashboard.chat.transcript().iter().skip(seen) {
            if !turn.is_user() {
                println!("{}", render_turn(turn));
            }
        }
        if let Some(message) = failure {
            eprintln!("{}", message.red());
        }
        println!();
    }

    println!("{}", "Goodbye!".bright_green());
    Ok(())
}

/// The argument of an `/upload` command, or `None` for any other line.
fn upload_path(line: &str) -> Option<&str> {
    let mut parts = line.splitn(2, char::is_whitespace);
    match parts.next() {
        Some(UPLOAD) => Some(parts.next().unwrap_or_default().trim()),
        _ => None,
    }
}

/// Uploads a résumé, returning a failure message the transcript does not
/// already carry.
async fn upload(dashboard: &mut Dashboard, path: &Path) -> Option<String> {
    let upload = match read_upload(path) {
        Ok(upload) => upload,
        Err(err) => return Some(err.to_string()),
    };

    let screen = &mut dashboard.resume;
    let before = screen.transcript().len();
    screen.select(upload);
    screen.submit();
    match screen.wait_settled().await {
        RequestState::Failed(message) if screen.transcript().len() == before => Some(message),
        _ => None,
    }
}
