//! Line-oriented interactive session: words in, mandalas out.

use std::io::Write;
use std::path::PathBuf;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::client::MandalaClient;
use crate::credential::Credential;
use crate::error::AppError;
use crate::output::{data_uri, resolve_output_path, save_png};
use crate::prompt::InspirationWord;
use crate::session::{Outcome, Session};

const HELP: &str = "\
Enter a word for inspiration (e.g. ocean, serenity, forest, cosmos) to generate a mandala.
  :link   print a data URI that downloads the current image
  :save   save a high resolution PNG of the current image
  :again  clear the current image and generate another
  :help   show this help
  :quit   leave

Tips: abstract concepts like \"tranquility\" or \"infinity\" work well, nature words
make beautiful patterns, and combinations like \"ocean-calm\" are worth a try.";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate a mandala for this word.
    Generate(InspirationWord),
    /// Print the download URI.
    Link,
    /// Save a high-resolution copy.
    Save,
    /// Clear and start over.
    Again,
    /// Show help.
    Help,
    /// End the session.
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown `:command`.
    pub fn parse(line: &str) -> Result<Option<Self>, AppError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let command = match line {
            ":link" | ":l" => Self::Link,
            ":save" | ":s" => Self::Save,
            ":again" | ":a" => Self::Again,
            ":help" | ":h" | ":?" => Self::Help,
            ":quit" | ":q" | ":exit" => Self::Quit,
            other if other.starts_with(':') => {
                return Err(AppError::InvalidArgument(format!(
                    "Unknown command '{other}'. Type :help for the list."
                )));
            }
            word => Self::Generate(InspirationWord::parse(word)?),
        };
        Ok(Some(command))
    }
}

/// Settings that stay fixed for the whole session.
#[derive(Debug)]
pub struct Settings {
    /// Credential passed to every generation.
    pub credential: Credential,
    /// Where `:save` writes.
    pub output_dir: PathBuf,
}

/// Drive a session from `input`, writing everything the user sees to `out`.
///
/// `first_word`, when given, is generated before any input is read.
/// Returns the final session state when input ends or the user quits.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails; failed
/// generations and saves are reported to the user and the session goes on.
pub async fn run<R: AsyncBufRead + Unpin, W: Write>(
    client: &MandalaClient,
    settings: &Settings,
    first_word: Option<&str>,
    input: R,
    out: &mut W,
) -> Result<Session, AppError> {
    let mut session = Session::new();
    writeln!(out, "Mandala Art Generator. Type :help for commands.")?;

    if let Some(word) = first_word {
        match Command::parse(word) {
            Ok(Some(command)) => {
                apply(&mut session, client, settings, command, out).await?;
            }
            Ok(None) => {}
            Err(e) => writeln!(out, "{e}")?,
        }
    }

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else { break };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        apply(&mut session, client, settings, command, out).await?;
    }

    writeln!(out)?;
    Ok(session)
}

async fn apply<W: Write>(
    session: &mut Session,
    client: &MandalaClient,
    settings: &Settings,
    command: Command,
    out: &mut W,
) -> Result<(), AppError> {
    match command {
        Command::Generate(word) => {
            writeln!(out, "Creating your mandala art...")?;
            out.flush()?;
            match session.generate(client, word, &settings.credential).await {
                Outcome::Success(image) => {
                    let (width, height) = image.dimensions();
                    writeln!(out, "Mandala inspired by: '{}' ({width}x{height})", image.word)?;
                    writeln!(out, "Next: :link to download, :save for a high resolution copy, :again to start over.")?;
                }
                Outcome::Failure(message) => writeln!(out, "Error: {message}")?,
            }
        }
        Command::Link => match session.image() {
            Some(image) => match data_uri(image) {
                Ok(uri) => writeln!(out, "{uri}")?,
                Err(e) => writeln!(out, "Error: {e}")?,
            },
            None => writeln!(out, "{}", no_image(session))?,
        },
        Command::Save => match session.image() {
            Some(image) => {
                let path = resolve_output_path(None, &settings.output_dir, image, true);
                match save_png(image, &path) {
                    Ok(()) => writeln!(out, "High resolution image saved as {}", path.display())?,
                    Err(e) => writeln!(out, "Error: {e}")?,
                }
            }
            None => writeln!(out, "{}", no_image(session))?,
        },
        Command::Again => {
            if session.is_blank() {
                writeln!(out, "Nothing to clear. Enter a word.")?;
            } else {
                if let Some(word) = session.last_word() {
                    tracing::debug!(%word, "clearing session");
                }
                session.clear();
                writeln!(out, "Cleared. Enter a new word.")?;
            }
        }
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => {}
    }
    Ok(())
}

fn no_image(session: &Session) -> String {
    match session.error() {
        Some(message) => format!("No mandala yet (last attempt failed: {message}). Enter a word."),
        None => "No mandala yet. Enter a word first.".to_string(),
    }
}
