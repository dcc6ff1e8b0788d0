//! Interactive loop: read a line, analyze it, print the result, repeat
//!
//! Exits on EOF or a case-insensitive `quit`/`exit`. Blank lines just
//! re-prompt. An analysis that reaches no model is reported and the loop
//! keeps going.

use crate::error::{AppError, AppResult};
use crate::formatter;
use crate::models::ModelCandidate;
use crate::prober::{AttemptResult, ProbeListener, Prober};
use std::borrow::Cow;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Prompt shown before each line is read
pub const PROMPT: &str = "📝 Enter text to analyze (or 'quit' to exit): ";

/// What a line of input asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand {
    Quit,
    Empty,
    Analyze(String),
}

pub fn parse_line(line: &str) -> LineCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineCommand::Empty;
    }
    if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
        return LineCommand::Quit;
    }
    LineCommand::Analyze(trimmed.to_string())
}

/// Prints probe progress to the console
struct ConsoleListener<'a, W: Write + ?Sized> {
    out: &'a mut W,
}

impl<W: Write + ?Sized> ProbeListener for ConsoleListener<'_, W> {
    fn on_attempt(&mut self, model: &ModelCandidate, retry: bool) {
        let verb = if retry { "Retrying" } else { "Trying" };
        let written = writeln!(self.out, "🔄 {} model: {}", verb, model);
        log_write_failure(written);
    }

    fn on_cold_start(&mut self, model: &ModelCandidate, delay: Duration) {
        let written = writeln!(
            self.out,
            "⏳ {} is loading, waiting {}s before retrying...",
            model,
            delay.as_secs()
        );
        log_write_failure(written);
    }

    fn on_result(&mut self, result: &AttemptResult) {
        let written = match result {
            AttemptResult::Success { model, .. } => writeln!(self.out, "✅ Success with {}", model),
            AttemptResult::Failure { model, error } => {
                writeln!(self.out, "❌ {} failed: {}", model, error)
            }
        };
        log_write_failure(written);
    }
}

fn log_write_failure(written: std::io::Result<()>) {
    if let Err(e) = written {
        tracing::debug!(error = %e, "Failed to print probe progress");
    }
}

/// Analyze one sentence and print progress and outcome to `out`
///
/// Returns `Ok(true)` when a model answered, `Ok(false)` when every candidate
/// failed. Only output errors are propagated.
pub async fn analyze<W: Write + ?Sized>(prober: &Prober, text: &str, out: &mut W) -> AppResult<bool> {
    writeln!(out, "\n🔍 Analyzing: \"{}\"", text)?;

    let outcome = {
        let mut listener = ConsoleListener { out: &mut *out };
        prober.probe(text, &mut listener).await
    };

    match outcome {
        Ok(success) => {
            writeln!(out, "\n📊 Sentiment ({}):", success.model)?;
            writeln!(out, "{}", formatter::format_payload(&success.payload))?;
            writeln!(out)?;
            Ok(true)
        }
        Err(e @ AppError::CandidatesExhausted { .. }) => {
            writeln!(out, "\n❌ {}. Please try again later.\n", e)?;
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Read one line, replacing invalid UTF-8 instead of failing
///
/// Returns `None` at end of input. The trailing newline is dropped.
async fn read_line_lossy<R>(input: &mut R, buf: &mut Vec<u8>) -> AppResult<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    if input.read_until(b'\n', buf).await? == 0 {
        return Ok(None);
    }

    let line = String::from_utf8_lossy(buf);
    if matches!(line, Cow::Owned(_)) {
        tracing::debug!(bytes = buf.len(), "Input line was not valid UTF-8, decoded lossily");
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// Summary of an interactive session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub analyzed: usize,
    pub succeeded: usize,
}

/// Run the prompt loop until `quit`/`exit` or end of input
pub async fn run_repl<R, W>(prober: &Prober, mut input: R, out: &mut W) -> AppResult<SessionSummary>
where
    R: AsyncBufRead + Unpin,
    W: Write + ?Sized,
{
    let mut buf = Vec::new();
    let mut summary = SessionSummary::default();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = read_line_lossy(&mut input, &mut buf).await? else {
            writeln!(out)?;
            break;
        };

        match parse_line(&line) {
            LineCommand::Quit => break,
            LineCommand::Empty => continue,
            LineCommand::Analyze(text) => {
                summary.analyzed += 1;
                if analyze(prober, &text, out).await? {
                    summary.succeeded += 1;
                }
            }
        }
    }

    tracing::debug!(
        analyzed = summary.analyzed,
        succeeded = summary.succeeded,
        "Interactive session ended"
    );
    writeln!(out, "👋 Goodbye!")?;
    Ok(summary)
}
