#![forbid(unsafe_code)]

//! Console interaction: the line source abstraction and the loop that keeps
//! asking for a Studio URL until one contains a video id.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin, Stdout};
use tracing::{error, info};

use crate::error::{Result, StudioError};
use crate::video_id::{STUDIO_URL_EXAMPLE, extract_video_id};

pub const ORANGE: &str = "\x1b[38;5;214m";
pub const CYAN: &str = "\x1b[96m";
pub const BLUE: &str = "\x1b[94m";
pub const GREEN: &str = "\x1b[92m";
pub const RESET: &str = "\x1b[0m";

/// Something that can show a prompt and hand back one line of operator input.
#[allow(async_fn_in_trait)]
pub trait LineSource {
    /// Returns `None` once the input is exhausted.
    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Interactive terminal backed by tokio's stdin/stdout.
pub struct ConsoleInput {
    reader: BufReader<Stdin>,
    stdout: Stdout,
}

impl ConsoleInput {
    pub fn new() -> Self {
        Self {
            reader: BufReader::new(tokio::io::stdin()),
            stdout: tokio::io::stdout(),
        }
    }
}

impl Default for ConsoleInput {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for ConsoleInput {
    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.stdout
            .write_all(prompt.as_bytes())
            .await
            .map_err(|err| StudioError::io("<stdout>", err))?;
        self.stdout
            .flush()
            .await
            .map_err(|err| StudioError::io("<stdout>", err))?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .await
            .map_err(|err| StudioError::io("<stdin>", err))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Asks for a Studio URL until one yields a video id. There is no attempt
/// limit; the loop only ends early when input runs out.
///
/// `seed` is checked before the first prompt, as if the operator had typed it.
pub async fn prompt_for_video_id(
    source: &mut impl LineSource,
    seed: Option<&str>,
) -> Result<String> {
    if let Some(candidate) = seed {
        if let Some(video_id) = accept_candidate(candidate) {
            return Ok(video_id);
        }
    }

    let prompt = format!("{ORANGE}Input:{RESET} ");
    loop {
        info!(
            "Paste the YouTube Studio link of the video to update.\nExample: {STUDIO_URL_EXAMPLE}\n"
        );
        let Some(line) = source.read_line(&prompt).await? else {
            return Err(StudioError::InputClosed);
        };
        if let Some(video_id) = accept_candidate(&line) {
            return Ok(video_id);
        }
    }
}

fn accept_candidate(candidate: &str) -> Option<String> {
    match extract_video_id(candidate.trim()) {
        Some(video_id) => {
            info!(video_id, "{GREEN}\u{2714}{RESET} Video id found: {video_id}");
            Some(video_id.to_string())
        }
        None => {
            error!("Invalid link, try again.");
            None
        }
    }
}
