#![forbid(unsafe_code)]

//! Sets the title and description of one YouTube video and copies them into
//! every localization YouTube accepts.
//!
//! Inputs are `title.txt`, `description.txt` and `client_secret.json` in the
//! working directory (see `config` for overrides). The video is picked by
//! pasting its YouTube Studio link.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use studio_localizer::{
    config::{SettingsOverrides, resolve_settings},
    error::StudioError,
    files::VideoText,
    oauth::{ClientSecret, authenticate},
    prompt::{ConsoleInput, GREEN, LineSource, RESET, prompt_for_video_id},
    youtube::{VideoUpdate, http_agent, submit_update},
};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Parser)]
#[command(
    version,
    about = "Push a title and description to every localization of a YouTube video"
)]
struct CliArgs {
    /// Studio link to try before prompting
    #[arg(long)]
    url: Option<String>,
    /// OAuth client file downloaded from the Google Cloud console
    #[arg(long, value_name = "PATH")]
    client_secret: Option<PathBuf>,
    #[arg(long, value_name = "PATH")]
    title_file: Option<PathBuf>,
    #[arg(long, value_name = "PATH")]
    description_file: Option<PathBuf>,
    /// Base URL of the YouTube Data API
    #[arg(long, value_name = "URL")]
    api_base: Option<String>,
    /// Dotenv file with STUDIO_* / YOUTUBE_API_BASE settings
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,
    /// Print the request body and stop before authorizing
    #[arg(long)]
    dry_run: bool,
}

impl CliArgs {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            client_secret: self.client_secret.clone(),
            title_file: self.title_file.clone(),
            description_file: self.description_file.clone(),
            api_base: self.api_base.clone(),
            env_path: self.env_file.clone(),
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(true).with_target(false))
        .with(env_filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let args = CliArgs::parse();
    let mut input = ConsoleInput::new();

    let outcome = tokio::select! {
        result = run(&args, &mut input) => result,
        _ = signal::ctrl_c() => {
            // stdin is read on a blocking thread that would stall runtime
            // shutdown, so leave right away.
            warn!("{}", StudioError::Interrupted);
            std::process::exit(130);
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &CliArgs, input: &mut impl LineSource) -> Result<()> {
    let settings = resolve_settings(args.overrides()).context("resolving settings")?;

    let video_id = prompt_for_video_id(input, args.url.as_deref()).await?;

    let text = VideoText::load(&settings.title_file, &settings.description_file)
        .context("loading video text")?;
    info!(
        title = %settings.title_file.display(),
        description = %settings.description_file.display(),
        "Loaded title and description"
    );

    if args.dry_run {
        println!("{}", render_update(&VideoUpdate::new(&video_id, &text))?);
        info!("Dry run: nothing was sent");
        return Ok(());
    }

    let secret = ClientSecret::load(&settings.client_secret).context("loading OAuth client")?;
    let client = authenticate(&secret, http_agent(), &settings.api_base, input)
        .await
        .context("authorizing with YouTube")?;

    let resource = submit_update(client, &video_id, &text)
        .await
        .with_context(|| format!("updating video {video_id}"))?;
    info!(video_id = %resource.id, "{GREEN}\u{2714}{RESET} Video updated: {}", resource.id);

    Ok(())
}

fn render_update(update: &VideoUpdate) -> Result<String> {
    serde_json::to_string_pretty(update).context("serializing update")
}
