//! Mandala - black and white mandala art from a single word of inspiration.

mod adapters;
mod cassette;
mod cli;
mod client;
mod config;
mod context;
mod credential;
mod error;
mod interactive;
mod output;
mod params;
mod ports;
mod prompt;
mod session;

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use crate::cli::Cli;
use crate::client::GenerationRequest;
use crate::config::Config;
use crate::context::{RecordingSession, ServiceContext};
use crate::error::AppError;
use crate::output::{data_uri, resolve_output_path, save_png};
use crate::prompt::InspirationWord;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "mandala=debug" } else { "mandala=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn run(cli: Cli) -> Result<(), AppError> {
    cli.check_mode().map_err(AppError::InvalidArgument)?;

    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(AppError::Config)?;

    let credential = config.credential(cli.api_key.as_deref());
    let output_dir = cli.output_dir.as_ref().map_or_else(|| config.output.dir.clone(), PathBuf::from);

    // Validate before any cassette or adapter is set up.
    let word = if cli.is_interactive() {
        None
    } else {
        Some(InspirationWord::parse(cli.word.as_deref().unwrap_or_default())?)
    };

    let (ctx, recording_session) = build_context()?;

    let result = if let Some(word) = word {
        one_shot(&ctx, &cli, GenerationRequest { word, credential }, &output_dir).await
    } else {
        let settings = interactive::Settings { credential, output_dir };
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        interactive::run(&ctx.client, &settings, cli.word.as_deref(), stdin, &mut stdout)
            .await
            .map(|_| ())
    };

    // Adapters hold the recorder; release them before writing the cassette.
    drop(ctx);
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }

    result
}

/// Pick live, recording or replaying adapters from the environment.
fn build_context() -> Result<(ServiceContext, Option<RecordingSession>), AppError> {
    let replay_path = std::env::var("MANDALA_REPLAY").ok();
    let is_recording = std::env::var("MANDALA_REC").is_ok_and(|v| v == "true" || v == "1");

    if let Some(ref cassette_path) = replay_path {
        tracing::debug!(cassette = %cassette_path, "replaying");
        Ok((ServiceContext::replaying(Path::new(cassette_path))?, None))
    } else if is_recording {
        tracing::debug!("recording mode enabled");
        let (ctx, session) = ServiceContext::recording();
        Ok((ctx, Some(session)))
    } else {
        Ok((ServiceContext::live(), None))
    }
}

async fn one_shot(
    ctx: &ServiceContext,
    cli: &Cli,
    request: GenerationRequest,
    output_dir: &Path,
) -> Result<(), AppError> {
    eprintln!("Creating your mandala art...");
    let image = ctx.client.generate(&request).await?;

    let path = resolve_output_path(cli.output.as_deref(), output_dir, &image, false);
    save_png(&image, &path)?;
    let (width, height) = image.dimensions();
    eprintln!("Mandala inspired by: '{}' ({width}x{height})", image.word);
    eprintln!("Saved: {}", path.display());

    if cli.data_uri {
        println!("{}", data_uri(&image)?);
    }
    Ok(())
}
