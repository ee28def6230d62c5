use std::{io, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{AnalyzeController, HttpEndpoint, PageContext, SubmissionResult};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod terminal;

use config::{load_settings, Settings};
use terminal::{load_selected_file, TerminalForm, TerminalNotices, TerminalOutput};

/// Submit a video to the motility analysis service and print the resulting artifacts.
#[derive(Parser, Debug)]
#[command(name = "analyze")]
struct Args {
    /// Video or image to analyze.
    file: Option<PathBuf>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    microns_per_pixel: Option<String>,
    #[arg(long)]
    fps: Option<String>,
    #[arg(long)]
    drop_volume_ul: Option<String>,
    #[arg(long)]
    conf: Option<String>,
    #[arg(long)]
    weights: Option<String>,
    #[arg(long)]
    max_frames: Option<String>,
}

impl Args {
    fn apply_to(&self, settings: &mut Settings) {
        if let Some(v) = &self.server_url {
            settings.server_url = v.clone();
        }
        if let Some(v) = &self.microns_per_pixel {
            settings.microns_per_pixel = v.clone();
        }
        if let Some(v) = &self.fps {
            settings.fps = v.clone();
        }
        if let Some(v) = &self.drop_volume_ul {
            settings.drop_volume_ul = v.clone();
        }
        if let Some(v) = &self.conf {
            settings.confidence_threshold = v.clone();
        }
        if let Some(v) = &self.weights {
            settings.weights = Some(v.clone());
        }
        if let Some(v) = &self.max_frames {
            settings.max_frames = Some(v.clone());
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    args.apply_to(&mut settings);

    let file = match &args.file {
        Some(path) => Some(load_selected_file(path).await?),
        None => None,
    };
    let endpoint = HttpEndpoint::new(&settings.server_url)
        .with_context(|| format!("cannot use server url '{}'", settings.server_url))?;
    info!(endpoint = %endpoint.analyze_url(), "analysis endpoint configured");

    let page = PageContext::new(
        TerminalForm::new(settings, file),
        TerminalOutput::new(io::stdout(), endpoint.base_url().clone()),
        TerminalNotices::new(io::stderr()),
    );
    let mut controller = AnalyzeController::new(endpoint, page);

    Ok(match controller.on_submit().await {
        SubmissionResult::Succeeded => ExitCode::SUCCESS,
        SubmissionResult::Rejected => ExitCode::from(2),
        SubmissionResult::Failed | SubmissionResult::Unexpected => ExitCode::FAILURE,
    })
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
