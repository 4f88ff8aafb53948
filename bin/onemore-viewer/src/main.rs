//! onemore-viewer – terminal front-end.
//!
//! Enter shows one more, `s` opens the submission prompt, `q` quits.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use onemore_client::{
    Advance, ContentSource, FileStorage, FormState, HttpContentSource, Viewer, ViewerOptions,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

#[derive(Debug, Parser)]
#[command(name = "onemore-viewer", version, about = "One more, in the terminal")]
struct Cli {
    /// Base URL of onemore-server.
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    server: String,

    /// Where clicks and the last visit are kept between runs.
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Fade-out duration in milliseconds.
    #[arg(long, default_value_t = 200)]
    fade_ms: u64,

    /// Never interject milestone messages.
    #[arg(long)]
    no_milestones: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let source = Arc::new(HttpContentSource::new(&cli.server)?);
    let state_path = cli.state_file.unwrap_or_else(FileStorage::default_path);
    let storage = FileStorage::open(&state_path)
        .with_context(|| format!("opening state file {}", state_path.display()))?;

    let initial = match source.fetch_one(None).await {
        Ok(item) => Some(item),
        Err(e) => {
            warn!(error = %e, server = %cli.server, "first item unavailable");
            None
        }
    };

    let mut options = ViewerOptions {
        fade: Duration::from_millis(cli.fade_ms),
        ..ViewerOptions::default()
    };
    if cli.no_milestones {
        options.milestones = None;
    }

    let mut viewer = Viewer::new(source, storage, initial, options);
    viewer.mount(Utc::now())?;
    if viewer.session().returning {
        println!("(welcome back)");
    }
    render(viewer.text());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => match viewer.advance(Utc::now()).await? {
                Advance::Shown | Advance::Milestone => render(viewer.text()),
                Advance::NotReady => println!("(still loading)"),
                Advance::Blocked => {}
            },
            "s" => {
                if !viewer.open_form() {
                    continue;
                }
                println!("say something (280 characters max, empty line to cancel):");
                let draft = lines.next_line().await?.unwrap_or_default();
                if draft.trim().is_empty() {
                    viewer.cancel_form();
                    render(viewer.text());
                    continue;
                }
                viewer.set_draft(&draft);
                loop {
                    match viewer.submit().await.clone() {
                        FormState::Success => {
                            println!("sent. it will show up once someone reads it.");
                            viewer.dismiss_after_success().await;
                            break;
                        }
                        FormState::Error(message) => {
                            println!("not sent: {message}");
                            println!("enter: try again   c: cancel   or type a new text");
                            let line = lines.next_line().await?;
                            match after_error(line.as_deref()) {
                                Retry::Resend => {}
                                Retry::Replace(text) => viewer.set_draft(&text),
                                Retry::Cancel => {
                                    viewer.cancel_form();
                                    break;
                                }
                            }
                        }
                        FormState::Idle | FormState::Loading => {
                            viewer.cancel_form();
                            break;
                        }
                    }
                }
                render(viewer.text());
            }
            "q" => break,
            _ => println!("enter: one more   s: submit   q: quit"),
        }
    }

    Ok(())
}

fn render(text: &str) {
    println!("\n    {text}\n");
}

/// What to do with the form after a failed submission.
#[derive(Debug, PartialEq, Eq)]
enum Retry {
    Resend,
    Replace(String),
    Cancel,
}

/// `None` is end of input.
fn after_error(line: Option<&str>) -> Retry {
    match line {
        None => Retry::Cancel,
        Some(line) => match line.trim() {
            "" => Retry::Resend,
            "c" => Retry::Cancel,
            _ => Retry::Replace(line.to_owned()),
        },
    }
}
