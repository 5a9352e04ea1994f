// src/cli/commands.rs
// Command handlers: call the API client, render the outcome

use super::{Cli, Commands, render};
use anyhow::{Context, Result};
use facelens::api::{ApiClient, ImageUpload};
use facelens::conversation::ChatSession;
use facelens::error::ApiError;
use facelens::metrics::{
    ConfusionMatrix, MetricsError, derive_confusion_stats, derive_epoch_series, derive_summary,
};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

const CHAT_GREETING: &str = "Hi! Ask me how the detector tells real faces from AI-generated ones.";

/// Run the selected command. API failures are rendered and turned into a
/// failing exit code; anything else propagates.
pub async fn run(cli: &Cli, client: &ApiClient) -> Result<ExitCode> {
    let outcome = match &cli.command {
        Commands::Classify { path } => classify(cli, client, path).await?,
        Commands::Summarize { text, context } => {
            let result = client.summarize(text, context.as_deref()).await;
            emit(cli, result, |r| r.summary.clone())
        }
        Commands::Chat { message } if !message.is_empty() => {
            let session = ChatSession::new(client.clone());
            let result = session.send(&message.join(" ")).await;
            emit(cli, result.map(|reply| ReplyView { reply }), |r| r.reply.clone())
        }
        Commands::Chat { .. } => chat_loop(client).await?,
        Commands::Metrics => metrics(cli, client).await,
        Commands::Health => {
            let result = client.health_check().await;
            emit(cli, result, |h| format!("Backend status: {}", h.status))
        }
    };
    Ok(outcome)
}

#[derive(Serialize)]
struct ReplyView {
    reply: String,
}

async fn classify(cli: &Cli, client: &ApiClient, path: &Path) -> Result<ExitCode> {
    let image = ImageUpload::from_path(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    debug!(file = %image.file_name, mime = %image.mime_type, bytes = image.size(), "Classifying image");

    let result = client.classify_image(&image).await;
    Ok(emit(cli, result, render::classification))
}

async fn metrics(cli: &Cli, client: &ApiClient) -> ExitCode {
    let report = match client.get_metrics().await {
        Ok(report) => report,
        Err(e) => return fail(cli, &e),
    };

    // Payload was validated by the client, so only empty data can fail here
    let series = derive_epoch_series(&report).unwrap_or_default();
    let summary = derive_summary(&report).ok();
    let stats = match derive_confusion_stats(report.confusion_matrix) {
        Ok(stats) => Some(stats),
        Err(MetricsError::EmptyMatrix) => {
            warn!("Confusion matrix is empty; statistics unavailable");
            None
        }
        Err(e) => {
            warn!(error = %e, "Could not derive confusion statistics");
            None
        }
    };
    let matrix = ConfusionMatrix::from_rows(report.confusion_matrix);

    if cli.json {
        let body = serde_json::json!({
            "series": series,
            "summary": summary,
            "confusion_matrix": matrix,
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        println!("{}", render::epoch_table(&series));
        if let Some(ref summary) = summary {
            println!("{}\n", render::training_summary(summary));
        }
        print!("{}", render::confusion(&matrix, stats.as_ref()));
    }
    ExitCode::SUCCESS
}

/// Interactive chat on stdin; errors are shown and the loop continues
async fn chat_loop(client: &ApiClient) -> Result<ExitCode> {
    let session = ChatSession::with_greeting(client.clone(), CHAT_GREETING);
    println!("assistant> {}", CHAT_GREETING);
    println!("(type 'exit' to quit)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }

        match session.send(line).await {
            Ok(reply) => println!("assistant> {}", reply),
            Err(e) => eprintln!("{}", render::error(&e)),
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Print a result as JSON or text
fn emit<T, F>(cli: &Cli, result: facelens::Result<T>, to_text: F) -> ExitCode
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match result {
        Ok(value) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
            } else {
                println!("{}", to_text(&value));
            }
            ExitCode::SUCCESS
        }
        Err(e) => fail(cli, &e),
    }
}

fn fail(cli: &Cli, err: &ApiError) -> ExitCode {
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&err.to_standard()).unwrap_or_default()
        );
    } else {
        eprintln!("{}", render::error(err));
    }
    ExitCode::FAILURE
}
