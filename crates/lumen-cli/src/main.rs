//! Lumen command-line entry point: one optimization run per invocation.
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        reason = "Allow for tests"
    )
)]

use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser as _;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

use lumen_core::{AnalyzerBackend, Disposition, LumenConfig, Request};
use lumen_pipeline::{Invoker, Pipeline};
use lumen_providers::GeminiGenerator;

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lumen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = LumenConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    let backend = cli.backend.map_or(config.backend, AnalyzerBackend::from);
    let mode = cli.mode.map_or(config.mode, Into::into);

    // The LLM backend and --answer both need model access; the rules
    // backend without --answer runs fully offline.
    let invoker = if backend == AnalyzerBackend::Llm || cli.answer {
        Some(Arc::new(build_invoker(&config)?))
    } else {
        None
    };

    let pipeline = match backend {
        AnalyzerBackend::Rules => Pipeline::rules(mode),
        AnalyzerBackend::Llm => {
            let shared = invoker
                .as_ref()
                .map(Arc::clone)
                .context("llm backend requires an invoker")?;
            Pipeline::llm(shared, mode)
        }
    };

    let mut request = Request::new(cli.request);
    if let Some(context) = cli.context {
        request = request.with_prior_context(context);
    }

    let result = pipeline.run(&request).await?;
    print_output(&result.output);

    if cli.answer {
        if result.disposition == Disposition::NeedsClarification {
            tracing::info!("request needs clarification, skipping final answer");
        } else if let Some(invoker) = invoker {
            tracing::info!("generating final answer from the optimized prompt");
            let answer = invoker.generate(&result.output).await?;
            print_output("\n--- Answer ---\n");
            print_output(&answer);
        }
    }

    Ok(())
}

/// Builds the rate-limited invoker over the Gemini provider from
/// configuration.
fn build_invoker(config: &LumenConfig) -> Result<Invoker> {
    let api_key = config.resolve_api_key()?;
    let generator =
        GeminiGenerator::with_api_key(api_key)?.with_model(config.model.model.clone());
    Ok(Invoker::from_config(Arc::new(generator), &config.invoker))
}

#[allow(clippy::print_stdout, reason = "User-facing CLI output")]
fn print_output(text: &str) {
    println!("{text}");
}
