#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::time::Duration;

use args::Args;
use clap::Parser;
use easel_config::Config;
use easel_core::{Content, CredentialStore, EnvCredentialStore, GenerationRequest, Preference, Scope, SizeParams};
use easel_gen::{Cascade, registry};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load_or_default(args.config.as_deref())?;
    easel_telemetry::init(&config.telemetry)?;

    let scope: Scope = args.scope.into();

    // CLI preference wins over the config file for this one run
    if let Some(raw) = args.preference {
        let preference = Preference::from(raw);
        if let Preference::Provider(id) = &preference
            && !registry::is_known_provider(id)
        {
            tracing::warn!(provider = %id, "preferred provider is unknown, falling back to default order");
        }
        match scope {
            Scope::Text => config.text.preference = preference,
            Scope::Image => config.image.preference = preference,
        }
    }

    let request = build_request(scope, &args.prompt, &config, args.timeout_ms, args.width, args.height);

    let credentials = EnvCredentialStore.snapshot(&registry::credential_keys(scope));
    let cascade = Cascade::new(&config);

    // Dismissal (ctrl-c) aborts the in-flight attempt; the run still
    // resolves with the offline result
    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, cancelling generation");
            cancel_on_signal.cancel();
        }
    });

    tracing::info!(%scope, prompt_chars = args.prompt.len(), "starting generation");

    let result = cascade.run(&request, &credentials, &cancel).await;

    for record in &result.attempts {
        tracing::debug!(
            provider = %record.provider,
            attempt = record.attempt,
            outcome = %record.outcome,
            duration_ms = record.duration.as_millis(),
            error = record.error.as_deref().unwrap_or(""),
            "attempt"
        );
    }

    if result.degraded {
        tracing::warn!(
            attempts = result.attempts.len(),
            "every remote provider failed; content was generated locally"
        );
    } else {
        tracing::info!(
            provider = %result.source_provider,
            attempts = result.attempts.len(),
            "generation complete"
        );
    }

    emit(&result.content, args.out.as_deref())
}

fn build_request(
    scope: Scope,
    prompt: &str,
    config: &Config,
    timeout_ms: Option<u64>,
    width: Option<u32>,
    height: Option<u32>,
) -> GenerationRequest {
    let scope_config = config.scope(scope);

    let mut request = match scope {
        Scope::Text => GenerationRequest::text(prompt),
        Scope::Image => GenerationRequest::image(prompt),
    }
    .with_timeout(timeout_ms.map_or_else(|| scope_config.timeout(), Duration::from_millis))
    .with_max_retries(scope_config.max_retries_per_provider);

    if let (Some(width), Some(height)) = (width, height) {
        request = request.with_size(SizeParams::new(width, height));
    }

    request
}

fn emit(content: &Content, out: Option<&std::path::Path>) -> anyhow::Result<()> {
    match content {
        Content::Text(text) => match out {
            Some(path) => {
                std::fs::write(path, text)?;
                tracing::info!(path = %path.display(), "wrote text result");
            }
            None => println!("{text}"),
        },
        Content::Bytes { data, media_type } => {
            let path = out.ok_or_else(|| {
                anyhow::anyhow!("--out is required for binary output ({media_type}, {} bytes)", data.len())
            })?;
            std::fs::write(path, data)?;
            tracing::info!(path = %path.display(), media_type = %media_type, bytes = data.len(), "wrote binary result");
        }
    }

    Ok(())
}
