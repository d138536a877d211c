//! The failover cascade: one request in, exactly one result out

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use easel_config::Config;
use easel_core::{
    AttemptOutcome, AttemptRecord, CredentialSnapshot, GenerationRequest, GenerationResult, Preference,
    Scope,
};
use tokio_util::sync::CancellationToken;

use crate::offline;
use crate::provider::{Provider, build_provider};
use crate::registry::{self, OFFLINE_PROVIDER};
use crate::resolve::resolve_order;
use crate::retry::{RetryOutcome, RetryPolicy, run_provider};

/// Per-scope cascade tuning taken from configuration
#[derive(Debug, Clone)]
struct ScopeSettings {
    preference: Preference,
    retry_delay: std::time::Duration,
    retry_delay_step: std::time::Duration,
}

impl ScopeSettings {
    fn from_config(config: &easel_config::ScopeConfig) -> Self {
        Self {
            preference: config.preference.clone(),
            retry_delay: config.retry_delay(),
            retry_delay_step: config.retry_delay_step(),
        }
    }
}

/// Scope-parameterized generation orchestrator
///
/// One instance serves both scopes and any number of concurrent
/// requests: every run owns its records and reads only immutable shared
/// state (the registry, the adapters, and the caller's credential
/// snapshot), so no locking is needed between requests.
pub struct Cascade {
    providers: HashMap<&'static str, Arc<dyn Provider>>,
    text: ScopeSettings,
    image: ScopeSettings,
}

impl Cascade {
    /// Build the cascade and all provider adapters from configuration
    pub fn new(config: &Config) -> Self {
        let mut providers: HashMap<&'static str, Arc<dyn Provider>> = HashMap::new();

        for scope in [Scope::Text, Scope::Image] {
            for descriptor in registry::list(scope) {
                if providers.contains_key(descriptor.id) {
                    continue;
                }
                if let Some(provider) =
                    build_provider(descriptor, config.base_url_override(descriptor.id))
                {
                    providers.insert(descriptor.id, provider);
                }
            }
        }

        Self {
            providers,
            text: ScopeSettings::from_config(&config.text),
            image: ScopeSettings::from_config(&config.image),
        }
    }

    const fn settings(&self, scope: Scope) -> &ScopeSettings {
        match scope {
            Scope::Text => &self.text,
            Scope::Image => &self.image,
        }
    }

    /// Run one full cascade: total, never errors, never hangs
    ///
    /// Providers are tried strictly in sequence: attempts have cost and
    /// priority matters, so providers are never raced against each other.
    /// The first success short-circuits the rest. When every remote tier
    /// is exhausted (or the caller cancels), the offline generator
    /// produces the terminal result; that step is synchronous and is not
    /// subject to cancellation.
    pub async fn run(
        &self,
        request: &GenerationRequest,
        credentials: &CredentialSnapshot,
        cancel: &CancellationToken,
    ) -> GenerationResult {
        let settings = self.settings(request.scope);
        let policy = RetryPolicy {
            max_retries: request.max_retries_per_provider,
            initial_delay: settings.retry_delay,
            delay_step: settings.retry_delay_step,
        };

        let order = resolve_order(request.scope, &settings.preference, credentials);

        let mut records: Vec<AttemptRecord> = Vec::new();
        let mut attempted: HashSet<&'static str> = HashSet::new();
        let mut cancelled = false;

        // The resolved order normally already ends with the platform and
        // free tiers; chaining the distinguished descriptors guarantees
        // both get their turn even under exotic preference tables, and the
        // attempted-set keeps any provider from running twice.
        let chain = order
            .into_iter()
            .chain([
                registry::platform_provider(request.scope),
                registry::free_provider(request.scope),
            ]);

        for descriptor in chain {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }
            if !attempted.insert(descriptor.id) {
                continue;
            }
            let Some(provider) = self.providers.get(descriptor.id) else {
                tracing::warn!(provider = descriptor.id, "no adapter built for provider, skipping");
                continue;
            };

            let credential = descriptor.credential_key.and_then(|key| credentials.get(key));

            tracing::debug!(
                provider = descriptor.id,
                tier = %descriptor.tier,
                scope = %request.scope,
                "attempting provider"
            );

            match run_provider(provider.as_ref(), request, credential, policy, cancel, &mut records).await
            {
                RetryOutcome::Success(content) => {
                    tracing::info!(
                        provider = descriptor.id,
                        attempts = records.len(),
                        "generation succeeded"
                    );
                    return GenerationResult {
                        content,
                        source_provider: descriptor.id.to_owned(),
                        degraded: false,
                        attempts: records,
                    };
                }
                RetryOutcome::Exhausted => {
                    tracing::warn!(
                        provider = descriptor.id,
                        tier = %descriptor.tier,
                        "provider exhausted, advancing cascade"
                    );
                }
                RetryOutcome::Cancelled => {
                    cancelled = true;
                    break;
                }
            }
        }

        if cancelled {
            tracing::info!(scope = %request.scope, "cascade cancelled, finishing with offline result");
        } else {
            tracing::warn!(
                scope = %request.scope,
                attempts = records.len(),
                "all remote providers exhausted, degrading to offline generation"
            );
        }

        let started = Instant::now();
        let content = offline::generate(request);
        records.push(AttemptRecord {
            provider: OFFLINE_PROVIDER.to_owned(),
            attempt: 0,
            duration: started.elapsed(),
            outcome: AttemptOutcome::Success,
            error: None,
        });

        GenerationResult {
            content,
            source_provider: OFFLINE_PROVIDER.to_owned(),
            degraded: true,
            attempts: records,
        }
    }
}
