//! Preference resolution: user preference + available credentials → an
//! ordered attempt list

use easel_core::{CredentialSnapshot, Preference, Scope};

use crate::registry::{self, ProviderDescriptor, Tier};

/// Resolve the ordered list of remote providers to attempt
///
/// Starts from the scope's fixed priority table, drops user-keyed
/// providers whose credential is absent from the snapshot, then applies
/// the preference: a named provider moves to the front (the rest keep
/// their relative order), the skip sentinel removes the user-keyed tier
/// entirely. Platform and free tiers are never removed, so the cascade
/// can always reach a total success.
///
/// This cannot fail: an empty result simply means the cascade goes
/// straight to its built-in fallback steps.
pub fn resolve_order(
    scope: Scope,
    preference: &Preference,
    credentials: &CredentialSnapshot,
) -> Vec<ProviderDescriptor> {
    let mut order: Vec<ProviderDescriptor> = registry::list(scope)
        .iter()
        .filter(|descriptor| descriptor.tier != Tier::Offline)
        .filter(|descriptor| {
            descriptor
                .credential_key
                .is_none_or(|key| credentials.contains(key))
        })
        .copied()
        .collect();

    match preference {
        Preference::Auto => {}
        Preference::SkipUserKeyed => {
            order.retain(|descriptor| descriptor.tier != Tier::UserKeyed);
        }
        Preference::Provider(id) => {
            if let Some(position) = order.iter().position(|descriptor| descriptor.id == id) {
                let preferred = order.remove(position);
                order.insert(0, preferred);
            }
        }
    }

    tracing::debug!(
        %scope,
        %preference,
        order = ?order.iter().map(|d| d.id).collect::<Vec<_>>(),
        "resolved provider order"
    );

    order
}
