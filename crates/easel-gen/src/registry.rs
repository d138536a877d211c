//! Static catalog of provider descriptors per scope
//!
//! The catalog is the single source of truth for which providers exist,
//! which tier each belongs to, and which credential unlocks it. Dispatch
//! everywhere else is by iteration over this table, never by ad-hoc
//! provider-name conditionals.

use std::fmt;

use easel_core::Scope;

/// Id of the terminal local generator
pub const OFFLINE_PROVIDER: &str = "offline";

/// Priority class of a provider, tried in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Requires a user-supplied credential
    UserKeyed,
    /// Hosted by the platform, no credential needed
    Platform,
    /// Free/anonymous remote endpoint
    Free,
    /// Local synthesis, cannot fail
    Offline,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserKeyed => f.write_str("user-keyed"),
            Self::Platform => f.write_str("platform"),
            Self::Free => f.write_str("free"),
            Self::Offline => f.write_str("offline"),
        }
    }
}

/// Immutable description of one provider within one scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderDescriptor {
    pub id: &'static str,
    pub scope: Scope,
    /// Environment key for the credential this provider needs; `None`
    /// means the provider is usable without one
    pub credential_key: Option<&'static str>,
    pub tier: Tier,
}

/// Default priority order for text generation
const TEXT_PROVIDERS: &[ProviderDescriptor] = &[
    ProviderDescriptor {
        id: "groq",
        scope: Scope::Text,
        credential_key: Some("GROQ_API_KEY"),
        tier: Tier::UserKeyed,
    },
    ProviderDescriptor {
        id: "openai",
        scope: Scope::Text,
        credential_key: Some("OPENAI_API_KEY"),
        tier: Tier::UserKeyed,
    },
    ProviderDescriptor {
        id: "puter",
        scope: Scope::Text,
        credential_key: None,
        tier: Tier::Platform,
    },
    ProviderDescriptor {
        id: "pollinations",
        scope: Scope::Text,
        credential_key: None,
        tier: Tier::Free,
    },
    ProviderDescriptor {
        id: OFFLINE_PROVIDER,
        scope: Scope::Text,
        credential_key: None,
        tier: Tier::Offline,
    },
];

/// Default priority order for image generation
const IMAGE_PROVIDERS: &[ProviderDescriptor] = &[
    ProviderDescriptor {
        id: "openai",
        scope: Scope::Image,
        credential_key: Some("OPENAI_API_KEY"),
        tier: Tier::UserKeyed,
    },
    ProviderDescriptor {
        id: "puter",
        scope: Scope::Image,
        credential_key: None,
        tier: Tier::Platform,
    },
    ProviderDescriptor {
        id: "pollinations",
        scope: Scope::Image,
        credential_key: None,
        tier: Tier::Free,
    },
    ProviderDescriptor {
        id: OFFLINE_PROVIDER,
        scope: Scope::Image,
        credential_key: None,
        tier: Tier::Offline,
    },
];

/// All providers for a scope, grouped by tier in priority order
pub const fn list(scope: Scope) -> &'static [ProviderDescriptor] {
    match scope {
        Scope::Text => TEXT_PROVIDERS,
        Scope::Image => IMAGE_PROVIDERS,
    }
}

/// Look up a descriptor by scope and id
pub fn find(scope: Scope, id: &str) -> Option<ProviderDescriptor> {
    list(scope).iter().find(|d| d.id == id).copied()
}

/// The distinguished platform-tier provider for a scope
///
/// The cascade falls back to this provider even when the resolved order
/// somehow omitted it.
pub fn platform_provider(scope: Scope) -> ProviderDescriptor {
    by_tier(scope, Tier::Platform)
}

/// The distinguished free/anonymous provider for a scope
pub fn free_provider(scope: Scope) -> ProviderDescriptor {
    by_tier(scope, Tier::Free)
}

fn by_tier(scope: Scope, tier: Tier) -> ProviderDescriptor {
    list(scope)
        .iter()
        .find(|d| d.tier == tier)
        .copied()
        .expect("catalog defines one provider per tier and scope")
}

/// Credential keys relevant to a scope, for snapshotting
pub fn credential_keys(scope: Scope) -> Vec<&'static str> {
    list(scope).iter().filter_map(|d| d.credential_key).collect()
}

/// Whether any scope knows this provider id
pub fn is_known_provider(id: &str) -> bool {
    list(Scope::Text).iter().chain(list(Scope::Image)).any(|d| d.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_grouped_in_priority_order() {
        for scope in [Scope::Text, Scope::Image] {
            let tiers: Vec<Tier> = list(scope).iter().map(|d| d.tier).collect();
            let mut sorted = tiers.clone();
            sorted.sort();
            assert_eq!(tiers, sorted, "{scope} catalog must be tier-ordered");
        }
    }

    #[test]
    fn each_scope_has_the_distinguished_tiers() {
        for scope in [Scope::Text, Scope::Image] {
            assert_eq!(platform_provider(scope).tier, Tier::Platform);
            assert_eq!(free_provider(scope).tier, Tier::Free);
            assert_eq!(list(scope).last().unwrap().id, OFFLINE_PROVIDER);
        }
    }

    #[test]
    fn credential_free_tiers_have_no_key() {
        for scope in [Scope::Text, Scope::Image] {
            for descriptor in list(scope) {
                match descriptor.tier {
                    Tier::UserKeyed => assert!(descriptor.credential_key.is_some()),
                    _ => assert!(descriptor.credential_key.is_none()),
                }
            }
        }
    }

    #[test]
    fn lookup_by_id() {
        assert!(find(Scope::Text, "groq").is_some());
        assert!(find(Scope::Image, "groq").is_none());
        assert!(is_known_provider("pollinations"));
        assert!(!is_known_provider("unknown"));
    }
}
