#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Generation provider orchestration
//!
//! Turns one [`easel_core::GenerationRequest`] into a guaranteed
//! [`easel_core::GenerationResult`] by trying a dynamically ordered
//! sequence of remote providers (per-attempt deadlines, bounded retries,
//! tier-by-tier failover) and terminating in a local generator that
//! cannot fail.
//!
//! The cascade is strictly sequential across providers and
//! short-circuits on the first success. All attempt failures are
//! recorded, never thrown: callers inspect the attempt trail on the
//! result instead of catching errors.

mod attempt;
mod cascade;
mod error;
mod normalize;
pub mod offline;
pub mod provider;
pub mod registry;
mod resolve;
mod retry;

pub use cascade::Cascade;
pub use error::GenError;
pub use normalize::normalize;
pub use provider::{Provider, RawPayload};
pub use resolve::resolve_order;
pub use retry::RetryPolicy;
