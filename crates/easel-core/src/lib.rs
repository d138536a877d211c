#![allow(clippy::must_use_candidate)]

//! Shared vocabulary for the easel generation pipeline
//!
//! Request and result shapes exchanged between the caller, the failover
//! cascade, and the rendering layer, plus the read-only credential
//! snapshot taken at the start of each request.

mod credentials;
mod preference;
mod request;
mod result;

pub use credentials::{CredentialSnapshot, CredentialStore, EnvCredentialStore, MemoryCredentialStore};
pub use preference::Preference;
pub use request::{GenerationRequest, Scope, SizeParams, StyleParams};
pub use result::{AttemptOutcome, AttemptRecord, Content, GenerationResult};
