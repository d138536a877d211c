//! Local offline generation: the cascade's guaranteed terminal step
//!
//! Total over every input, including the empty prompt. No network, no
//! filesystem, no wall-clock entropy: all variation is seeded from the
//! request itself so results reproduce in tests.

mod image;
mod text;

use easel_core::{Content, GenerationRequest, Scope};

/// Produce content locally; cannot fail
pub fn generate(request: &GenerationRequest) -> Content {
    match request.scope {
        Scope::Text => text::generate(request),
        Scope::Image => image::generate(request),
    }
}

/// FNV-1a hash of the request fields that determine offline output
pub(crate) fn request_seed(request: &GenerationRequest) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let bytes = request
        .prompt
        .bytes()
        .chain(request.size.width.to_le_bytes())
        .chain(request.size.height.to_le_bytes());

    let mut hash = OFFSET;
    for byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}
