//! Procedural SVG synthesis for offline image generation

use std::fmt::Write as _;

use easel_core::{Content, GenerationRequest};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::request_seed;

/// Dimensions outside this range are clamped rather than rejected
const MIN_DIMENSION: u32 = 16;
const MAX_DIMENSION: u32 = 4096;

/// Background gradient pairs, picked per request
const GRADIENTS: &[(&str, &str)] = &[
    ("#1a2a6c", "#b21f1f"),
    ("#0f2027", "#2c5364"),
    ("#42275a", "#734b6d"),
    ("#136a8a", "#267871"),
    ("#2b5876", "#4e4376"),
    ("#141e30", "#243b55"),
];

/// Accent colors for the floating shapes
const ACCENTS: &[&str] = &[
    "#fdbb2d", "#f8b500", "#ee9ca7", "#a8e063", "#76b2fe", "#f45c43", "#c2e59c", "#ffd452",
];

/// Produce a deterministic SVG artifact sized per the request; total
pub(crate) fn generate(request: &GenerationRequest) -> Content {
    let width = request.size.width.clamp(MIN_DIMENSION, MAX_DIMENSION);
    let height = request.size.height.clamp(MIN_DIMENSION, MAX_DIMENSION);

    let mut rng = StdRng::seed_from_u64(request_seed(request));

    let (start, end) = GRADIENTS[rng.random_range(0..GRADIENTS.len())];
    let shapes = rng.random_range(5..=9);

    let mut svg = String::with_capacity(1024);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    let _ = write!(
        svg,
        r##"<defs><linearGradient id="bg" x1="0" y1="0" x2="1" y2="1"><stop offset="0" stop-color="{start}"/><stop offset="1" stop-color="{end}"/></linearGradient></defs>"##
    );
    let _ = write!(svg, r##"<rect width="{width}" height="{height}" fill="url(#bg)"/>"##);

    for _ in 0..shapes {
        let cx = rng.random_range(0..width);
        let cy = rng.random_range(0..height);
        let r = rng.random_range(width.min(height) / 16..=width.min(height) / 4);
        let fill = ACCENTS[rng.random_range(0..ACCENTS.len())];
        let opacity = rng.random_range(0.25..0.85);
        let _ = write!(
            svg,
            r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}" opacity="{opacity:.2}"/>"#
        );
    }

    svg.push_str("</svg>");

    Content::Bytes {
        data: svg.into_bytes(),
        media_type: "image/svg+xml".to_owned(),
    }
}
