//! Canned text synthesis with keyword-based template selection

use easel_core::{Content, GenerationRequest};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::request_seed;

/// Substituted for the topic when the prompt is empty or unusable
const DEFAULT_TOPIC: &str = "the moment";

struct TemplateBucket {
    keywords: &'static [&'static str],
    templates: &'static [&'static str],
}

const BUCKETS: &[TemplateBucket] = &[
    TemplateBucket {
        keywords: &["hello", "hi ", "hey", "howdy", "greetings"],
        templates: &[
            "Hello there! Always good to hear from you.",
            "Hey! Great to see you. What shall we make today?",
            "Hi! I'm here and ready whenever you are.",
        ],
    },
    TemplateBucket {
        keywords: &["thank", "appreciate", "grateful"],
        templates: &[
            "You're very welcome, happy to help.",
            "Anytime! That's what I'm here for.",
        ],
    },
    TemplateBucket {
        keywords: &["bye", "goodbye", "farewell", "see you"],
        templates: &[
            "Goodbye for now, come back soon!",
            "See you later. It's been a pleasure.",
        ],
    },
    TemplateBucket {
        keywords: &["?", "what", "how", "why", "when", "explain", "tell me"],
        templates: &[
            "That's a fine question about {topic}. The short version: it comes down to a few \
             simple ideas working together, and the details reward a closer look.",
            "Thinking about {topic}: start with the basics, and the rest follows more naturally \
             than you'd expect.",
            "{topic} is one of those things that sounds complicated but has a simple core once \
             you strip away the jargon.",
        ],
    },
];

const FALLBACK_TEMPLATES: &[&str] = &[
    "Here's a thought on {topic}: sometimes the simplest take is the truest one.",
    "About {topic}: there's more to it than meets the eye, and that's what makes it interesting.",
    "Consider {topic} from a fresh angle and it starts to look different.",
];

/// Produce canned text for the request; total, never empty
pub(crate) fn generate(request: &GenerationRequest) -> Content {
    let mut rng = StdRng::seed_from_u64(request_seed(request));
    let lowered = request.prompt.to_lowercase();

    let templates = BUCKETS
        .iter()
        .find(|bucket| bucket.keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map_or(FALLBACK_TEMPLATES, |bucket| bucket.templates);

    let template = templates[rng.random_range(0..templates.len())];
    let text = template.replace("{topic}", &topic_of(&request.prompt));

    Content::Text(text)
}

/// A cleaned-up echo of the prompt, suitable for inlining into a template
fn topic_of(prompt: &str) -> String {
    let cleaned: String = prompt
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches(['?', '!', '.'])
        .to_owned();

    if cleaned.is_empty() {
        return DEFAULT_TOPIC.to_owned();
    }

    // Keep templates readable for run-on prompts
    match cleaned.char_indices().nth(80) {
        Some((index, _)) => format!("{}…", &cleaned[..index]),
        None => cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_per_request() {
        let request = GenerationRequest::text("explain gravity");
        assert_eq!(generate(&request), generate(&request));
    }

    #[test]
    fn question_prompts_pick_the_question_bucket() {
        let request = GenerationRequest::text("why is the sky blue?");
        let text = generate(&request).as_text().unwrap().to_owned();
        assert!(text.contains("why is the sky blue"), "topic echoed: {text}");
    }

    #[test]
    fn empty_prompt_uses_the_default_topic() {
        let request = GenerationRequest::text("   ");
        let content = generate(&request);
        assert!(!content.is_empty());
    }

    #[test]
    fn greeting_prompts_get_a_greeting() {
        let request = GenerationRequest::text("hello friend");
        let text = generate(&request).as_text().unwrap().to_owned();
        assert!(!text.contains("{topic}"));
        assert!(!text.is_empty());
    }

    #[test]
    fn long_prompts_are_truncated_in_the_echo() {
        let request = GenerationRequest::text("w".repeat(300));
        let text = generate(&request).as_text().unwrap().to_owned();
        assert!(text.len() < 300 + FALLBACK_TEMPLATES[1].len());
    }
}
