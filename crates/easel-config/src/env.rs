use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Expand `{{ env.VAR }}` placeholders in raw TOML text
///
/// `{{ env.VAR | default("value") }}` substitutes the default when the
/// variable is unset. TOML comment lines pass through untouched so that a
/// commented-out placeholder never fails the load.
pub fn expand_env(input: &str) -> anyhow::Result<String> {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let placeholder = PLACEHOLDER.get_or_init(|| {
        Regex::new(r#"\{\{\s*env\.([A-Za-z0-9_]+)\s*(?:\|\s*default\("([^"]*)"\)\s*)?\}\}"#)
            .expect("placeholder pattern is valid")
    });

    let expanded: Result<Vec<String>, anyhow::Error> = input
        .lines()
        .map(|line| {
            if line.trim_start().starts_with('#') {
                return Ok(line.to_owned());
            }
            replace_placeholders(placeholder, line)
        })
        .collect();

    let mut output = expanded?.join("\n");
    if input.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn replace_placeholders(placeholder: &Regex, line: &str) -> anyhow::Result<String> {
    let mut failure: Option<String> = None;

    let replaced = placeholder.replace_all(line, |captures: &Captures<'_>| {
        let var = &captures[1];
        match std::env::var(var) {
            Ok(value) => value,
            Err(_) => captures.get(2).map_or_else(
                || {
                    failure = Some(var.to_owned());
                    String::new()
                },
                |default| default.as_str().to_owned(),
            ),
        }
    });

    match failure {
        Some(var) => anyhow::bail!("environment variable not found: `{var}`"),
        None => Ok(replaced.into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_set_variable() {
        temp_env::with_var("EASEL_TEST_URL", Some("http://localhost:9"), || {
            let out = expand_env("base_url = \"{{ env.EASEL_TEST_URL }}\"").unwrap();
            assert_eq!(out, "base_url = \"http://localhost:9\"");
        });
    }

    #[test]
    fn unset_variable_without_default_fails() {
        temp_env::with_var_unset("EASEL_TEST_MISSING", || {
            let err = expand_env("key = \"{{ env.EASEL_TEST_MISSING }}\"").unwrap_err();
            assert!(err.to_string().contains("EASEL_TEST_MISSING"));
        });
    }

    #[test]
    fn unset_variable_with_default_uses_default() {
        temp_env::with_var_unset("EASEL_TEST_MISSING", || {
            let out =
                expand_env("filter = \"{{ env.EASEL_TEST_MISSING | default(\"debug\") }}\"").unwrap();
            assert_eq!(out, "filter = \"debug\"");
        });
    }

    #[test]
    fn comment_lines_are_not_expanded() {
        temp_env::with_var_unset("EASEL_TEST_MISSING", || {
            let input = "# key = \"{{ env.EASEL_TEST_MISSING }}\"\ntimeout_ms = 1";
            let out = expand_env(input).unwrap();
            assert_eq!(out, input);
        });
    }

    #[test]
    fn preserves_trailing_newline() {
        let out = expand_env("a = 1\n").unwrap();
        assert_eq!(out, "a = 1\n");
    }
}
