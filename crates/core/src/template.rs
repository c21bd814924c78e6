//! Template placeholder substitution.
//!
//! Email and quote templates carry `{placeholder}` tags that are filled
//! from event and company data at send time. Unknown tags pass through
//! verbatim so a typo in a stored template is visible in the rendered
//! output instead of silently disappearing.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z0-9_]+)\}").unwrap());

/// Replace every known `{tag}` in `template` with its value.
pub fn render(template: &str, values: &HashMap<&str, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures<'_>| {
            match values.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
