//! Named-placeholder templates.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{CoreError, CoreResult};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("invalid regex"));

/// Renders `template`, replacing each `{name}` with its value.
///
/// `{{` and `}}` produce literal braces.
///
/// # Errors
///
/// Returns [`CoreError::Template`] if the template names a placeholder
/// without a value.
pub fn render(template: &str, values: &[(&str, &str)]) -> CoreResult<String> {
    let mut missing = None;

    let rendered = PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        let Some(name) = caps.get(1) else {
            return caps[0][..1].to_string();
        };
        match values.iter().find(|(key, _)| *key == name.as_str()) {
            Some((_, value)) => (*value).to_string(),
            None => {
                missing.get_or_insert_with(|| name.as_str().to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(name) => Err(CoreError::Template(format!(
            "no value for placeholder `{{{name}}}`"
        ))),
        None => Ok(rendered.into_owned()),
    }
}
