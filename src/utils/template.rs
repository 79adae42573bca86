//! String template rendering utilities.
//!
//! Placeholders use `{{name}}` syntax. Unknown placeholders are left in place
//! so callers can detect them with [`unresolved`].

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("placeholder pattern is valid")
});

/// Render every `{{key}}` in one pass. Substituted values are never rescanned.
pub fn render_map(template: &str, variables: &HashMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match variables.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Names of `{{placeholders}}` in `template` that `variables` cannot fill.
pub fn unresolved(template: &str, variables: &HashMap<String, String>) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .filter(|name| !variables.contains_key(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn render_map_replaces_all_occurrences() {
        assert_eq!(
            render_map("{{slug}}-{{slug}}", &vars(&[("slug", "acme")])),
            "acme-acme"
        );
    }

    #[test]
    fn render_map_leaves_unknown_placeholders() {
        let vars = vars(&[("applicationName", "acme")]);
        let out = render_map("{{applicationName}}editor {{missing}}", &vars);
        assert_eq!(out, "acmeeditor {{missing}}");
        assert_eq!(
            unresolved("{{applicationName}}editor {{missing}}", &vars),
            vec!["missing".to_string()]
        );
    }

    #[test]
    fn placeholder_inside_a_value_is_not_expanded() {
        let vars = vars(&[("brandName", "{{applicationName}}"), ("applicationName", "acme")]);
        for _ in 0..32 {
            assert_eq!(
                render_map("{{brandName}}/{{applicationName}}", &vars),
                "{{applicationName}}/acme"
            );
        }
        assert!(unresolved("{{brandName}}", &vars).is_empty());
    }

    #[test]
    fn unresolved_ignores_non_identifier_braces() {
        assert!(unresolved("{{ not a name }} and {{}}", &HashMap::new()).is_empty());
    }
}
