use crate::error::{Error, Result};

/// Application slug: lower-cased with every whitespace character removed.
///
/// Unlike a URL slug, punctuation is kept as-is; `"My Brand"` becomes
/// `"mybrand"` and `"Flow Code 2"` becomes `"flowcode2"`.
pub fn application_slug(value: &str, field_name: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(Error::validation_invalid_argument(
            field_name,
            format!("{} cannot be empty", capitalize(field_name)),
            None,
        ));
    }

    Ok(value
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect())
}

/// Upper-case the first character, leave the remainder untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_lowercases_and_strips_spaces() {
        assert_eq!(application_slug("Flow Code", "brandName").unwrap(), "flowcode");
    }

    #[test]
    fn slug_strips_every_whitespace_run() {
        assert_eq!(
            application_slug("  My \t Big\nBrand ", "brandName").unwrap(),
            "mybigbrand"
        );
    }

    #[test]
    fn slug_keeps_punctuation_and_digits() {
        assert_eq!(application_slug("Acme-2 Pro", "brandName").unwrap(), "acme-2pro");
    }

    #[test]
    fn slug_empty_fails() {
        assert!(application_slug("", "brandName").is_err());
        assert!(application_slug("   ", "brandName").is_err());
    }

    #[test]
    fn capitalize_works() {
        assert_eq!(capitalize("brandName"), "BrandName");
        assert_eq!(capitalize(""), "");
    }
}
