use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

use super::derive::derive;
use crate::error::{Error, Result};
use crate::io;

/// Fields a persisted profile must carry; everything else can be derived.
pub const REQUIRED_FIELDS: &[&str] = &["brandName", "version", "buildNumber"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionsGallery {
    pub service_url: String,
    pub item_url: String,
}

/// Fully-resolved brand identity. Read-only once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandProfile {
    // Identity
    pub brand_name: String,
    pub brand_name_short: String,
    pub brand_name_long: String,
    pub application_name: String,

    // Platform identifiers
    pub data_folder_name: String,
    pub win32_mutex_name: String,
    pub win32_dir_name: String,
    pub win32_name_version: String,
    pub win32_reg_value_name: String,
    pub win32_app_user_model_id: String,
    pub win32_shell_name_short: String,
    pub win32_tunnel_service_mutex: String,
    pub win32_tunnel_mutex: String,
    pub darwin_bundle_identifier: String,
    pub linux_icon_name: String,
    pub url_protocol: String,
    pub server_application_name: String,
    pub server_data_folder_name: String,
    pub tunnel_application_name: String,

    // Network and licensing
    pub license_name: String,
    pub license_url: String,
    pub report_issue_url: String,
    pub website_url: String,
    pub discord_url: String,

    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,

    // Asset sources
    pub logo_path: String,
    pub icon_path: String,
    pub splash_image_path: String,
    pub about_image_path: String,
    pub favicon_path: String,

    pub description: String,
    pub tagline: String,

    // Version metadata, free-form
    pub version: String,
    pub build_number: String,

    pub extensions_gallery: ExtensionsGallery,
    pub link_protection_trusted_domains: Vec<String>,
}

/// A profile read from disk, plus anything worth telling the user about it.
#[derive(Debug, Clone)]
pub struct LoadedProfile {
    pub profile: BrandProfile,
    pub warnings: Vec<String>,
}

/// On-disk encoding of a profile document, picked by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFormat {
    Json,
    Toml,
}

impl ProfileFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => ProfileFormat::Toml,
            _ => ProfileFormat::Json,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ProfileFormat::Json => "json",
            ProfileFormat::Toml => "toml",
        }
    }
}

impl BrandProfile {
    /// Top-level fields as a JSON object, keyed by their document names.
    pub fn fields(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Look up one field by its document name.
    pub fn field(&self, name: &str) -> Option<Value> {
        self.fields().remove(name)
    }

    /// String-valued fields only, for `{{placeholder}}` rendering.
    pub fn string_fields(&self) -> HashMap<String, String> {
        self.fields()
            .into_iter()
            .filter_map(|(k, v)| match v {
                Value::String(s) => Some((k, s)),
                _ => None,
            })
            .collect()
    }

    pub fn to_document(&self, format: ProfileFormat) -> Result<String> {
        match format {
            ProfileFormat::Json => serde_json::to_string_pretty(self).map_err(|e| {
                Error::internal_json(e.to_string(), Some("serialize profile".to_string()))
            }),
            ProfileFormat::Toml => toml::to_string_pretty(self).map_err(|e| {
                Error::internal_unexpected(format!("serialize profile as TOML: {}", e))
            }),
        }
    }
}

/// Load a profile document from disk.
pub fn load(path: &Path) -> Result<LoadedProfile> {
    let raw = io::read_file(path, &format!("read profile {}", path.display()))?;
    from_document(&raw, ProfileFormat::from_path(path), &path.display().to_string())
}

/// Parse and validate a profile document.
///
/// Fields absent from the document are derived from its `brandName`; fields
/// present are taken verbatim and never re-derived.
pub fn from_document(raw: &str, format: ProfileFormat, source: &str) -> Result<LoadedProfile> {
    let document: Value = match format {
        ProfileFormat::Json => {
            serde_json::from_str(raw).map_err(|e| Error::profile_invalid(source, e.to_string()))?
        }
        ProfileFormat::Toml => {
            toml::from_str(raw).map_err(|e| Error::profile_invalid(source, e.to_string()))?
        }
    };

    let Value::Object(document) = document else {
        return Err(Error::profile_invalid(
            source,
            "profile document must be an object",
        ));
    };

    for field in REQUIRED_FIELDS {
        match document.get(*field) {
            Some(Value::String(s)) if !s.trim().is_empty() => {}
            Some(Value::String(_)) | None => {
                return Err(Error::profile_missing_field(*field, Some(source.to_string())));
            }
            Some(other) => {
                return Err(Error::profile_invalid(
                    source,
                    format!("'{}' must be a string, found {}", field, json_type(other)),
                ));
            }
        }
    }

    let brand_name = document
        .get("brandName")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let mut resolved = derive(brand_name)?.fields();
    let mut warnings = Vec::new();

    for (key, value) in document {
        if resolved.contains_key(&key) {
            resolved.insert(key, value);
        } else {
            warnings.push(format!("Ignoring unknown profile field '{}'", key));
        }
    }

    let profile: BrandProfile = serde_json::from_value(Value::Object(resolved))
        .map_err(|e| Error::profile_invalid(source, e.to_string()))?;

    if semver::Version::parse(&profile.version).is_err() {
        warnings.push(format!(
            "Profile version '{}' is not a semantic version",
            profile.version
        ));
    }

    Ok(LoadedProfile { profile, warnings })
}

/// Short JSON type name for diagnostics.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> &'static str {
        r#"{"brandName": "Acme", "version": "2.1.0", "buildNumber": "0042"}"#
    }

    #[test]
    fn minimal_document_fills_derived_fields() {
        let loaded = from_document(minimal(), ProfileFormat::Json, "brand.json").unwrap();
        let p = loaded.profile;
        assert_eq!(p.application_name, "acme");
        assert_eq!(p.win32_mutex_name, "acmeeditor");
        assert_eq!(p.version, "2.1.0");
        assert_eq!(p.build_number, "0042");
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn present_fields_are_never_rederived() {
        let raw = r#"{
            "brandName": "Acme",
            "applicationName": "acme-ide",
            "websiteUrl": "https://acme.example",
            "version": "1.0.0",
            "buildNumber": "1"
        }"#;
        let p = from_document(raw, ProfileFormat::Json, "brand.json")
            .unwrap()
            .profile;
        assert_eq!(p.application_name, "acme-ide");
        assert_eq!(p.website_url, "https://acme.example");
        // Untouched derived fields still come from brandName.
        assert_eq!(p.win32_mutex_name, "acmeeditor");
    }

    #[test]
    fn missing_required_field_is_structural_error() {
        let raw = r#"{"brandName": "Acme", "version": "1.0.0"}"#;
        let err = from_document(raw, ProfileFormat::Json, "brand.json").unwrap_err();
        assert_eq!(err.code.as_str(), "profile.missing_field");
        assert_eq!(err.details["field"], "buildNumber");
    }

    #[test]
    fn empty_brand_name_is_missing() {
        let raw = r#"{"brandName": "  ", "version": "1.0.0", "buildNumber": "1"}"#;
        let err = from_document(raw, ProfileFormat::Json, "brand.json").unwrap_err();
        assert_eq!(err.code.as_str(), "profile.missing_field");
    }

    #[test]
    fn wrong_typed_field_is_rejected() {
        let raw = r#"{"brandName": "Acme", "version": "1.0.0", "buildNumber": "1", "logoPath": 7}"#;
        let err = from_document(raw, ProfileFormat::Json, "brand.json").unwrap_err();
        assert_eq!(err.code.as_str(), "profile.invalid");
    }

    #[test]
    fn unparsable_document_is_rejected() {
        let err = from_document("{ nope", ProfileFormat::Json, "brand.json").unwrap_err();
        assert_eq!(err.code.as_str(), "profile.invalid");

        let err = from_document("[1, 2]", ProfileFormat::Json, "brand.json").unwrap_err();
        assert_eq!(err.code.as_str(), "profile.invalid");
    }

    #[test]
    fn unknown_keys_produce_warnings() {
        let raw = r#"{"brandName": "Acme", "version": "1.0.0", "buildNumber": "1", "mascot": "owl"}"#;
        let loaded = from_document(raw, ProfileFormat::Json, "brand.json").unwrap();
        assert_eq!(loaded.warnings.len(), 1);
        assert!(loaded.warnings[0].contains("mascot"));
    }

    #[test]
    fn non_semver_version_warns_but_loads() {
        let raw = r#"{"brandName": "Acme", "version": "2024.1", "buildNumber": "1"}"#;
        let loaded = from_document(raw, ProfileFormat::Json, "brand.json").unwrap();
        assert_eq!(loaded.profile.version, "2024.1");
        assert!(loaded.warnings.iter().any(|w| w.contains("semantic version")));
    }

    #[test]
    fn toml_document_loads() {
        let raw = "brandName = \"Acme\"\nversion = \"1.0.0\"\nbuildNumber = \"0001\"\ntagline = \"Build faster\"\n";
        let p = from_document(raw, ProfileFormat::Toml, "brand.toml")
            .unwrap()
            .profile;
        assert_eq!(p.tagline, "Build faster");
        assert_eq!(p.application_name, "acme");
    }

    #[test]
    fn derived_profile_round_trips_through_json_document() {
        let derived = derive("Flow Code").unwrap();
        let doc = derived.to_document(ProfileFormat::Json).unwrap();
        let loaded = from_document(&doc, ProfileFormat::Json, "flowcode-brand.json").unwrap();
        assert_eq!(loaded.profile, derived);
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn string_fields_skip_structured_values() {
        let fields = derive("Acme").unwrap().string_fields();
        assert_eq!(fields.get("applicationName").map(String::as_str), Some("acme"));
        assert!(!fields.contains_key("extensionsGallery"));
        assert!(!fields.contains_key("linkProtectionTrustedDomains"));
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(ProfileFormat::from_path(Path::new("a.toml")), ProfileFormat::Toml);
        assert_eq!(ProfileFormat::from_path(Path::new("a.json")), ProfileFormat::Json);
        assert_eq!(ProfileFormat::from_path(Path::new("a")), ProfileFormat::Json);
    }
}
