//! Structured document patching: overwrite existing top-level keys of a JSON
//! document from the brand profile.
//!
//! Keys the document does not already define are never added, with one
//! exception: a target's version fields are written whether present or not.

use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

use crate::brand::{json_type, BrandProfile};
use crate::error::{Error, Result};
use crate::io;
use crate::layout::DocumentTarget;

/// What a single document patch changed.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPatchReport {
    pub path: String,
    /// Existing keys overwritten from the profile.
    pub updated_keys: Vec<String>,
    /// Version keys written unconditionally.
    pub version_keys: Vec<String>,
    /// Bindings skipped because the document lacks the key.
    pub absent_keys: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Load `target.path` under `root`, patch it, and write it back.
pub fn patch_document(
    root: &Path,
    target: &DocumentTarget,
    profile: &BrandProfile,
) -> Result<DocumentPatchReport> {
    let path = root.join(&target.path);
    if !path.is_file() {
        return Err(Error::document_not_found(path.display().to_string()));
    }

    let raw = io::read_file(&path, &format!("read {}", target.path))?;
    let parsed: Value = serde_json::from_str(&raw)
        .map_err(|e| Error::document_invalid_json(path.display().to_string(), e))?;

    let mut document = match parsed {
        Value::Object(map) => map,
        other => {
            return Err(Error::document_invalid_shape(
                path.display().to_string(),
                json_type(&other),
            ))
        }
    };

    let mut report = patch_object(&mut document, target, profile);
    report.path = target.path.clone();

    let content = to_string_indented(&Value::Object(document), &target.indent)?;
    io::write_file(&path, &content, &format!("write {}", target.path))?;

    Ok(report)
}

/// Apply the bindings and version fields of `target` to an in-memory document.
pub fn patch_object(
    document: &mut Map<String, Value>,
    target: &DocumentTarget,
    profile: &BrandProfile,
) -> DocumentPatchReport {
    let fields = profile.fields();
    let mut report = DocumentPatchReport::default();

    for binding in &target.bindings {
        let Some(slot) = document.get_mut(&binding.key) else {
            report.absent_keys.push(binding.key.clone());
            continue;
        };

        match fields.get(&binding.field) {
            Some(value) => {
                *slot = value.clone();
                report.updated_keys.push(binding.key.clone());
            }
            None => report.warnings.push(format!(
                "Binding '{}' refers to unknown profile field '{}'",
                binding.key, binding.field
            )),
        }
    }

    if let Some(version_fields) = &target.version_fields {
        document.insert(
            version_fields.version_key.clone(),
            Value::String(profile.version.clone()),
        );
        document.insert(
            version_fields.release_key.clone(),
            Value::String(profile.build_number.clone()),
        );
        report.version_keys.push(version_fields.version_key.clone());
        report.version_keys.push(version_fields.release_key.clone());
    }

    report
}

/// Pretty-print `value` with a custom indent and no trailing newline.
pub fn to_string_indented(value: &Value, indent: &str) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| Error::internal_json(e.to_string(), Some("serialize document".to_string())))?;

    String::from_utf8(buf).map_err(|e| Error::internal_unexpected(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::derive;
    use crate::layout::{FieldBinding, TargetLayout, VersionFields};
    use tempfile::tempdir;

    fn acme() -> BrandProfile {
        derive("Acme").unwrap()
    }

    fn product_target() -> DocumentTarget {
        TargetLayout::default().product_manifest
    }

    fn package_target() -> DocumentTarget {
        TargetLayout::default().package_manifest
    }

    #[test]
    fn product_manifest_scenario() {
        let mut doc: Map<String, Value> =
            serde_json::from_str(r#"{"nameShort":"X","voidVersion":"","voidRelease":""}"#).unwrap();

        let report = patch_object(&mut doc, &product_target(), &acme());

        assert_eq!(doc["nameShort"], "Acme");
        assert_eq!(doc["voidVersion"], "1.0.0");
        assert_eq!(doc["voidRelease"], "0001");
        assert_eq!(doc.len(), 3);
        assert_eq!(report.updated_keys, vec!["nameShort".to_string()]);
    }

    #[test]
    fn patch_never_adds_bound_keys() {
        let mut doc: Map<String, Value> =
            serde_json::from_str(r#"{"name":"void","version":"1.99.0","private":true}"#).unwrap();
        let before: Vec<String> = doc.keys().cloned().collect();

        patch_object(&mut doc, &package_target(), &acme());

        let after: Vec<String> = doc.keys().cloned().collect();
        assert_eq!(before, after);
        assert_eq!(doc["name"], "acme");
        assert_eq!(doc["version"], "1.99.0");
        assert_eq!(doc["private"], true);
    }

    #[test]
    fn non_additive_for_many_documents() {
        let profile = derive("Zenith Works").unwrap();
        let docs = [
            r#"{}"#,
            r#"{"applicationName":"void"}"#,
            r#"{"unrelated":1,"win32MutexName":"voideditor","nested":{"brandName":"x"}}"#,
            r#"{"linkProtectionTrustedDomains":[],"extensionsGallery":{}}"#,
        ];

        for raw in docs {
            let mut doc: Map<String, Value> = serde_json::from_str(raw).unwrap();
            let before: Vec<String> = doc.keys().cloned().collect();
            patch_object(&mut doc, &package_target(), &profile);
            let after: Vec<String> = doc.keys().cloned().collect();
            assert_eq!(before, after, "package patch added keys to {}", raw);

            // Product target only ever adds its two version keys.
            let mut doc: Map<String, Value> = serde_json::from_str(raw).unwrap();
            patch_object(&mut doc, &product_target(), &profile);
            let mut expected = before.clone();
            for key in ["voidVersion", "voidRelease"] {
                if !expected.iter().any(|k| k == key) {
                    expected.push(key.to_string());
                }
            }
            let after: Vec<String> = doc.keys().cloned().collect();
            assert_eq!(expected, after);
        }
    }

    #[test]
    fn nested_keys_are_not_touched() {
        let mut doc: Map<String, Value> =
            serde_json::from_str(r#"{"nested":{"brandName":"Void"}}"#).unwrap();
        patch_object(&mut doc, &product_target(), &acme());
        assert_eq!(doc["nested"]["brandName"], "Void");
    }

    #[test]
    fn structured_fields_are_copied_whole() {
        let mut doc: Map<String, Value> =
            serde_json::from_str(r#"{"linkProtectionTrustedDomains":["https://voideditor.com"]}"#)
                .unwrap();
        patch_object(&mut doc, &product_target(), &acme());
        assert_eq!(
            doc["linkProtectionTrustedDomains"],
            serde_json::json!([
                "https://acme.dev",
                "https://acme.com",
                "https://github.com/acme/acme",
                "https://ollama.com"
            ])
        );
    }

    #[test]
    fn unknown_binding_field_warns() {
        let target = DocumentTarget {
            path: "x.json".to_string(),
            indent: "  ".to_string(),
            bindings: vec![FieldBinding::new("mascot", "mascotName")],
            version_fields: None,
        };
        let mut doc: Map<String, Value> = serde_json::from_str(r#"{"mascot":"owl"}"#).unwrap();
        let report = patch_object(&mut doc, &target, &acme());
        assert_eq!(doc["mascot"], "owl");
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn version_fields_overwrite_in_place() {
        let target = DocumentTarget {
            path: "x.json".to_string(),
            indent: "\t".to_string(),
            bindings: Vec::new(),
            version_fields: Some(VersionFields {
                version_key: "v".to_string(),
                release_key: "r".to_string(),
            }),
        };
        let mut doc: Map<String, Value> = serde_json::from_str(r#"{"r":"old","a":1}"#).unwrap();
        patch_object(&mut doc, &target, &acme());
        let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["r", "a", "v"]);
    }

    #[test]
    fn product_written_with_tabs_package_with_two_spaces() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("product.json"),
            "{\n  \"nameShort\": \"Void\",\n  \"list\": [1, 2]\n}\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            "{\"name\": \"void\", \"description\": \"old\"}",
        )
        .unwrap();

        patch_document(dir.path(), &product_target(), &acme()).unwrap();
        patch_document(dir.path(), &package_target(), &acme()).unwrap();

        let product = std::fs::read_to_string(dir.path().join("product.json")).unwrap();
        assert_eq!(
            product,
            "{\n\t\"nameShort\": \"Acme\",\n\t\"list\": [\n\t\t1,\n\t\t2\n\t],\n\t\"voidVersion\": \"1.0.0\",\n\t\"voidRelease\": \"0001\"\n}"
        );

        let package = std::fs::read_to_string(dir.path().join("package.json")).unwrap();
        assert_eq!(
            package,
            format!(
                "{{\n  \"name\": \"acme\",\n  \"description\": \"{}\"\n}}",
                acme().description
            )
        );
    }

    #[test]
    fn invalid_json_is_fatal() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("product.json"), "{ \"nameShort\": ").unwrap();
        let err = patch_document(dir.path(), &product_target(), &acme()).unwrap_err();
        assert_eq!(err.code.as_str(), "document.invalid_json");
    }

    #[test]
    fn non_object_document_is_fatal() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("product.json"), "[1, 2, 3]").unwrap();
        let err = patch_document(dir.path(), &product_target(), &acme()).unwrap_err();
        assert_eq!(err.code.as_str(), "document.invalid_shape");
        // Document left untouched.
        let content = std::fs::read_to_string(dir.path().join("product.json")).unwrap();
        assert_eq!(content, "[1, 2, 3]");
    }

    #[test]
    fn missing_document_is_fatal() {
        let dir = tempdir().unwrap();
        let err = patch_document(dir.path(), &package_target(), &acme()).unwrap_err();
        assert_eq!(err.code.as_str(), "document.not_found");
    }
}
