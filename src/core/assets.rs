//! Asset replacement: copy brand images over well-known files in the tree.
//!
//! A slot whose source is missing is skipped whole, so no target is ever left
//! half-updated from a different source. Targets that do not exist are
//! skipped silently; this stage never creates new paths.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::Path;

use crate::brand::BrandProfile;
use crate::io;
use crate::layout::AssetSlot;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetReport {
    pub slots: Vec<AssetSlotReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl AssetReport {
    pub fn replaced_count(&self) -> usize {
        self.slots.iter().map(|s| s.replaced.len()).sum()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSlotReport {
    pub source_field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// SHA-256 of the copied source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    pub replaced: Vec<String>,
    pub missing_targets: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    pub skipped: bool,
}

pub fn replace_assets(root: &Path, slots: &[AssetSlot], profile: &BrandProfile) -> AssetReport {
    let mut report = AssetReport::default();

    for slot in slots {
        let slot_report = replace_slot(root, slot, profile, &mut report.warnings);
        report.slots.push(slot_report);
    }

    report
}

fn replace_slot(
    root: &Path,
    slot: &AssetSlot,
    profile: &BrandProfile,
    warnings: &mut Vec<String>,
) -> AssetSlotReport {
    let mut out = AssetSlotReport {
        source_field: slot.source_field.clone(),
        ..Default::default()
    };

    let source_raw = match profile.field(&slot.source_field) {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s,
        _ => {
            let message = format!(
                "Profile field '{}' does not name an asset source",
                slot.source_field
            );
            log_status!("assets", "{}", message);
            warnings.push(message);
            out.skipped = true;
            return out;
        }
    };

    out.source = Some(source_raw.clone());
    let source = io::resolve_path(root, &source_raw);

    let bytes = match std::fs::read(&source) {
        Ok(bytes) if source.is_file() => bytes,
        _ => {
            let message = format!("Source asset not found: {}", source_raw);
            log_status!("assets", "{}", message);
            warnings.push(message);
            out.skipped = true;
            return out;
        }
    };

    out.sha256 = Some(format!("{:x}", Sha256::digest(&bytes)));

    for target in &slot.targets {
        let target_path = root.join(target);
        if !target_path.is_file() {
            out.missing_targets.push(target.clone());
            continue;
        }

        match io::copy_file(&source, &target_path, &format!("copy {} -> {}", source_raw, target)) {
            Ok(_) => {
                log_status!("assets", "Replaced {}", target);
                out.replaced.push(target.clone());
            }
            Err(err) => {
                let cause = err.details["error"].as_str().unwrap_or(&err.message).to_string();
                let message = format!("Failed to replace {}: {}", target, cause);
                log_status!("assets", "{}", message);
                out.errors.push(message);
            }
        }
    }

    out
}
