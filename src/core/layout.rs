//! Target layout: which artifacts in the host tree get rebranded, and how.
//!
//! The built-in default mirrors the host project's layout. A `whitelabel.json`
//! at the project root (or an explicit `--layout` file) overrides it; every
//! section falls back to its default when omitted.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::io;

/// Layout file picked up from the project root when no explicit path is given.
pub const LAYOUT_FILE_NAME: &str = "whitelabel.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetLayout {
    #[serde(default = "default_product_manifest")]
    pub product_manifest: DocumentTarget,

    #[serde(default = "default_package_manifest")]
    pub package_manifest: DocumentTarget,

    #[serde(default = "default_assets")]
    pub assets: Vec<AssetSlot>,

    #[serde(default = "default_text_files")]
    pub text_files: TextTarget,

    #[serde(default = "default_build_config")]
    pub build_config: BuildConfigTarget,
}

impl Default for TargetLayout {
    fn default() -> Self {
        Self {
            product_manifest: default_product_manifest(),
            package_manifest: default_package_manifest(),
            assets: default_assets(),
            text_files: default_text_files(),
            build_config: default_build_config(),
        }
    }
}

/// A JSON document patched key-by-key from the profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTarget {
    pub path: String,
    /// Indent used when the document is written back.
    #[serde(default = "default_indent")]
    pub indent: String,
    /// Document key ← profile field. Only keys already in the document are touched.
    #[serde(default)]
    pub bindings: Vec<FieldBinding>,
    /// Version keys written unconditionally, present or not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_fields: Option<VersionFields>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldBinding {
    pub key: String,
    pub field: String,
}

impl FieldBinding {
    pub fn new(key: &str, field: &str) -> Self {
        Self {
            key: key.to_string(),
            field: field.to_string(),
        }
    }

    /// Binding where the document key and profile field share a name.
    pub fn same(name: &str) -> Self {
        Self::new(name, name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionFields {
    pub version_key: String,
    pub release_key: String,
}

/// One brand asset copied onto one or more existing files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSlot {
    /// Profile field holding the source path.
    pub source_field: String,
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextTarget {
    pub files: Vec<String>,
    /// Applied in order; see `rewrite::apply_rules`.
    pub rules: Vec<RuleTemplate>,
}

/// A replacement rule whose `to` side is a `{{field}}` template over the profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleTemplate {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub regex: bool,
}

impl RuleTemplate {
    fn literal(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            regex: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfigTarget {
    pub path: String,
    /// Product codename, matched case-insensitively.
    pub token: String,
    pub replacement: String,
}

/// Resolve the layout for `root`: explicit file, then `whitelabel.json`, then built-in.
pub fn resolve(root: &Path, explicit: Option<&Path>) -> Result<(TargetLayout, Option<PathBuf>)> {
    if let Some(path) = explicit {
        return Ok((load(path)?, Some(path.to_path_buf())));
    }

    let discovered = root.join(LAYOUT_FILE_NAME);
    if discovered.is_file() {
        return Ok((load(&discovered)?, Some(discovered)));
    }

    Ok((TargetLayout::default(), None))
}

pub fn load(path: &Path) -> Result<TargetLayout> {
    let raw = io::read_file(path, &format!("read layout {}", path.display()))?;
    serde_json::from_str(&raw).map_err(|e| Error::layout_invalid(path.display().to_string(), e.to_string()))
}

// =============================================================================
// Default values (match the host project's layout)
// =============================================================================

/// Profile fields bound to same-named product manifest keys.
const PRODUCT_FIELDS: &[&str] = &[
    "brandName",
    "brandNameShort",
    "brandNameLong",
    "applicationName",
    "dataFolderName",
    "win32MutexName",
    "win32DirName",
    "win32NameVersion",
    "win32RegValueName",
    "win32AppUserModelId",
    "win32ShellNameShort",
    "win32TunnelServiceMutex",
    "win32TunnelMutex",
    "darwinBundleIdentifier",
    "linuxIconName",
    "urlProtocol",
    "serverApplicationName",
    "serverDataFolderName",
    "tunnelApplicationName",
    "licenseName",
    "licenseUrl",
    "reportIssueUrl",
    "websiteUrl",
    "discordUrl",
    "primaryColor",
    "secondaryColor",
    "accentColor",
    "logoPath",
    "iconPath",
    "splashImagePath",
    "aboutImagePath",
    "faviconPath",
    "description",
    "tagline",
    "version",
    "buildNumber",
    "extensionsGallery",
    "linkProtectionTrustedDomains",
];

fn default_indent() -> String {
    "  ".to_string()
}

fn default_product_manifest() -> DocumentTarget {
    let mut bindings: Vec<FieldBinding> = PRODUCT_FIELDS.iter().map(|f| FieldBinding::same(f)).collect();
    bindings.push(FieldBinding::new("nameShort", "brandNameShort"));
    bindings.push(FieldBinding::new("nameLong", "brandNameLong"));

    DocumentTarget {
        path: "product.json".to_string(),
        indent: "\t".to_string(),
        bindings,
        version_fields: Some(VersionFields {
            version_key: "voidVersion".to_string(),
            release_key: "voidRelease".to_string(),
        }),
    }
}

fn default_package_manifest() -> DocumentTarget {
    DocumentTarget {
        path: "package.json".to_string(),
        indent: default_indent(),
        bindings: vec![
            FieldBinding::new("name", "applicationName"),
            FieldBinding::same("description"),
        ],
        version_fields: None,
    }
}

fn default_assets() -> Vec<AssetSlot> {
    vec![
        AssetSlot {
            source_field: "logoPath".to_string(),
            targets: vec![
                "src/vs/workbench/browser/parts/editor/media/slice_of_void.png".to_string(),
                "void_icons/slice_of_void.png".to_string(),
            ],
        },
        AssetSlot {
            source_field: "iconPath".to_string(),
            targets: vec!["src/vs/workbench/browser/media/void-icon-sm.png".to_string()],
        },
    ]
}

fn default_text_files() -> TextTarget {
    TextTarget {
        files: vec![
            "README.md".to_string(),
            "src/vs/workbench/contrib/void/browser/void.contribution.ts".to_string(),
            "src/vs/workbench/contrib/void/common/voidService.ts".to_string(),
        ],
        rules: vec![
            RuleTemplate::literal("Void", "{{brandName}}"),
            RuleTemplate::literal("void", "{{applicationName}}"),
            RuleTemplate::literal("voideditor", "{{applicationName}}editor"),
            RuleTemplate::literal("void-editor", "{{applicationName}}-editor"),
            RuleTemplate::literal("voideditor.com", "{{websiteUrl}}"),
            RuleTemplate::literal("voideditor.dev", "{{websiteUrl}}"),
        ],
    }
}

fn default_build_config() -> BuildConfigTarget {
    BuildConfigTarget {
        path: "gulpfile.js".to_string(),
        token: "void".to_string(),
        replacement: "{{applicationName}}".to_string(),
    }
}
