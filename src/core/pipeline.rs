//! Rebranding pipeline: runs every stage once, in a fixed order.
//!
//! Stages run strictly one after another against the same read-only profile.
//! Missing files and assets are recorded in the stage report and the run
//! continues; a fatal error from any stage stops the run immediately and
//! leaves completed stages in place.

use serde::Serialize;
use std::path::PathBuf;

use crate::assets;
use crate::brand::BrandProfile;
use crate::document;
use crate::error::Result;
use crate::layout::TargetLayout;
use crate::rewrite::{self, RuleWarning};
use crate::template;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    ProductManifest,
    PackageManifest,
    Assets,
    TextReferences,
    BuildConfig,
}

impl Stage {
    /// Execution order.
    pub const ALL: [Stage; 5] = [
        Stage::ProductManifest,
        Stage::PackageManifest,
        Stage::Assets,
        Stage::TextReferences,
        Stage::BuildConfig,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Success,
    PartialSuccess,
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageReport {
    pub stage: Stage,
    pub status: StageStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebrandSummary {
    pub total_stages: usize,
    pub succeeded: usize,
    pub partial: usize,
    pub skipped: usize,
    pub warnings: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next_actions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebrandReport {
    pub brand_name: String,
    pub root: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    pub status: StageStatus,
    pub stages: Vec<StageReport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub summary: RebrandSummary,
}

pub struct RebrandPipeline {
    root: PathBuf,
    layout: TargetLayout,
    layout_source: Option<PathBuf>,
}

impl RebrandPipeline {
    pub fn new(root: impl Into<PathBuf>, layout: TargetLayout) -> Self {
        Self {
            root: root.into(),
            layout,
            layout_source: None,
        }
    }

    /// Record where the layout came from, for the report.
    pub fn with_layout_source(mut self, source: Option<PathBuf>) -> Self {
        self.layout_source = source;
        self
    }

    /// Apply `profile` to the tree. Writes are immediate.
    pub fn run(&self, profile: &BrandProfile) -> Result<RebrandReport> {
        log_status!("whitelabel", "Applying white-labeling for {}...", profile.brand_name);

        // Rules are rendered before anything is written so a bad layout
        // cannot leave the tree half-patched.
        let vars = profile.string_fields();
        let (rules, mut rule_warnings) = rewrite::render_rules(&self.layout.text_files.rules, &vars)?;
        rule_warnings.extend(rewrite::validate_rules(&rules));
        for warning in &rule_warnings {
            log_status!("text", "{}", warning.message);
        }
        let build_replacement = template::render_map(&self.layout.build_config.replacement, &vars);

        let mut stages = Vec::with_capacity(Stage::ALL.len());

        for stage in Stage::ALL {
            let report = match stage {
                Stage::ProductManifest => {
                    log_status!("document", "Updating {}...", self.layout.product_manifest.path);
                    let patch = document::patch_document(&self.root, &self.layout.product_manifest, profile)?;
                    document_stage(stage, patch)
                }
                Stage::PackageManifest => {
                    log_status!("document", "Updating {}...", self.layout.package_manifest.path);
                    let patch = document::patch_document(&self.root, &self.layout.package_manifest, profile)?;
                    document_stage(stage, patch)
                }
                Stage::Assets => {
                    log_status!("assets", "Replacing branding assets...");
                    let replaced = assets::replace_assets(&self.root, &self.layout.assets, profile);
                    asset_stage(replaced)
                }
                Stage::TextReferences => {
                    log_status!("text", "Updating text references...");
                    let mut text = rewrite::rewrite_files(&self.root, &self.layout.text_files.files, &rules)?;
                    text.rule_warnings = rule_warnings.clone();
                    text_stage(text)
                }
                Stage::BuildConfig => {
                    log_status!("build", "Updating build configuration...");
                    let build = rewrite::patch_build_config(
                        &self.root,
                        &self.layout.build_config,
                        &build_replacement,
                    )?;
                    let status = if build.present {
                        StageStatus::Success
                    } else {
                        StageStatus::Skipped
                    };
                    stage_report(stage, status, Vec::new(), &build)
                }
            };
            stages.push(report);
        }

        let summary = build_summary(&stages);
        let status = if summary.partial > 0 {
            StageStatus::PartialSuccess
        } else if summary.succeeded == 0 {
            StageStatus::Skipped
        } else {
            StageStatus::Success
        };

        log_status!("whitelabel", "{} is ready to build.", profile.brand_name);

        Ok(RebrandReport {
            brand_name: profile.brand_name.clone(),
            root: self.root.display().to_string(),
            layout: self.layout_source.as_ref().map(|p| p.display().to_string()),
            status,
            stages,
            warnings: Vec::new(),
            summary,
        })
    }
}

fn stage_report<T: Serialize>(
    stage: Stage,
    status: StageStatus,
    warnings: Vec<String>,
    data: &T,
) -> StageReport {
    StageReport {
        stage,
        status,
        warnings,
        data: serde_json::to_value(data).unwrap_or(serde_json::Value::Null),
    }
}

fn document_stage(stage: Stage, patch: document::DocumentPatchReport) -> StageReport {
    let status = if !patch.warnings.is_empty() {
        StageStatus::PartialSuccess
    } else if patch.updated_keys.is_empty() && patch.version_keys.is_empty() {
        StageStatus::Skipped
    } else {
        StageStatus::Success
    };
    stage_report(stage, status, patch.warnings.clone(), &patch)
}

fn asset_stage(report: assets::AssetReport) -> StageReport {
    let mut warnings = report.warnings.clone();
    for slot in &report.slots {
        warnings.extend(slot.errors.iter().cloned());
    }

    let status = if !warnings.is_empty() {
        StageStatus::PartialSuccess
    } else if report.replaced_count() == 0 {
        StageStatus::Skipped
    } else {
        StageStatus::Success
    };
    stage_report(Stage::Assets, status, warnings, &report)
}

fn text_stage(report: rewrite::TextReport) -> StageReport {
    let mut warnings = report.warnings.clone();
    warnings.extend(report.rule_warnings.iter().map(|w: &RuleWarning| w.message.clone()));

    let status = if !warnings.is_empty() {
        StageStatus::PartialSuccess
    } else if report.files.is_empty() {
        StageStatus::Skipped
    } else {
        StageStatus::Success
    };
    stage_report(Stage::TextReferences, status, warnings, &report)
}

fn build_summary(stages: &[StageReport]) -> RebrandSummary {
    let count = |status: StageStatus| stages.iter().filter(|s| s.status == status).count();
    let partial = count(StageStatus::PartialSuccess);

    let next_actions = if partial > 0 {
        vec![
            "Review stage warnings: add missing files or assets, or adjust the layout, then re-run"
                .to_string(),
        ]
    } else {
        Vec::new()
    };

    RebrandSummary {
        total_stages: stages.len(),
        succeeded: count(StageStatus::Success),
        partial,
        skipped: count(StageStatus::Skipped),
        warnings: stages.iter().map(|s| s.warnings.len()).sum(),
        next_actions,
    }
}
