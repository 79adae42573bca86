use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use whitelabel::log_status;
use whitelabel::brand::{self, BrandProfile, ProfileFormat};
use whitelabel::{io, Error};

use super::CmdResult;

#[derive(Args)]
pub struct CreateArgs {
    /// Human-readable brand name, e.g. "Acme Studio"
    pub brand_name: Option<String>,

    /// Where to write the profile (default: <assets-dir>/<slug>-brand.json)
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Directory for the default output path
    #[arg(long, default_value = "branding")]
    pub assets_dir: PathBuf,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOutput {
    pub command: &'static str,
    pub path: String,
    pub format: &'static str,
    pub profile: BrandProfile,
    pub next_steps: Vec<String>,
}

pub fn run(args: CreateArgs) -> CmdResult<CreateOutput> {
    let brand_name = args
        .brand_name
        .ok_or_else(|| Error::validation_missing_argument(vec!["brand_name".to_string()]))?;

    let profile = brand::derive(&brand_name)?;

    let output = args.output.unwrap_or_else(|| {
        args.assets_dir
            .join(format!("{}-brand.json", profile.application_name))
    });
    let format = ProfileFormat::from_path(&output);

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        io::ensure_dir(parent)?;
    }

    let content = profile.to_document(format)?;
    io::write_file(&output, &content, &format!("write profile {}", output.display()))?;
    log_status!("create", "Created brand profile: {}", output.display());

    let next_steps = vec![
        format!(
            "Add brand assets under {} (e.g. {})",
            brand::ASSETS_DIR,
            profile.logo_path
        ),
        format!("Review {} and adjust colors, URLs and text", output.display()),
        format!("Run: whitelabel apply {}", output.display()),
    ];

    Ok((
        CreateOutput {
            command: "create",
            path: output.display().to_string(),
            format: format.extension(),
            profile,
            next_steps,
        },
        0,
    ))
}
