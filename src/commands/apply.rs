use clap::Args;
use std::path::PathBuf;

use whitelabel::log_status;
use whitelabel::brand;
use whitelabel::layout;
use whitelabel::pipeline::{RebrandPipeline, RebrandReport};
use whitelabel::Error;

use super::CmdResult;

#[derive(Args)]
pub struct ApplyArgs {
    /// Brand profile document (.json or .toml)
    pub profile: Option<String>,

    /// Root of the product tree to rebrand
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Target layout file (default: <root>/whitelabel.json, then built-in)
    #[arg(long, value_name = "FILE")]
    pub layout: Option<PathBuf>,
}

pub fn run(args: ApplyArgs) -> CmdResult<RebrandReport> {
    let profile_arg = args
        .profile
        .ok_or_else(|| Error::validation_missing_argument(vec!["profile".to_string()]))?;
    let profile_path = PathBuf::from(shellexpand::tilde(&profile_arg).to_string());

    log_status!("profile", "Loading {}", profile_path.display());
    let loaded = brand::load(&profile_path)?;
    for warning in &loaded.warnings {
        log_status!("profile", "{}", warning);
    }

    let (target_layout, source) = layout::resolve(&args.root, args.layout.as_deref())?;
    if let Some(path) = &source {
        log_status!("layout", "Using {}", path.display());
    }

    let pipeline = RebrandPipeline::new(&args.root, target_layout).with_layout_source(source);
    let mut report = pipeline.run(&loaded.profile)?;
    report.warnings = loaded.warnings;

    Ok((report, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use whitelabel::brand::ProfileFormat;

    #[test]
    fn seeded_tree_applies_with_exit_zero() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("product.json"), r#"{"nameShort":"Void"}"#).unwrap();
        fs::write(root.join("package.json"), r#"{"name":"void"}"#).unwrap();
        let profile_path = root.join("acme-brand.json");
        let profile = brand::derive("Acme").unwrap();
        fs::write(&profile_path, profile.to_document(ProfileFormat::Json).unwrap()).unwrap();

        let (report, exit_code) = run(ApplyArgs {
            profile: Some(profile_path.display().to_string()),
            root: root.to_path_buf(),
            layout: None,
        })
        .unwrap();

        assert_eq!(exit_code, 0);
        assert_eq!(report.brand_name, "Acme");
        assert!(fs::read_to_string(root.join("package.json"))
            .unwrap()
            .contains("\"name\": \"acme\""));
    }

    #[test]
    fn missing_profile_is_missing_argument() {
        let dir = tempdir().unwrap();
        let err = run(ApplyArgs {
            profile: None,
            root: dir.path().to_path_buf(),
            layout: None,
        })
        .unwrap_err();
        assert_eq!(err.code.as_str(), "validation.missing_argument");
    }

    #[test]
    fn profile_warnings_reach_the_report() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("product.json"), "{}").unwrap();
        fs::write(root.join("package.json"), "{}").unwrap();
        let profile_path = root.join("brand.json");
        fs::write(
            &profile_path,
            r#"{"brandName":"Acme","version":"1.0.0","buildNumber":"0001","mascot":"owl"}"#,
        )
        .unwrap();

        let (report, _) = run(ApplyArgs {
            profile: Some(profile_path.display().to_string()),
            root: root.to_path_buf(),
            layout: None,
        })
        .unwrap();

        assert!(report.warnings.iter().any(|w| w.contains("mascot")));
    }
}
