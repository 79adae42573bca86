//! Identifier derivation: one brand name in, a complete profile out.
//!
//! Every derived field is a pure function of the brand name. URL-shaped
//! fields always carry the slug, never the raw name.

use super::profile::{BrandProfile, ExtensionsGallery};
use crate::error::Result;
use crate::slugify::application_slug;

/// Conventional root for brand assets referenced by generated profiles.
pub const ASSETS_DIR: &str = "./branding/assets";

pub const DEFAULT_LICENSE_NAME: &str = "MIT";
pub const DEFAULT_PRIMARY_COLOR: &str = "#3B82F6";
pub const DEFAULT_SECONDARY_COLOR: &str = "#1E40AF";
pub const DEFAULT_ACCENT_COLOR: &str = "#60A5FA";
pub const DEFAULT_TAGLINE: &str = "Code with AI, Flow with Confidence";
pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_BUILD_NUMBER: &str = "0001";
pub const GALLERY_SERVICE_URL: &str = "https://marketplace.visualstudio.com/_apis/public/gallery";
pub const GALLERY_ITEM_URL: &str = "https://marketplace.visualstudio.com/items";
pub const EXTRA_TRUSTED_DOMAIN: &str = "https://ollama.com";

/// Derive every dependent identifier from `brand_name`.
///
/// Fails only when the name is empty or whitespace.
pub fn derive(brand_name: &str) -> Result<BrandProfile> {
    let slug = application_slug(brand_name, "brandName")?;
    let name = brand_name.to_string();

    Ok(BrandProfile {
        brand_name: name.clone(),
        brand_name_short: name.clone(),
        brand_name_long: format!("{} - AI-Powered Code Editor", name),
        application_name: slug.clone(),
        data_folder_name: format!(".{}-editor", slug),
        win32_mutex_name: format!("{}editor", slug),
        win32_dir_name: name.clone(),
        win32_name_version: name.clone(),
        win32_reg_value_name: format!("{}Editor", name),
        win32_app_user_model_id: format!("{}.Editor", name),
        win32_shell_name_short: shell_name_short(&name),
        win32_tunnel_service_mutex: format!("{}-tunnelservice", slug),
        win32_tunnel_mutex: format!("{}-tunnel", slug),
        darwin_bundle_identifier: format!("com.{}.code", slug),
        linux_icon_name: format!("{}-editor", slug),
        url_protocol: slug.clone(),
        server_application_name: format!("{}-server", slug),
        server_data_folder_name: format!(".{}-server", slug),
        tunnel_application_name: format!("{}-tunnel", slug),
        license_name: DEFAULT_LICENSE_NAME.to_string(),
        license_url: format!("https://github.com/{0}/{0}/blob/main/LICENSE.txt", slug),
        report_issue_url: format!("https://github.com/{0}/{0}/issues/new", slug),
        website_url: format!("https://{}.dev", slug),
        discord_url: format!("https://discord.gg/{}", slug),
        primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
        secondary_color: DEFAULT_SECONDARY_COLOR.to_string(),
        accent_color: DEFAULT_ACCENT_COLOR.to_string(),
        logo_path: asset_path(&slug, "logo", "png"),
        icon_path: asset_path(&slug, "icon", "png"),
        splash_image_path: asset_path(&slug, "splash", "png"),
        about_image_path: asset_path(&slug, "about", "png"),
        favicon_path: asset_path(&slug, "favicon", "ico"),
        description: format!(
            "{} is an AI-powered code editor that brings intelligent coding assistance to your development workflow.",
            name
        ),
        tagline: DEFAULT_TAGLINE.to_string(),
        version: DEFAULT_VERSION.to_string(),
        build_number: DEFAULT_BUILD_NUMBER.to_string(),
        extensions_gallery: ExtensionsGallery {
            service_url: GALLERY_SERVICE_URL.to_string(),
            item_url: GALLERY_ITEM_URL.to_string(),
        },
        link_protection_trusted_domains: vec![
            format!("https://{}.dev", slug),
            format!("https://{}.com", slug),
            format!("https://github.com/{0}/{0}", slug),
            EXTRA_TRUSTED_DOMAIN.to_string(),
        ],
    })
}

/// `{assets}/{slug}-{purpose}.{ext}`
pub fn asset_path(slug: &str, purpose: &str, ext: &str) -> String {
    format!("{}/{}-{}.{}", ASSETS_DIR, slug, purpose, ext)
}

/// Windows shell label: first character, an `&` accelerator marker, then the rest.
fn shell_name_short(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("{}&{}", first, chars.as_str()),
        None => String::new(),
    }
}
