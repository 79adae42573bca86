//! Brand profiles: derivation from a name, and loading from a document.

mod derive;
mod profile;

pub use derive::{asset_path, derive, ASSETS_DIR};
pub use profile::{
    from_document, load, BrandProfile, ExtensionsGallery, LoadedProfile, ProfileFormat,
    REQUIRED_FIELDS,
};
pub(crate) use profile::json_type;
