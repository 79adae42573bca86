// Public modules
pub mod assets;
pub mod brand;
pub mod document;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod rewrite;

// Re-export common types for convenience
pub use brand::{BrandProfile, LoadedProfile, ProfileFormat};
pub use error::{Error, ErrorCode, Result};
pub use layout::TargetLayout;
pub use pipeline::{RebrandPipeline, RebrandReport};
