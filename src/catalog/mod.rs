//! Candidate tile catalog, nearest-color matching, and candidate selection

/// Directory scanning and the color-keyed tile catalog
pub mod builder;
/// Nearest catalog color lookup
pub mod matcher;
/// Seeded choice among equal-color candidates
pub mod selection;

pub use builder::{CatalogBuilder, CollisionPolicy, TileCatalog};
pub use matcher::NearestColorMatcher;
pub use selection::CandidateSelector;
