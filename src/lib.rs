mod boxfile;
pub use boxfile::*;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod geometry;
pub use geometry::*;

/// The pagination core: fit predicates, layout state, and the [Paginator]
pub mod layout;
pub use layout::*;

mod merge;
pub use merge::*;

mod page;
pub use page::*;

/// Re-export [image] functionality, mostly for working with [PageSurface]s directly
pub use image;
