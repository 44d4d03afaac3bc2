//! Markup extraction for catalog and course pages
//!
//! Everything here is pure and synchronous: it takes already-fetched HTML
//! and returns plain data. Network access lives in [`crate::crawler`].

mod detail;
mod listing;
mod normalize;

pub use detail::extract_course;
pub use listing::course_links;
pub use normalize::normalize;
