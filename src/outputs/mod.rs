//! Output generation for the two site artifacts.
//!
//! # Submodules
//!
//! - [`changelog`]: renders releases to the changelog markdown page
//! - [`search_index`]: writes normalized entries as the search-index dataset
//!
//! # Output Structure
//!
//! ```text
//! docs/resources/changelog.md   # rewritten on every changelog run
//! convertedData.json            # rewritten on every search-index run
//! ```
//!
//! Both artifacts are replaced atomically; a failed run leaves the previous
//! file in place.

pub mod changelog;
pub mod search_index;
