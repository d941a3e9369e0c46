//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] — the selectable inference models and their catalog

pub mod model;
