//! Client side of the Podhaven CMS API.
//!
//! The CMS is a JSON-document REST API: flat resource collections
//! (`/episodes`, `/series`, ...), bracket-style page parameters, and an
//! `errors` array on failure. Everything in this module is transport
//! plumbing; the tool layer decides what to do with the documents.

pub mod aliases;
pub mod client;
pub mod error;
pub mod models;
pub mod pagination;

pub use client::{CmsClient, CmsPage};
pub use error::CmsError;
pub use pagination::list_all;
