//! Errors returned by the fallible entry points of the crate.
//!
//! Layout itself never fails: degenerate input falls back to a default and
//! is reported through [`quokka_common::warning::warn_once`]. Only tree
//! construction, configuration loading, style assignment and id lookups
//! return a [`LayoutError`].

use quokka_dom::NodeId;
use thiserror::Error;

use crate::layout::BoxId;

/// Errors from tree construction, configuration and arena lookups.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The document has no element child, so there is no root box.
    #[error("document has no document element")]
    MissingDocumentElement,

    /// A node id does not exist in the DOM tree.
    #[error("unknown DOM node {0:?}")]
    UnknownNode(NodeId),

    /// A box id does not exist in the box tree.
    #[error("unknown box {0:?}")]
    UnknownBox(BoxId),

    /// A declaration was rejected by [`crate::style::StyleMap::set_property`].
    #[error("invalid value '{value}' for property '{name}'")]
    InvalidProperty {
        /// Property name as given.
        name: String,
        /// Rejected value.
        value: String,
    },

    /// The layout configuration could not be deserialized.
    #[error("invalid layout configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LayoutError>;
