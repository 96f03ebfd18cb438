//! Non-fatal findings collected while importing a document.

use crate::odf::dom::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A malformed or unrecognised input node that was tolerated during import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportWarning {
    pub message: Option<String>,
    pub node: Option<NodeId>,
}

impl ImportWarning {
    pub fn new(message: impl Into<String>, node: Option<NodeId>) -> Self {
        Self {
            message: Some(message.into()),
            node,
        }
    }

    /// Record a warning and forward it to the log.
    pub(crate) fn record(
        warnings: &mut Vec<ImportWarning>,
        message: impl Into<String>,
        node: Option<NodeId>,
    ) {
        let warning = Self::new(message, node);
        log::warn!("import: {warning}");
        warnings.push(warning);
    }
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.message.as_deref().unwrap_or("unspecified problem");
        match self.node {
            Some(node) => write!(f, "{message} (node {node})"),
            None => f.write_str(message),
        }
    }
}
