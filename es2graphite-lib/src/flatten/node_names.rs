use crate::Result;
use ohno::app_err;
use serde_json::Value;
use std::collections::HashMap;

/// Table from cluster-internal node identifiers to human-readable node names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeNames {
    names: HashMap<String, String>,
}

impl NodeNames {
    #[must_use]
    pub const fn new(names: HashMap<String, String>) -> Self {
        Self { names }
    }

    /// Build the table from a `/_nodes` response (`nodes.<id>.name`).
    ///
    /// Nodes without a string `name` are left out and resolve to their raw id.
    pub fn from_document(doc: &Value) -> Result<Self> {
        let nodes = doc
            .get("nodes")
            .and_then(Value::as_object)
            .ok_or_else(|| app_err!("nodes document has no 'nodes' object"))?;

        let names = nodes
            .iter()
            .filter_map(|(id, node)| node.get("name").and_then(Value::as_str).map(|name| (id.clone(), name.to_string())))
            .collect();

        Ok(Self { names })
    }

    /// Resolve a node id, falling back to the id itself when it is unknown.
    #[must_use]
    pub fn resolve<'a>(&'a self, id: &'a str) -> &'a str {
        self.names.get(id).map_or(id, String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
