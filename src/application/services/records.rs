//! Record tree service
//!
//! Loads flat JSON record sets, nests them with the configured
//! [`TreeBuilder`] and renders the result.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Record, Records, TreeBuilder};
use crate::infrastructure::traits::FileSystem;

/// Service for turning flat record sets into trees.
pub struct RecordService {
    fs: Arc<dyn FileSystem>,
    builder: TreeBuilder,
    label_field: String,
}

impl RecordService {
    /// Create a new record service.
    pub fn new(fs: Arc<dyn FileSystem>, builder: TreeBuilder, label_field: impl Into<String>) -> Self {
        Self {
            fs,
            builder,
            label_field: label_field.into(),
        }
    }

    /// Read a JSON object of records from `path`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Records> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read records", path)?;
        self.parse(&content, &path.display().to_string())
    }

    /// Parse a JSON object whose values are the records.
    pub fn parse(&self, json: &str, origin: &str) -> ApplicationResult<Records> {
        let records: Records = serde_json::from_str(json).map_err(|e| ApplicationError::Json {
            context: origin.to_string(),
            source: e,
        })?;
        debug!("parse: {} records from {}", records.len(), origin);
        Ok(records)
    }

    /// Nest records under their parents.
    pub fn build(&self, records: Records) -> Records {
        self.builder.build(records)
    }

    /// Nest, then flatten into pre-order with levels stamped.
    pub fn leveled(&self, records: Records) -> Records {
        self.builder.flatten(self.builder.build(records))
    }

    /// One line per record, indented two spaces per level.
    ///
    /// Expects the output of [`RecordService::leveled`].
    pub fn render_listing(&self, leveled: &Records) -> String {
        let level_field = self.builder.level_field_name();
        let mut out = String::new();
        for (key, record) in leveled {
            let level = record
                .get(level_field)
                .and_then(Value::as_u64)
                .unwrap_or(0) as usize;
            out.push_str(&"  ".repeat(level));
            out.push_str(&self.label(key, record));
            out.push('\n');
        }
        out
    }

    /// Box-drawing diagram of a built (nested) tree, one diagram per root.
    pub fn render_diagram(&self, tree: &Records) -> String {
        tree.iter()
            .map(|(key, record)| self.diagram_node(key, record).to_string())
            .collect()
    }

    fn diagram_node(&self, key: &str, record: &Record) -> Tree<String> {
        let mut node = Tree::new(self.label(key, record));
        if let Some(Value::Object(kids)) = record.get(self.builder.children_field_name()) {
            for (kid, value) in kids {
                if let Value::Object(child) = value {
                    node.push(self.diagram_node(kid, child));
                }
            }
        }
        node
    }

    fn label(&self, key: &str, record: &Record) -> String {
        match record.get(&self.label_field) {
            Some(Value::String(s)) => format!("{} {}", key, s),
            Some(Value::Null) | None => key.to_string(),
            Some(other) => format!("{} {}", key, other),
        }
    }

    /// Pretty JSON rendering.
    pub fn to_json(&self, records: &Records) -> ApplicationResult<String> {
        serde_json::to_string_pretty(records).map_err(|e| ApplicationError::Json {
            context: "records output".to_string(),
            source: e,
        })
    }
}
