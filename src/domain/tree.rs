//! Tree materialization from flat parent-pointer records.
//!
//! Input is an ordered map `id -> record` where each record names its parent
//! by id. [`TreeBuilder::build`] nests every resolvable record under its
//! parent, and [`TreeBuilder::flatten_leveled`] walks the result back into a
//! flat pre-order map annotated with depth.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, instrument, trace};

/// A single record: an ordered JSON object.
pub type Record = Map<String, Value>;

/// Ordered records keyed by identity.
pub type Records = IndexMap<String, Record>;

pub const DEFAULT_PARENT_FIELD: &str = "parent_id";
pub const DEFAULT_CHILDREN_FIELD: &str = "_children";
pub const DEFAULT_LEVEL_FIELD: &str = "_level";

/// Builds and flattens record trees.
///
/// Field names are configurable; [`TreeBuilder::new`] uses `parent_id`,
/// `_children` and `_level`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeBuilder {
    parent_field: String,
    children_field: String,
    level_field: String,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            parent_field: DEFAULT_PARENT_FIELD.to_string(),
            children_field: DEFAULT_CHILDREN_FIELD.to_string(),
            level_field: DEFAULT_LEVEL_FIELD.to_string(),
        }
    }

    pub fn parent_field(mut self, name: impl Into<String>) -> Self {
        self.parent_field = name.into();
        self
    }

    pub fn children_field(mut self, name: impl Into<String>) -> Self {
        self.children_field = name.into();
        self
    }

    pub fn level_field(mut self, name: impl Into<String>) -> Self {
        self.level_field = name.into();
        self
    }

    pub fn children_field_name(&self) -> &str {
        &self.children_field
    }

    pub fn level_field_name(&self) -> &str {
        &self.level_field
    }

    /// Nest records under their parents, returning only the roots.
    ///
    /// Takes ownership of `records`; the returned map holds the roots in
    /// original order, each carrying its descendants in the children field.
    ///
    /// Records whose parent id is set but unknown are dropped together with
    /// anything nested under them. Removal of an orphan is immediate, so a
    /// later record pointing at it is an orphan as well. Records that cannot
    /// be reached from a root (self-parented, parent cycles) vanish too.
    /// This is lossy on purpose and never fails.
    #[instrument(level = "debug", skip_all, fields(records = records.len()))]
    pub fn build(&self, records: Records) -> Records {
        let mut roots: Vec<String> = Vec::new();
        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        let mut orphans: HashSet<String> = HashSet::new();

        for (key, record) in &records {
            match parent_key(record.get(&self.parent_field)) {
                ParentRef::Root => roots.push(key.clone()),
                ParentRef::Key(parent)
                    if records.contains_key(&parent) && !orphans.contains(&parent) =>
                {
                    trace!("build: {} -> parent {}", key, parent);
                    children.entry(parent).or_default().push(key.clone());
                }
                unresolved => {
                    debug!("build: dropping orphan {} ({:?})", key, unresolved);
                    orphans.insert(key.clone());
                }
            }
        }

        let mut pool = records;
        let mut tree = Records::with_capacity(roots.len());
        for key in roots {
            if let Some(record) = self.assemble(&key, &mut pool, &mut children) {
                tree.insert(key, record);
            }
        }
        debug!("build: {} roots, {} records unplaced", tree.len(), pool.len());
        tree
    }

    fn assemble(
        &self,
        key: &str,
        pool: &mut Records,
        children: &mut HashMap<String, Vec<String>>,
    ) -> Option<Record> {
        let mut record = pool.shift_remove(key)?;
        if let Some(kids) = children.remove(key) {
            let mut nested = match record.remove(&self.children_field) {
                Some(Value::Object(existing)) => existing,
                _ => Map::new(),
            };
            for kid in kids {
                if let Some(child) = self.assemble(&kid, pool, children) {
                    nested.insert(kid, Value::Object(child));
                }
            }
            record.insert(self.children_field.clone(), Value::Object(nested));
        }
        Some(record)
    }

    /// Flatten a built tree into pre-order, calling `decorate` on every node.
    ///
    /// The children field is detached before `decorate` sees a record. When
    /// `decorate` returns `false` the node itself is left out, but its
    /// descendants are still emitted (one level deeper) where the node would
    /// have been.
    pub fn flatten_leveled<F>(&self, tree: Records, mut decorate: F) -> Records
    where
        F: FnMut(&mut Record, usize) -> bool,
    {
        let mut out = Records::with_capacity(tree.len());
        self.flatten_into(tree, &mut decorate, 0, &mut out);
        out
    }

    /// Flatten with the default decorator: stamp the level field with depth.
    pub fn flatten(&self, tree: Records) -> Records {
        let field = self.level_field.clone();
        self.flatten_leveled(tree, |record, level| {
            record.insert(field.clone(), Value::from(level));
            true
        })
    }

    fn flatten_into<F>(&self, tree: Records, decorate: &mut F, level: usize, out: &mut Records)
    where
        F: FnMut(&mut Record, usize) -> bool,
    {
        for (key, mut record) in tree {
            let kids = record.remove(&self.children_field);
            if decorate(&mut record, level) {
                out.entry(key).or_insert(record);
            } else {
                trace!("flatten: decorator skipped {}", key);
            }
            if let Some(Value::Object(kids)) = kids {
                self.flatten_into(into_records(kids), decorate, level + 1, out);
            }
        }
    }
}

/// Keep only the object-valued entries of a JSON map.
pub fn into_records(map: Map<String, Value>) -> Records {
    map.into_iter()
        .filter_map(|(k, v)| match v {
            Value::Object(record) => Some((k, record)),
            _ => None,
        })
        .collect()
}

/// Outcome of reading a record's parent-id field.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParentRef {
    Root,
    Key(String),
    /// Set, but not something that can name a record.
    Invalid,
}

fn parent_key(value: Option<&Value>) -> ParentRef {
    let Some(value) = value else {
        return ParentRef::Root;
    };
    match value {
        Value::Null | Value::Bool(false) => ParentRef::Root,
        Value::Bool(true) => ParentRef::Key("1".to_string()),
        Value::Number(n) if n.as_f64() == Some(0.0) => ParentRef::Root,
        Value::Number(n) => ParentRef::Key(n.to_string()),
        Value::String(s) if s.is_empty() || s == "0" => ParentRef::Root,
        Value::String(s) => ParentRef::Key(s.clone()),
        Value::Array(a) if a.is_empty() => ParentRef::Root,
        Value::Object(o) if o.is_empty() => ParentRef::Root,
        Value::Array(_) | Value::Object(_) => ParentRef::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn given_falsy_parent_values_when_resolving_then_treated_as_root() {
        let falsy = [
            json!(null),
            json!(false),
            json!(0),
            json!(0.0),
            json!(""),
            json!("0"),
            json!([]),
            json!({}),
        ];
        for v in falsy {
            assert_eq!(parent_key(Some(&v)), ParentRef::Root, "{} should be falsy", v);
        }
        assert_eq!(parent_key(None), ParentRef::Root);
    }

    #[test]
    fn given_truthy_parent_values_when_resolving_then_returns_key() {
        assert_eq!(parent_key(Some(&json!(7))), ParentRef::Key("7".into()));
        assert_eq!(parent_key(Some(&json!("a"))), ParentRef::Key("a".into()));
        assert_eq!(parent_key(Some(&json!(true))), ParentRef::Key("1".into()));
        assert_eq!(parent_key(Some(&json!([1]))), ParentRef::Invalid);
    }
}
