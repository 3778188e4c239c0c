//! Process-wide schema table keyed by widget type name.
//!
//! Each widget type's [`FieldSchema`] is populated exactly once, the first
//! time an instance of that type is constructed, and is read-only afterwards.
//! Readers never block: the table is an `ArcSwap` snapshot replaced
//! copy-on-write when a new type is defined.

use std::sync::{Arc, OnceLock};

use ahash::AHashMap;
use arc_swap::ArcSwap;

use crate::schema::FieldSchema;

type SchemaTable = AHashMap<String, Arc<FieldSchema>>;

static GLOBAL: OnceLock<SchemaRegistry> = OnceLock::new();

/// Write-once table of widget schemas.
#[derive(Debug)]
pub struct SchemaRegistry {
    schemas: ArcSwap<SchemaTable>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaRegistry {
    /// Create an empty, standalone registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            schemas: ArcSwap::from_pointee(SchemaTable::new()),
        }
    }

    /// The process-wide registry.
    #[must_use]
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::new)
    }

    #[must_use]
    pub fn get(&self, widget: &str) -> Option<Arc<FieldSchema>> {
        self.schemas.load().get(widget).cloned()
    }

    /// Schema for `widget`, building and publishing it on first use.
    ///
    /// If two threads race to define the same type, both receive the schema
    /// that was published first; the loser's build is discarded.
    pub fn get_or_define(
        &self,
        widget: &str,
        build: impl FnOnce() -> FieldSchema,
    ) -> Arc<FieldSchema> {
        if let Some(schema) = self.get(widget) {
            return schema;
        }

        let built = Arc::new(build());
        let mut published = Arc::clone(&built);
        self.schemas.rcu(|current| {
            let mut next = SchemaTable::clone(current);
            match next.get(widget) {
                Some(existing) => published = Arc::clone(existing),
                None => {
                    published = Arc::clone(&built);
                    next.insert(widget.to_owned(), Arc::clone(&built));
                    tracing::debug!(widget, fields = built.len(), "field schema defined");
                }
            }
            next
        });
        published
    }

    #[must_use]
    pub fn is_defined(&self, widget: &str) -> bool {
        self.schemas.load().contains_key(widget)
    }

    /// Number of defined widget types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.load().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
