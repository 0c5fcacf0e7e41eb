//! Item-creation hook binding
//!
//! The host calls [`RenameHook::on_item_created`] synchronously for every
//! newly created consumable. The hook holds a shared snapshot of the rule
//! table; replacing it publishes a whole new table rather than touching the
//! one readers may still hold.

use std::sync::Arc;

use crate::host::CreatedItem;
use crate::naming::NamingEngine;
use crate::rules::RuleTable;

#[derive(Debug, Clone)]
pub struct RenameHook {
    table: Arc<RuleTable>,
}

impl RenameHook {
    pub fn new(table: Arc<RuleTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &Arc<RuleTable> {
        &self.table
    }

    /// Swap in a freshly built table
    pub fn publish(&mut self, table: Arc<RuleTable>) {
        self.table = table;
    }

    /// Rename the item in place if a rule matches. Returns whether it was renamed.
    pub fn on_item_created(&self, item: &mut CreatedItem) -> bool {
        match NamingEngine::new(&self.table).try_rename(item) {
            Some(name) => {
                tracing::debug!(from = %item.name, to = %name, "Renamed item");
                item.name = name;
                true
            }
            None => false,
        }
    }
}
