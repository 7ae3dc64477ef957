use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::record_id::RecordId;

/// Status given to items created without one.
pub const DEFAULT_STATUS: &str = "pending";

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Task,
    Note,
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemType::Task => write!(f, "task"),
            ItemType::Note => write!(f, "note"),
        }
    }
}

impl FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "task" => Ok(ItemType::Task),
            "note" => Ok(ItemType::Note),
            other => Err(format!("unknown item type {:?}, expected task or note", other)),
        }
    }
}

/// A task or note, as persisted under `todolist_items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: RecordId,
    /// Owner, taken from the session at creation. Not checked against the users.
    pub user_id: RecordId,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub content: String,
    #[serde(default = "default_status")]
    pub status: String,
    pub created_at: DateTime<Utc>,
    /// Fields this crate does not model, written back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Input of `create_item`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub item_type: ItemType,
    pub content: String,
    pub status: Option<String>,
}

impl NewItem {
    pub fn new(item_type: ItemType, content: impl Into<String>) -> Self {
        Self {
            item_type,
            content: content.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// The status to store: the given one, or `pending` when absent or empty.
    pub fn effective_status(&self) -> String {
        match &self.status {
            Some(status) if !status.is_empty() => status.clone(),
            _ => default_status(),
        }
    }
}

/// Fields to overwrite on an item. `id`, `user_id` and `created_at` are fixed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub item_type: Option<ItemType>,
    pub content: Option<String>,
    pub status: Option<String>,
}

impl ItemPatch {
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(item_type) = self.item_type {
            item.item_type = item_type;
        }
        if let Some(content) = &self.content {
            item.content = content.clone();
        }
        if let Some(status) = &self.status {
            item.status = status.clone();
        }
    }
}
