// src/models/item.rs
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, Display, EnumString};

use super::{Location, WorkMode};

// ==================== ITEM ID ====================

/// Идентификатор записи; выводится из времени создания в миллисекундах
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ==================== ITEM STATUS ====================

/// Жизненный цикл образца: только stored -> disposed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Stored,
    Disposed,
}

// ==================== ITEM ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub barcode: String,
    pub mode: WorkMode,
    pub location: Location,
    pub status: ItemStatus,
    pub created_at: DateTime<Local>,
    pub disposed_at: Option<DateTime<Local>>,
}

impl Item {
    pub fn is_stored(&self) -> bool {
        self.status == ItemStatus::Stored
    }

    pub fn is_disposed(&self) -> bool {
        self.status == ItemStatus::Disposed
    }

    /// Stored -> Disposed. Повторный вызов ничего не меняет.
    pub(crate) fn dispose(&mut self, at: DateTime<Local>) -> bool {
        if self.is_disposed() {
            return false;
        }
        self.status = ItemStatus::Disposed;
        self.disposed_at = Some(at);
        true
    }
}
