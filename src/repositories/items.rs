// src/repositories/items.rs
//! Реестр образцов: создание записей и массовая утилизация.
//!
//! Порядок списка — от новых к старым; все выборки сохраняют этот порядок.

use chrono::{DateTime, Local};
use log::{debug, info};
use std::collections::BTreeSet;

use crate::error::{StorageError, StorageResult};
use crate::models::{Item, ItemId, ItemStatus, Location, WorkMode, ZoneName};
use crate::timestamp;
use crate::validator::FieldValidator;

#[derive(Debug, Default, Clone)]
pub struct ItemRegistry {
    items: Vec<Item>,
    last_id: i64,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== CREATE ====================

    pub fn create_item(&mut self, barcode: &str, location: Location) -> StorageResult<&Item> {
        self.create_item_at(barcode, location, timestamp::now())
    }

    /// Новый образец в статусе stored, добавляется в начало списка
    pub fn create_item_at(
        &mut self,
        barcode: &str,
        location: Location,
        at: DateTime<Local>,
    ) -> StorageResult<&Item> {
        FieldValidator::not_empty(barcode, "barcode").map_err(|_| StorageError::EmptyBarcode)?;
        let barcode = barcode.trim();

        // Миллисекунды времени создания, но строго возрастающие
        let id = ItemId(at.timestamp_millis().max(self.last_id + 1));
        self.last_id = id.0;

        let item = Item {
            id,
            barcode: barcode.to_string(),
            mode: WorkMode::Storage,
            location,
            status: ItemStatus::Stored,
            created_at: at,
            disposed_at: None,
        };

        info!("🧫 Stored specimen {} at {} (#{})", item.barcode, item.location, item.id);
        self.items.insert(0, item);
        Ok(&self.items[0])
    }

    // ==================== DISPOSE ====================

    pub fn dispose_items(&mut self, ids: &BTreeSet<ItemId>) -> usize {
        self.dispose_items_at(ids, timestamp::now())
    }

    /// Утилизация пачкой: одно и то же время для всех. Уже утилизированные не трогаем.
    pub fn dispose_items_at(&mut self, ids: &BTreeSet<ItemId>, at: DateTime<Local>) -> usize {
        if ids.is_empty() {
            return 0;
        }

        let disposed = self
            .items
            .iter_mut()
            .filter(|item| ids.contains(&item.id))
            .map(|item| item.dispose(at))
            .filter(|&changed| changed)
            .count();

        info!("🗑️ Disposed {} specimen(s) ({} requested)", disposed, ids.len());
        disposed
    }

    // ==================== QUERIES ====================

    /// Образцы на хранении в данной ячейке, в порядке реестра
    pub fn items_at_location(&self, location: &Location) -> Vec<&Item> {
        self.stored()
            .filter(|item| &item.location == location)
            .collect()
    }

    pub fn count_at_location(&self, location: &Location) -> usize {
        self.stored().filter(|item| &item.location == location).count()
    }

    pub fn stored_in_zone(&self, zone: &ZoneName) -> usize {
        self.stored().filter(|item| item.location.is_in_zone(zone)).count()
    }

    /// Есть ли в зоне образцы на хранении с номером ячейки больше `slot`
    pub fn has_stored_beyond(&self, zone: &ZoneName, slot: u8) -> bool {
        self.stored()
            .any(|item| item.location.is_in_zone(zone) && item.location.slot() > slot)
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn stored(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| item.is_stored())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // ==================== ZONE RENAME ====================

    /// Переносит все записи зоны (и stored, и disposed) под новое имя
    pub fn relocate_zone(&mut self, from: &ZoneName, to: &ZoneName) -> usize {
        let mut moved = 0;
        for item in self.items.iter_mut().filter(|item| item.location.is_in_zone(from)) {
            item.location = item.location.with_zone(to.clone());
            moved += 1;
        }
        debug!("Relocated {} record(s) from zone {} to {}", moved, from, to);
        moved
    }
}
