// src/repositories/zones.rs
//! Реестр зон хранения.
//!
//! Удаление и уменьшение диапазона проверяются по реестру образцов:
//! нельзя удалить зону с образцами на хранении и нельзя отрезать занятые ячейки.

use log::{info, warn};
use std::collections::BTreeSet;

use super::ItemRegistry;
use crate::config::StorageConfig;
use crate::error::{StorageError, StorageResult};
use crate::models::{Location, Zone, ZoneName};
use crate::validator::FieldValidator;

/// Верхняя граница: имена новых зон — одиночные буквы A..Z
pub const MAX_ZONES: usize = 26;
pub const DEFAULT_SLOT_COUNT: u8 = 30;

#[derive(Debug, Clone)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
    expanded: BTreeSet<ZoneName>,
    default_slot_count: u8,
    max_zones: usize,
}

impl Default for ZoneRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_SLOT_COUNT, MAX_ZONES)
    }
}

impl ZoneRegistry {
    /// Пустой реестр
    pub fn new(default_slot_count: u8, max_zones: usize) -> Self {
        Self {
            zones: Vec::new(),
            expanded: BTreeSet::new(),
            default_slot_count,
            max_zones: max_zones.min(MAX_ZONES),
        }
    }

    /// Начальный набор зон из конфигурации (по умолчанию A..E по 30 ячеек, раскрыта A)
    pub fn from_config(config: &StorageConfig) -> StorageResult<Self> {
        let mut registry = Self::new(config.default_slot_count, config.max_zones);

        for raw in &config.default_zones {
            let name: ZoneName = raw.parse()?;
            if registry.get(&name).is_some() {
                return Err(StorageError::DuplicateZoneName(name.to_string()));
            }
            registry.zones.push(Zone::new(name, config.default_slot_count));
        }

        for raw in &config.initial_expanded {
            let name: ZoneName = raw.parse()?;
            registry.require(&name)?;
            registry.expanded.insert(name);
        }

        Ok(registry)
    }

    // ==================== ADD ====================

    /// Новая зона получает наименьшую свободную букву
    pub fn add_zone(&mut self) -> StorageResult<ZoneName> {
        let exceeded = StorageError::MaxZonesExceeded { max: self.max_zones };
        if self.zones.len() >= self.max_zones {
            warn!("Zone limit reached ({})", self.max_zones);
            return Err(exceeded);
        }

        let name = (0..MAX_ZONES)
            .filter_map(ZoneName::from_index)
            .find(|candidate| self.get(candidate).is_none())
            .ok_or(exceeded)?;

        self.zones.push(Zone::new(name.clone(), self.default_slot_count));
        self.expanded.insert(name.clone());

        info!("📦 Added zone {} ({} slots)", name, self.default_slot_count);
        Ok(name)
    }

    // ==================== DELETE ====================

    pub fn delete_zone(&mut self, name: &ZoneName, items: &ItemRegistry) -> StorageResult<Zone> {
        let index = self.index_of(name)?;

        if self.zones.len() <= 1 {
            return Err(StorageError::LastZone);
        }

        let stored = items.stored_in_zone(name);
        if stored > 0 {
            return Err(StorageError::ZoneNotEmpty { zone: name.clone(), stored });
        }

        let removed = self.zones.remove(index);
        self.expanded.remove(name);

        info!("📦 Deleted zone {}", name);
        Ok(removed)
    }

    // ==================== RENAME ====================

    /// Переименование зоны вместе с адресами всех её записей
    pub fn rename_zone(
        &mut self,
        old: &ZoneName,
        new_name: &str,
        items: &mut ItemRegistry,
    ) -> StorageResult<ZoneName> {
        let index = self.index_of(old)?;
        let new: ZoneName = new_name.parse()?;

        if &new == old {
            return Ok(new);
        }

        if self.get(&new).is_some() {
            return Err(StorageError::DuplicateZoneName(new.to_string()));
        }

        self.zones[index].name = new.clone();
        if self.expanded.remove(old) {
            self.expanded.insert(new.clone());
        }
        let moved = items.relocate_zone(old, &new);

        info!("📦 Renamed zone {} -> {} ({} record(s) moved)", old, new, moved);
        Ok(new)
    }

    // ==================== RESIZE ====================

    /// Возвращает прежнее количество ячеек
    pub fn resize_zone(
        &mut self,
        name: &ZoneName,
        new_count: u32,
        items: &ItemRegistry,
    ) -> StorageResult<u8> {
        let new_count = FieldValidator::slot_count(new_count)
            .map_err(|_| StorageError::slot_count_out_of_range(new_count))?;
        let index = self.index_of(name)?;
        let old_count = self.zones[index].slot_count;

        if new_count < old_count && items.has_stored_beyond(name, new_count) {
            return Err(StorageError::RangeOccupied { zone: name.clone(), new_count });
        }

        self.zones[index].slot_count = new_count;

        info!("📦 Zone {} range {} -> {}", name, old_count, new_count);
        Ok(old_count)
    }

    // ==================== EXPANSION ====================

    /// Флаг видимости для интерфейса; возвращает новое состояние
    pub fn toggle_expansion(&mut self, name: &ZoneName) -> StorageResult<bool> {
        self.require(name)?;
        if self.expanded.remove(name) {
            Ok(false)
        } else {
            self.expanded.insert(name.clone());
            Ok(true)
        }
    }

    pub fn is_expanded(&self, name: &ZoneName) -> bool {
        self.expanded.contains(name)
    }

    // ==================== QUERIES ====================

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn names(&self) -> Vec<&ZoneName> {
        self.zones.iter().map(|zone| &zone.name).collect()
    }

    pub fn get(&self, name: &ZoneName) -> Option<&Zone> {
        self.zones.iter().find(|zone| &zone.name == name)
    }

    pub fn require(&self, name: &ZoneName) -> StorageResult<&Zone> {
        self.get(name).ok_or_else(|| StorageError::zone_not_found(name))
    }

    pub fn first(&self) -> Option<&Zone> {
        self.zones.first()
    }

    /// Ячейка существует: зона есть и номер в её диапазоне
    pub fn contains_location(&self, location: &Location) -> bool {
        self.get(location.zone())
            .map(|zone| zone.contains(location))
            .unwrap_or(false)
    }

    pub fn total_locations(&self) -> usize {
        self.zones.iter().map(|zone| zone.slot_count as usize).sum()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    fn index_of(&self, name: &ZoneName) -> StorageResult<usize> {
        self.zones
            .iter()
            .position(|zone| &zone.name == name)
            .ok_or_else(|| StorageError::zone_not_found(name))
    }
}
