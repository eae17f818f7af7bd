// src/workstation.rs
//! Состояние рабочей станции: реестры, выбор, уведомления, режим и текущая ячейка.
//!
//! Каждая операция сообщает результат через `Notifier` (текст успеха или
//! ошибки) и возвращает `StorageResult` вызывающему.

use log::{error, warn};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::{StorageError, StorageResult};
use crate::import_export::{history_to_csv, history_to_json};
use crate::models::{Item, ItemId, Location, WorkMode, ZoneName};
use crate::notification::Notifier;
use crate::report::{InventoryStats, ZoneOverview};
use crate::repositories::{ItemRegistry, ZoneRegistry};
use crate::selection::SelectionTracker;
use crate::timestamp::TimestampStyle;

pub struct Workstation {
    items: ItemRegistry,
    zones: ZoneRegistry,
    selection: SelectionTracker,
    notifier: Notifier,
    mode: WorkMode,
    active_location: Location,
    timestamp_style: TimestampStyle,
}

impl Workstation {
    pub fn new(config: &Config) -> StorageResult<Self> {
        let zones = ZoneRegistry::from_config(&config.storage)?;
        let active_location: Location = config.storage.initial_location.parse()?;
        if !zones.contains_location(&active_location) {
            return Err(StorageError::invalid_location(&config.storage.initial_location));
        }

        Ok(Self {
            items: ItemRegistry::new(),
            zones,
            selection: SelectionTracker::new(),
            notifier: Notifier::new(
                Duration::from_millis(config.notification.display_ms),
                config.notification.clear_policy,
            ),
            mode: WorkMode::default(),
            active_location,
            timestamp_style: config.display.timestamp_style,
        })
    }

    // ==================== MODE & LOCATION ====================

    pub fn set_mode(&mut self, mode: WorkMode) {
        if self.mode != mode {
            self.mode = mode;
            self.selection.clear();
        }
    }

    pub fn select_location(&mut self, location: Location) -> StorageResult<()> {
        let checked = if self.zones.get(location.zone()).is_none() {
            Err(StorageError::zone_not_found(location.zone()))
        } else if !self.zones.contains_location(&location) {
            Err(StorageError::invalid_location(location.to_string()))
        } else {
            Ok(())
        };
        self.report(checked, |_| None)?;

        self.move_to(location);
        Ok(())
    }

    // ==================== STORAGE ====================

    pub fn submit_barcode(&mut self, barcode: &str) -> StorageResult<ItemId> {
        let result = self.require_mode(WorkMode::Storage).and_then(|_| {
            self.items
                .create_item(barcode, self.active_location.clone())
                .map(|item| (item.id, item.barcode.clone()))
        });

        let location = self.active_location.clone();
        self.report(result, |(_, barcode)| {
            Some(format!("Specimen {} stored at {}.", barcode, location))
        })
        .map(|(id, _)| id)
    }

    // ==================== DISPOSAL ====================

    /// Отметить/снять образец; выбирать можно только хранящиеся в текущей ячейке
    pub fn toggle_item(&mut self, id: ItemId) -> StorageResult<bool> {
        let result = self.require_mode(WorkMode::Disposal).and_then(|_| {
            let selectable = self
                .items
                .get(id)
                .map(|item| item.is_stored() && item.location == self.active_location)
                .unwrap_or(false);

            if selectable || self.selection.contains(id) {
                Ok(self.selection.toggle(id))
            } else {
                Err(StorageError::ItemNotSelectable {
                    id,
                    location: self.active_location.to_string(),
                })
            }
        });
        self.report(result, |_| None)
    }

    /// Возвращает размер выбора после переключения
    pub fn toggle_select_all(&mut self) -> StorageResult<usize> {
        let result = self.require_mode(WorkMode::Disposal).map(|_| {
            self.selection
                .select_all_at_location(&self.active_location, &self.items);
            self.selection.len()
        });
        self.report(result, |_| None)
    }

    pub fn dispose_selected(&mut self) -> StorageResult<usize> {
        let result = self.require_mode(WorkMode::Disposal).and_then(|_| {
            if self.selection.is_empty() {
                return Err(StorageError::EmptySelection);
            }
            let disposed = self.items.dispose_items(self.selection.ids());
            self.selection.clear();
            Ok(disposed)
        });
        self.report(result, |count| Some(format!("{} specimen(s) disposed.", count)))
    }

    // ==================== ZONES ====================

    pub fn add_zone(&mut self) -> StorageResult<ZoneName> {
        let result = self.zones.add_zone();
        self.report(result, |name| Some(format!("Zone {} added.", name)))
    }

    pub fn delete_zone(&mut self, name: &str) -> StorageResult<()> {
        let result = name
            .parse::<ZoneName>()
            .and_then(|zone| self.zones.delete_zone(&zone, &self.items).map(|_| zone));
        let zone = self.report(result, |zone| Some(format!("Zone {} deleted.", zone)))?;

        if self.active_location.is_in_zone(&zone) {
            if let Some(first) = self.zones.first() {
                let fallback = Location::first_in(first.name.clone());
                self.move_to(fallback);
            }
        }
        Ok(())
    }

    pub fn rename_zone(&mut self, old: &str, new: &str) -> StorageResult<ZoneName> {
        let result = old.parse::<ZoneName>().and_then(|old_zone| {
            self.zones
                .rename_zone(&old_zone, new, &mut self.items)
                .map(|new_zone| (old_zone, new_zone))
        });

        let (old_zone, new_zone) = self.report(result, |(old_zone, new_zone)| {
            (old_zone != new_zone)
                .then(|| format!("Zone renamed from {} to {}.", old_zone, new_zone))
        })?;

        if old_zone != new_zone && self.active_location.is_in_zone(&old_zone) {
            let moved = self.active_location.with_zone(new_zone.clone());
            self.move_to(moved);
        }
        Ok(new_zone)
    }

    /// Возвращает прежнее количество ячеек
    pub fn resize_zone(&mut self, name: &str, slot_count: u32) -> StorageResult<u8> {
        let result = name.parse::<ZoneName>().and_then(|zone| {
            self.zones
                .resize_zone(&zone, slot_count, &self.items)
                .map(|old| (zone, old))
        });

        let (zone, old) = self.report(result, |(zone, old)| {
            Some(format!("Zone {} range changed from {} to {}.", zone, old, slot_count))
        })?;

        if self.active_location.is_in_zone(&zone)
            && !self.zones.contains_location(&self.active_location)
        {
            self.move_to(Location::first_in(zone));
        }
        Ok(old)
    }

    pub fn toggle_zone(&mut self, name: &str) -> StorageResult<bool> {
        let result = name
            .parse::<ZoneName>()
            .and_then(|zone| self.zones.toggle_expansion(&zone));
        self.report(result, |_| None)
    }

    // ==================== NOTIFICATIONS ====================

    pub fn notification(&self) -> Option<&str> {
        self.notifier.current()
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.notifier.tick(now)
    }

    // ==================== QUERIES ====================

    pub fn mode(&self) -> WorkMode {
        self.mode
    }

    pub fn active_location(&self) -> &Location {
        &self.active_location
    }

    /// Образцы на хранении в текущей ячейке
    pub fn stored_here(&self) -> Vec<&Item> {
        self.items.items_at_location(&self.active_location)
    }

    pub fn items(&self) -> &ItemRegistry {
        &self.items
    }

    pub fn zones(&self) -> &ZoneRegistry {
        &self.zones
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn timestamp_style(&self) -> TimestampStyle {
        self.timestamp_style
    }

    pub fn stats(&self) -> InventoryStats {
        InventoryStats::collect(&self.items)
    }

    pub fn zone_overview(&self) -> ZoneOverview {
        ZoneOverview::collect(&self.zones, &self.items)
    }

    pub fn export_csv(&self) -> StorageResult<Vec<u8>> {
        history_to_csv(self.items.items(), self.timestamp_style)
    }

    pub fn export_json(&self) -> StorageResult<String> {
        history_to_json(self.items.items())
    }

    // ==================== HELPERS ====================

    fn require_mode(&self, expected: WorkMode) -> StorageResult<()> {
        if self.mode == expected {
            Ok(())
        } else {
            Err(StorageError::WrongMode { expected: expected.into() })
        }
    }

    /// Смена ячейки всегда сбрасывает выбор
    fn move_to(&mut self, location: Location) {
        if self.active_location != location {
            self.active_location = location;
            self.selection.clear();
        }
    }

    fn report<T>(
        &mut self,
        result: StorageResult<T>,
        success: impl FnOnce(&T) -> Option<String>,
    ) -> StorageResult<T> {
        match &result {
            Ok(value) => {
                if let Some(message) = success(value) {
                    self.notifier.notify(message);
                }
            }
            Err(err) => {
                if err.is_rejection() {
                    warn!("Rejected: {}", err);
                } else {
                    error!("Failed: {}", err);
                }
                self.notifier.notify(err.to_string());
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station() -> Workstation {
        Workstation::new(&Config::default()).unwrap()
    }

    fn loc(s: &str) -> Location {
        s.parse().unwrap()
    }

    #[test]
    fn test_initial_state() {
        let ws = station();
        assert_eq!(ws.mode(), WorkMode::Storage);
        assert_eq!(ws.active_location(), &loc("A-01"));
        assert_eq!(ws.zones().len(), 5);
        assert!(ws.notification().is_none());
    }

    #[test]
    fn test_store_then_dispose_scenario() {
        let mut ws = station();
        let id = ws.submit_barcode("X123").unwrap();
        assert_eq!(ws.notification(), Some("Specimen X123 stored at A-01."));
        assert_eq!(ws.stored_here().len(), 1);

        ws.set_mode(WorkMode::Disposal);
        assert!(ws.toggle_item(id).unwrap());
        assert_eq!(ws.dispose_selected().unwrap(), 1);
        assert_eq!(ws.notification(), Some("1 specimen(s) disposed."));

        assert!(ws.items().get(id).unwrap().is_disposed());
        assert!(ws.stored_here().is_empty());
        assert!(ws.selection().is_empty());
    }

    #[test]
    fn test_mode_guards() {
        let mut ws = station();
        ws.set_mode(WorkMode::Disposal);
        assert!(matches!(
            ws.submit_barcode("X1"),
            Err(StorageError::WrongMode { expected: "storage" })
        ));
        assert_eq!(ws.notification(), Some("This action is only available in storage mode"));

        ws.set_mode(WorkMode::Storage);
        assert!(matches!(ws.dispose_selected(), Err(StorageError::WrongMode { .. })));
    }

    #[test]
    fn test_empty_barcode_notifies() {
        let mut ws = station();
        assert!(matches!(ws.submit_barcode("  "), Err(StorageError::EmptyBarcode)));
        assert_eq!(ws.notification(), Some("Please scan or enter a barcode."));
        assert!(ws.items().is_empty());
    }

    #[test]
    fn test_toggle_item_only_at_active_location() {
        let mut ws = station();
        let here = ws.submit_barcode("S1").unwrap();
        ws.select_location(loc("A-02")).unwrap();
        let there = ws.submit_barcode("S2").unwrap();

        ws.set_mode(WorkMode::Disposal);
        assert!(matches!(ws.toggle_item(here), Err(StorageError::ItemNotSelectable { .. })));
        assert!(ws.toggle_item(there).unwrap());
        assert!(!ws.toggle_item(there).unwrap());
        assert!(ws.toggle_item(ItemId(-1)).is_err());
    }

    #[test]
    fn test_selection_reset_on_location_and_mode_change() {
        let mut ws = station();
        ws.submit_barcode("S1").unwrap();
        ws.submit_barcode("S2").unwrap();
        ws.set_mode(WorkMode::Disposal);

        assert_eq!(ws.toggle_select_all().unwrap(), 2);
        ws.select_location(loc("A-03")).unwrap();
        assert!(ws.selection().is_empty());
        assert!(!ws.selection().select_all());

        ws.select_location(loc("A-01")).unwrap();
        assert_eq!(ws.toggle_select_all().unwrap(), 2);
        ws.set_mode(WorkMode::Storage);
        assert!(ws.selection().is_empty());
    }

    #[test]
    fn test_dispose_empty_selection() {
        let mut ws = station();
        ws.set_mode(WorkMode::Disposal);
        assert!(matches!(ws.dispose_selected(), Err(StorageError::EmptySelection)));
    }

    #[test]
    fn test_select_location_validation() {
        let mut ws = station();
        assert!(matches!(ws.select_location(loc("A-31")), Err(StorageError::InvalidLocation(_))));
        assert!(matches!(ws.select_location(loc("Q-01")), Err(StorageError::ZoneNotFound(_))));
        assert_eq!(ws.active_location(), &loc("A-01"));
    }

    #[test]
    fn test_rename_moves_active_location() {
        let mut ws = station();
        ws.delete_zone("B").unwrap();
        ws.select_location(loc("A-07")).unwrap();
        ws.submit_barcode("S1").unwrap();

        assert_eq!(ws.rename_zone("A", "b").unwrap().as_str(), "B");
        assert_eq!(ws.notification(), Some("Zone renamed from A to B."));
        assert_eq!(ws.active_location(), &loc("B-07"));
        assert_eq!(ws.stored_here().len(), 1);
    }

    #[test]
    fn test_rename_to_existing_is_rejected() {
        let mut ws = station();
        assert!(ws.rename_zone("A", "C").is_err());
        assert_eq!(ws.notification(), Some("Zone name 'C' already exists"));
    }

    #[test]
    fn test_resize_moves_active_location_back() {
        let mut ws = station();
        ws.select_location(loc("C-20")).unwrap();
        assert_eq!(ws.resize_zone("C", 10).unwrap(), 30);
        assert_eq!(ws.active_location(), &loc("C-01"));
        assert_eq!(ws.notification(), Some("Zone C range changed from 30 to 10."));
    }

    #[test]
    fn test_resize_rejected_when_occupied() {
        let mut ws = station();
        ws.resize_zone("A", 5).unwrap();
        // Ячейка A-06 вне диапазона, но реестр образцов диапазон не проверяет
        ws.items.create_item("X9", loc("A-06")).unwrap();

        assert!(matches!(ws.resize_zone("A", 4), Err(StorageError::RangeOccupied { .. })));
        assert_eq!(ws.zones().get(&"A".parse().unwrap()).unwrap().slot_count, 5);
    }

    #[test]
    fn test_delete_active_zone_falls_back() {
        let mut ws = station();
        ws.select_location(loc("C-05")).unwrap();
        ws.delete_zone("C").unwrap();
        assert_eq!(ws.active_location(), &loc("A-01"));

        ws.submit_barcode("S1").unwrap();
        assert!(matches!(ws.delete_zone("A"), Err(StorageError::ZoneNotEmpty { .. })));
        assert_eq!(
            ws.notification(),
            Some("Zone A still holds 1 stored specimen(s) and cannot be deleted")
        );
    }

    #[test]
    fn test_add_zone_notifies() {
        let mut ws = station();
        assert_eq!(ws.add_zone().unwrap().as_str(), "F");
        assert_eq!(ws.notification(), Some("Zone F added."));
        assert!(ws.zones().is_expanded(&"F".parse().unwrap()));
    }

    #[test]
    fn test_notification_expires_on_tick() {
        let mut ws = station();
        ws.add_zone().unwrap();
        assert!(ws.tick(Instant::now() + Duration::from_secs(4)));
        assert!(ws.notification().is_none());
    }

    #[test]
    fn test_stats_and_export() {
        let mut ws = station();
        ws.submit_barcode("S1").unwrap();
        let stats = ws.stats();
        assert_eq!(stats.total_processed, 1);
        assert_eq!(stats.total_stored, 1);
        assert_eq!(ws.zone_overview().zones[0].stored, 1);

        let csv = String::from_utf8(ws.export_csv().unwrap()).unwrap();
        assert!(csv.contains("S1,stored,A-01"));
        assert!(ws.export_json().unwrap().contains("\"S1\""));
    }
}
