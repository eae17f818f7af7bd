// src/report.rs
//! Сводки для панели статистики: общие счётчики и разбивка по зонам.

use serde::Serialize;

use crate::models::ZoneName;
use crate::repositories::{ItemRegistry, ZoneRegistry};

// ==================== INVENTORY ====================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InventoryStats {
    pub total_processed: usize,
    pub total_stored: usize,
    pub total_disposed: usize,
}

impl InventoryStats {
    pub fn collect(items: &ItemRegistry) -> Self {
        let total_processed = items.len();
        let total_stored = items.stored().count();

        Self {
            total_processed,
            total_stored,
            total_disposed: total_processed - total_stored,
        }
    }
}

// ==================== ZONES ====================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneSummary {
    pub zone: ZoneName,
    pub slot_count: u8,
    pub range_label: String,
    pub stored: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneOverview {
    pub total_zones: usize,
    pub total_locations: usize,
    pub zones: Vec<ZoneSummary>,
}

impl ZoneOverview {
    pub fn collect(zones: &ZoneRegistry, items: &ItemRegistry) -> Self {
        let summaries = zones
            .zones()
            .iter()
            .map(|zone| ZoneSummary {
                zone: zone.name.clone(),
                slot_count: zone.slot_count,
                range_label: zone.range_label(),
                stored: items.stored_in_zone(&zone.name),
            })
            .collect();

        Self {
            total_zones: zones.len(),
            total_locations: zones.total_locations(),
            zones: summaries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;

    #[test]
    fn test_inventory_stats() {
        let mut items = ItemRegistry::new();
        assert_eq!(InventoryStats::collect(&items), InventoryStats::default());

        let a = items.create_item("S1", "A-01".parse().unwrap()).unwrap().id;
        items.create_item("S2", "B-02".parse().unwrap()).unwrap();
        items.create_item("S3", "B-02".parse().unwrap()).unwrap();
        items.dispose_items(&[a].into_iter().collect());

        let stats = InventoryStats::collect(&items);
        assert_eq!(stats.total_processed, 3);
        assert_eq!(stats.total_stored, 2);
        assert_eq!(stats.total_disposed, 1);
    }

    #[test]
    fn test_zone_overview() {
        let mut zones = ZoneRegistry::from_config(&StorageConfig::default()).unwrap();
        let mut items = ItemRegistry::new();
        zones.resize_zone(&"B".parse().unwrap(), 8, &items).unwrap();
        items.create_item("S1", "B-02".parse().unwrap()).unwrap();
        items.create_item("S2", "B-07".parse().unwrap()).unwrap();

        let overview = ZoneOverview::collect(&zones, &items);
        assert_eq!(overview.total_zones, 5);
        assert_eq!(overview.total_locations, 30 * 4 + 8);

        let b = &overview.zones[1];
        assert_eq!(b.zone.as_str(), "B");
        assert_eq!(b.range_label, "B-01 ~ B-08");
        assert_eq!(b.stored, 2);
        assert_eq!(overview.zones[0].stored, 0);
    }
}
