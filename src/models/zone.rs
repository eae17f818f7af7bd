// src/models/zone.rs
use serde::{Deserialize, Serialize};

use super::{Location, ZoneName, MIN_SLOT};

/// Зона хранения и количество ячеек в ней
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub name: ZoneName,
    pub slot_count: u8,
}

impl Zone {
    pub fn new(name: ZoneName, slot_count: u8) -> Self {
        Self { name, slot_count }
    }

    /// Все ячейки зоны по порядку: A-01, A-02, ...
    pub fn locations(&self) -> Vec<Location> {
        (MIN_SLOT..=self.slot_count)
            .filter_map(|slot| Location::new(self.name.clone(), slot).ok())
            .collect()
    }

    pub fn contains(&self, location: &Location) -> bool {
        location.is_in_zone(&self.name) && location.slot() <= self.slot_count
    }

    /// "A-01 ~ A-30"
    pub fn range_label(&self) -> String {
        format!("{0}-01 ~ {0}-{1:02}", self.name, self.slot_count)
    }
}
