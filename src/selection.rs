// src/selection.rs
//! Выбор образцов для утилизации в текущей ячейке.

use std::collections::BTreeSet;

use crate::models::{ItemId, Location};
use crate::repositories::ItemRegistry;

#[derive(Debug, Default, Clone)]
pub struct SelectionTracker {
    selected: BTreeSet<ItemId>,
    // Один флаг на всё приложение, не на ячейку
    select_all: bool,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Возвращает true, если id теперь выбран
    pub fn toggle(&mut self, id: ItemId) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Переключает "выбрать все" для образцов на хранении в ячейке
    pub fn select_all_at_location(&mut self, location: &Location, items: &ItemRegistry) {
        let at_location = items.items_at_location(location);

        if self.select_all {
            for item in at_location {
                self.selected.remove(&item.id);
            }
        } else {
            self.selected.extend(at_location.iter().map(|item| item.id));
        }
        self.select_all = !self.select_all;
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.select_all = false;
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.selected.contains(&id)
    }

    pub fn ids(&self) -> &BTreeSet<ItemId> {
        &self.selected
    }

    pub fn select_all(&self) -> bool {
        self.select_all
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
