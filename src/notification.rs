// src/notification.rs
//! Одно временное сообщение для оператора.
//!
//! Каждое `notify` планирует очистку через `display` времени. Очистки
//! выполняются вызовом `tick(now)` из однопоточного таймера, отмены нет.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use strum::{AsRefStr, Display, EnumString};

pub const DEFAULT_DISPLAY_MS: u64 = 3000;

/// Какие запланированные очистки срабатывают
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum ClearPolicy {
    /// Очистка действует только на сообщение, которое её запланировало
    #[default]
    Latest,
    /// Любой сработавший таймер стирает текущее сообщение
    EveryTimer,
}

#[derive(Debug, Clone, Copy)]
struct PendingClear {
    due: Instant,
    seq: u64,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    current: Option<(u64, String)>,
    pending: VecDeque<PendingClear>,
    next_seq: u64,
    display: Duration,
    policy: ClearPolicy,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DISPLAY_MS), ClearPolicy::default())
    }
}

impl Notifier {
    pub fn new(display: Duration, policy: ClearPolicy) -> Self {
        Self {
            current: None,
            pending: VecDeque::new(),
            next_seq: 0,
            display,
            policy,
        }
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notify_at(message, Instant::now());
    }

    /// Заменяет текущее сообщение и ставит очистку в очередь
    pub fn notify_at(&mut self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        self.next_seq += 1;
        debug!("Notification #{}: {}", self.next_seq, message);

        self.current = Some((self.next_seq, message));
        // При Latest прежние очистки уже ничего не сотрут
        if self.policy == ClearPolicy::Latest {
            self.pending.clear();
        }
        self.pending.push_back(PendingClear {
            due: now + self.display,
            seq: self.next_seq,
        });
    }

    /// Выполняет все наступившие очистки; true, если сообщение было стёрто
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut cleared = false;

        while let Some(clear) = self.pending.front().copied() {
            if clear.due > now {
                break;
            }
            self.pending.pop_front();

            let fires = match self.policy {
                ClearPolicy::EveryTimer => true,
                ClearPolicy::Latest => matches!(&self.current, Some((seq, _)) if *seq == clear.seq),
            };
            if fires && self.current.take().is_some() {
                cleared = true;
            }
        }

        cleared
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_ref().map(|(_, message)| message.as_str())
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    pub fn pending_clears(&self) -> usize {
        self.pending.len()
    }

}
