//! Single-week snapshot cache with a stale-fetch guard.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::normalize::NormalizedCalendar;

#[derive(Default)]
struct Slot {
    seq: u64,
    week_start: Option<NaiveDate>,
    data: Option<Arc<NormalizedCalendar>>,
}

/// Holds the most recently fetched week. Every fetch takes a ticket from
/// `begin` before hitting the database; `install` refuses tickets older
/// than the one already installed, so a slow response for a week the user
/// has already navigated away from can never clobber a fresher snapshot.
pub struct WeekCache {
    next_seq: AtomicU64,
    slot: RwLock<Slot>,
}

impl WeekCache {
    pub fn new() -> Self {
        WeekCache {
            next_seq: AtomicU64::new(1),
            slot: RwLock::new(Slot::default()),
        }
    }

    /// Takes a monotonically increasing fetch ticket.
    pub fn begin(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed)
    }

    /// The cached snapshot, if it is for exactly this week.
    pub async fn get(&self, week_start: NaiveDate) -> Option<Arc<NormalizedCalendar>> {
        let slot = self.slot.read().await;
        if slot.week_start == Some(week_start) {
            slot.data.clone()
        } else {
            None
        }
    }

    /// Installs a fetched snapshot unless a newer ticket already landed.
    /// Returns whether the snapshot was accepted.
    pub async fn install(
        &self,
        seq: u64,
        week_start: NaiveDate,
        data: Arc<NormalizedCalendar>,
    ) -> bool {
        let mut slot = self.slot.write().await;
        if seq <= slot.seq {
            return false;
        }
        slot.seq = seq;
        slot.week_start = Some(week_start);
        slot.data = Some(data);
        true
    }

    /// Drops the snapshot after a mutation so the next read refetches.
    pub async fn invalidate(&self) {
        let mut slot = self.slot.write().await;
        slot.week_start = None;
        slot.data = None;
    }
}

impl Default for WeekCache {
    fn default() -> Self {
        WeekCache::new()
    }
}
