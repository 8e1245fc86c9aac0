//! Stroke-granularity undo/redo over full-surface snapshots.
//!
//! The buffer holds whole pixel captures and a cursor at the entry that is
//! currently displayed. Undo and redo move the cursor and put the entry
//! back on the surface; no per-pixel inverse is ever computed.
//!
//! History is linear: pushing while the cursor is behind the tail drops
//! every redo-able entry. When full, the oldest entry is evicted, even if
//! it is the initial blank canvas.

use sk_core::Snapshot;
use sk_render::{Surface, SurfaceAdapter};
use std::collections::VecDeque;

pub struct History {
    entries: VecDeque<Snapshot>,
    /// Index of the displayed entry; `None` iff `entries` is empty.
    cursor: Option<usize>,
    /// Maximum number of entries.
    capacity: usize,
}

impl History {
    /// A history holding at most `capacity` snapshots (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            cursor: None,
            capacity,
        }
    }

    /// Capture the surface and record it as the newest entry.
    ///
    /// A failed capture leaves the history untouched. Returns whether an
    /// entry was recorded.
    pub fn push<S: Surface>(&mut self, adapter: &SurfaceAdapter<S>) -> bool {
        match adapter.snapshot() {
            Ok(snapshot) => {
                self.record(snapshot);
                true
            }
            Err(e) => {
                log::warn!("history push skipped: {e}");
                false
            }
        }
    }

    /// Record an already-captured snapshot: truncate the redo tail, append,
    /// and evict from the front when over capacity.
    pub fn record(&mut self, snapshot: Snapshot) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        let dropped = self.entries.len() - keep;
        if dropped > 0 {
            self.entries.truncate(keep);
            log::debug!("history: discarded {dropped} redo entries");
        }

        self.entries.push_back(snapshot);
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            log::debug!("history: evicted oldest entry");
        }
        self.cursor = Some(self.entries.len() - 1);
        log::debug!("history: {} entries, cursor {}", self.entries.len(), self.entries.len() - 1);
    }

    /// Step back one entry and display it. No-op at the first entry.
    pub fn undo<S: Surface>(&mut self, adapter: &mut SurfaceAdapter<S>) -> bool {
        match self.cursor {
            Some(c) if c > 0 => self.show(adapter, c - 1),
            _ => false,
        }
    }

    /// Step forward one entry and display it. No-op at the last entry.
    pub fn redo<S: Surface>(&mut self, adapter: &mut SurfaceAdapter<S>) -> bool {
        match self.cursor {
            Some(c) if c + 1 < self.entries.len() => self.show(adapter, c + 1),
            _ => false,
        }
    }

    /// Blank the surface and record the blank state as an undoable entry.
    pub fn reset<S: Surface>(&mut self, adapter: &mut SurfaceAdapter<S>) -> bool {
        adapter.clear();
        self.push(adapter)
    }

    /// Restore entry `target`. The cursor only moves if the restore lands.
    fn show<S: Surface>(&mut self, adapter: &mut SurfaceAdapter<S>, target: usize) -> bool {
        let Some(snapshot) = self.entries.get(target) else {
            return false;
        };
        match adapter.restore(snapshot) {
            Ok(()) => {
                self.cursor = Some(target);
                log::debug!("history: cursor {target} of {}", self.entries.len());
                true
            }
            Err(e) => {
                log::warn!("history restore of entry {target} abandoned: {e}");
                false
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The snapshot the cursor points at.
    pub fn current(&self) -> Option<&Snapshot> {
        self.cursor.and_then(|c| self.entries.get(c))
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.entries.get(index)
    }
}
