//! Transient "copied" feedback shown next to each pane's copy icon.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::task::AbortHandle;

use super::state::Side;

pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied!";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyFeedback {
    copied: bool,
    generation: u64,
}

impl CopyFeedback {
    pub fn just_copied(&self) -> bool {
        self.copied
    }

    pub fn label(&self) -> &'static str {
        if self.copied {
            COPIED_LABEL
        } else {
            COPY_LABEL
        }
    }

    pub fn mark(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.copied = true;
        self.generation
    }

    /// Only the reset belonging to the latest copy clears the flag.
    pub fn reset(&mut self, generation: u64) -> bool {
        if self.generation != generation || !self.copied {
            return false;
        }
        self.copied = false;
        true
    }
}

/// Pending reset timers, one per side.
#[derive(Debug, Default)]
pub struct CopyTimers {
    handles: DashMap<Side, (u64, AbortHandle)>,
}

impl CopyTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `handle` as the pending reset for `side`, aborting the one it
    /// supersedes. A handle older than the tracked one is aborted instead.
    pub fn replace(&self, side: Side, generation: u64, handle: AbortHandle) {
        match self.handles.entry(side) {
            Entry::Occupied(mut entry) => {
                if entry.get().0 > generation {
                    handle.abort();
                    return;
                }
                let (_, previous) = entry.insert((generation, handle));
                previous.abort();
            }
            Entry::Vacant(entry) => {
                entry.insert((generation, handle));
            }
        }
    }

    /// Forget `side`'s timer once the reset for `generation` has run.
    pub fn finish(&self, side: Side, generation: u64) {
        self.handles.remove_if(&side, |_, (pending, _)| *pending == generation);
    }

    pub fn cancel_all(&self) {
        self.handles.retain(|_, (_, handle)| {
            handle.abort();
            false
        });
    }

    pub fn pending(&self) -> usize {
        self.handles.len()
    }
}
