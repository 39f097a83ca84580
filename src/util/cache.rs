use std::sync::{Arc, Mutex};

/// The most recently touched leaf and the absolute byte range `[left, right)` it covers.
struct Window {
    left: usize,
    right: usize,
    chunk: Arc<[u8]>,
}

/// Single-slot cache in front of leaf lookups.
///
/// The slot is only ever taken with `try_lock`: a reader that loses the race
/// sees a miss, a writer that loses it skips the update. Nothing blocks and a
/// window is always published as a whole, so a rope can be read from several
/// threads at once.
#[derive(Default)]
pub(crate) struct AccessCache {
    slot: Mutex<Option<Window>>,
}

impl AccessCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn contains(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Returns the cached byte, or `None` when `index` is outside the window.
    pub fn get(&self, index: usize) -> Option<u8> {
        let slot = self.slot.try_lock().ok()?;
        let window = slot.as_ref()?;
        if (window.left..window.right).contains(&index) {
            Some(window.chunk[index - window.left])
        } else {
            None
        }
    }

    /// Records that `global_index` was found at `offset` inside `chunk`.
    pub fn update(&self, chunk: &Arc<[u8]>, global_index: usize, offset: usize) {
        if let Ok(mut slot) = self.slot.try_lock() {
            let left = global_index - offset;
            *slot = Some(Window {
                left,
                right: left + chunk.len(),
                chunk: chunk.clone(),
            });
        }
    }
}
