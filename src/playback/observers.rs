//! Render-loop tick subscriptions.
//!
//! The hosting render loop owns one [`TickObservers`] registry and calls
//! [`dispatch`](TickObservers::dispatch) once per frame with the elapsed
//! seconds. Registration hands back an explicit [`TickKey`] the subscriber
//! owns; removal through that key is deterministic and idempotent, there is
//! no implicit global listener list.

use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Handle to one registered tick callback.
    pub struct TickKey;
}

type TickCallback = Box<dyn FnMut(f32)>;

/// Per-tick callback list owned by the hosting render loop.
#[derive(Default)]
pub struct TickObservers {
    callbacks: SlotMap<TickKey, TickCallback>,
}

impl TickObservers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback, returning the subscription handle.
    pub fn add(&mut self, callback: TickCallback) -> TickKey {
        self.callbacks.insert(callback)
    }

    /// Removes a subscription. Returns `false` if the key was already
    /// removed; removing twice is a no-op, not an error.
    pub fn remove(&mut self, key: TickKey) -> bool {
        self.callbacks.remove(key).is_some()
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Invokes every callback with the elapsed seconds for this tick.
    ///
    /// An undefined elapsed time (`None`, e.g. the render loop's very first
    /// frame) is a no-op; subscribers never observe it.
    pub fn dispatch(&mut self, elapsed: Option<f32>) {
        let Some(dt) = elapsed else {
            return;
        };
        for callback in self.callbacks.values_mut() {
            callback(dt);
        }
    }
}
