//! Texture-owning playback manager.

use std::cell::Cell;
use std::rc::Rc;

use uuid::Uuid;

use crate::playback::observers::{TickKey, TickObservers};
use crate::vat::VatTexture;

/// Accepts only meaningful tick deltas: zero, negative and non-finite
/// elapsed times leave the accumulator untouched.
fn valid_delta(dt: f32) -> bool {
    dt.is_finite() && dt > 0.0
}

/// Owns one baked VAT texture and the global playback clock the renderer
/// samples it with.
///
/// Creation registers a tick callback with the hosting render loop's
/// [`TickObservers`]; the callback accumulates elapsed seconds into a
/// monotonically increasing `time`. The renderer reads
/// [`time`](VatManager::time) and [`texture`](VatManager::texture) each frame
/// together with the per-instance encodings to select which frames of which
/// clip each instance displays.
///
/// [`dispose`](VatManager::dispose) unregisters the subscription exactly once
/// and optionally releases the texture; repeated disposal is a no-op.
#[derive(Debug)]
pub struct VatManager {
    /// Stable identity, for resource tracking in the host renderer.
    pub id: Uuid,
    texture: Option<VatTexture>,
    time: Rc<Cell<f32>>,
    subscription: Option<TickKey>,
}

impl VatManager {
    /// Binds a manager to `texture` and subscribes it to the render loop.
    pub fn new(texture: VatTexture, observers: &mut TickObservers) -> Self {
        let time = Rc::new(Cell::new(0.0));
        let shared = Rc::clone(&time);
        let subscription = observers.add(Box::new(move |dt| {
            if valid_delta(dt) {
                shared.set(shared.get() + dt);
            }
        }));

        Self {
            id: Uuid::new_v4(),
            texture: Some(texture),
            time,
            subscription: Some(subscription),
        }
    }

    /// Current playback time in seconds.
    #[inline]
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time.get()
    }

    /// Advances the clock directly, for hosts that drive the manager without
    /// a [`TickObservers`] registry. Safe to call unconditionally every tick:
    /// `None`, zero, negative and non-finite elapsed values are no-ops.
    pub fn advance(&self, elapsed: Option<f32>) {
        if let Some(dt) = elapsed {
            if valid_delta(dt) {
                self.time.set(self.time.get() + dt);
            }
        }
    }

    /// The owned texture, if not released by disposal.
    #[inline]
    #[must_use]
    pub fn texture(&self) -> Option<&VatTexture> {
        self.texture.as_ref()
    }

    /// Replaces the owned texture.
    pub fn set_texture(&mut self, texture: VatTexture) {
        self.texture = Some(texture);
    }

    /// Whether [`dispose`](VatManager::dispose) has already run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.subscription.is_none()
    }

    /// Unregisters the tick subscription and, if `dispose_texture`, releases
    /// the owned texture. Idempotent: a second call does nothing and never
    /// double-releases.
    pub fn dispose(&mut self, observers: &mut TickObservers, dispose_texture: bool) {
        if let Some(key) = self.subscription.take() {
            observers.remove(key);
            if dispose_texture {
                self.texture = None;
            }
        }
    }
}
