//! Offline baking orchestrator.
//!
//! Runs a full bake over one loaded asset inside an isolated simulation
//! context, and guarantees the asset and context are torn down whether the
//! bake succeeds or fails.

use log::{debug, warn};

use crate::baking::capture::{CaptureSettings, capture_clips};
use crate::errors::{Result, VatError};
use crate::host::{BakeAsset, SimulationContext};
use crate::vat::VatBuffer;

/// Bakes every clip of `asset` into one VAT buffer.
///
/// The context is stepped until it reports ready (a bounded polling loop with
/// a near-zero-delay yield, not a busy spin), the first mesh with an
/// associated skeleton is located, and the frame capture engine is run over
/// the asset's clips. `asset` and `ctx` are disposed before the result is
/// surfaced, on success and on failure alike. Baking is deterministic, so no
/// retry is attempted.
///
/// # Errors
///
/// - [`VatError::ContextNotReady`] if the ready wait exhausts its budget.
/// - [`VatError::MissingSkeleton`] if no mesh has a skeleton; reported before
///   any buffer allocation.
/// - Any capture failure from [`capture_clips`].
pub fn bake_asset<C, A>(mut ctx: C, mut asset: A, settings: &CaptureSettings) -> Result<VatBuffer>
where
    C: SimulationContext,
    A: BakeAsset,
{
    let result = run_bake(&mut ctx, &mut asset, settings);
    if let Err(err) = &result {
        warn!("bake failed, tearing down: {err}");
    }
    asset.dispose();
    ctx.dispose();
    result
}

fn run_bake<C, A>(ctx: &mut C, asset: &mut A, settings: &CaptureSettings) -> Result<VatBuffer>
where
    C: SimulationContext,
    A: BakeAsset,
{
    let mut steps = 0;
    while !ctx.is_ready() {
        if steps >= settings.ready_step_budget {
            return Err(VatError::ContextNotReady {
                budget: settings.ready_step_budget,
            });
        }
        ctx.step(false);
        std::thread::yield_now();
        steps += 1;
    }
    debug!("baking context ready after {steps} step(s)");

    let (clips, source) = asset.split();
    let Some(source) = source else {
        return Err(VatError::MissingSkeleton);
    };

    capture_clips(ctx, source, clips, settings)
}
