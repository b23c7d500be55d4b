//! Baking Pipeline Tests
//!
//! Tests for:
//! - Frame capture engine: length property, ordering, determinism,
//!   single-frame clips, empty clip lists, settle budget, pose validation
//! - Offline orchestrator: ready wait, missing skeleton precondition,
//!   teardown on success and on failure
//! - `create_vat` clip arm
//!
//! The host engine is replaced by small scripted mocks sharing one
//! [`SimState`]: stepping the context counts down a pending frame advance,
//! exactly like a real simulation applying a clip frame asynchronously.

use std::cell::Cell;
use std::rc::Rc;

use vatbake::{
    BakeAsset, BakeClip, BoneMatrixSource, CaptureSettings, ClipHandle, SimulationContext,
    VatError, VatSource, bake_asset, capture_clips, create_vat,
};
use vatbake::playback::TickObservers;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// Scripted host mocks
// ============================================================================

/// State shared between the mock context, clip handles and skeleton.
#[derive(Default)]
struct SimState {
    steps: Cell<u64>,
    /// Frame currently applied to the skeleton pose.
    posed_frame: Cell<f32>,
    /// A requested frame advance and the steps it still needs.
    pending: Cell<Option<(f32, u32)>>,
}

struct MockContext {
    sim: Rc<SimState>,
    ready_after: u64,
    disposed: Rc<Cell<bool>>,
}

impl MockContext {
    fn new(sim: Rc<SimState>) -> Self {
        Self {
            sim,
            ready_after: 0,
            disposed: Rc::new(Cell::new(false)),
        }
    }
}

impl SimulationContext for MockContext {
    fn step(&mut self, render_side_effects: bool) {
        assert!(!render_side_effects, "baking must skip render side effects");
        self.sim.steps.set(self.sim.steps.get() + 1);
        if let Some((frame, remaining)) = self.sim.pending.get() {
            if remaining <= 1 {
                self.sim.posed_frame.set(frame);
                self.sim.pending.set(None);
            } else {
                self.sim.pending.set(Some((frame, remaining - 1)));
            }
        }
    }

    fn is_ready(&self) -> bool {
        self.sim.steps.get() >= self.ready_after
    }

    fn dispose(&mut self) {
        self.disposed.set(true);
    }
}

/// Clip handle whose frame advances settle after `latency` context steps.
struct MockHandle {
    sim: Rc<SimState>,
    latency: u32,
    started: bool,
}

impl MockHandle {
    fn new(sim: &Rc<SimState>, latency: u32) -> Box<Self> {
        Box::new(Self {
            sim: Rc::clone(sim),
            latency,
            started: false,
        })
    }
}

impl ClipHandle for MockHandle {
    fn reset(&mut self) {
        self.started = false;
        self.sim.pending.set(None);
    }

    fn start(&mut self, looping: bool, speed: f32, from: f32, to: f32, stop_at_end: bool) {
        assert!(!looping && !stop_at_end, "capture plays single frames");
        assert!((speed - 1.0).abs() < f32::EPSILON);
        assert!((from - to).abs() < f32::EPSILON, "start and target frame differ");
        self.sim.pending.set(Some((from, self.latency.max(1))));
        self.started = true;
    }

    fn stop(&mut self) {
        self.started = false;
    }

    fn is_settled(&self) -> bool {
        self.started && self.sim.pending.get().is_none()
    }
}

/// Skeleton whose pose is a pure function of the currently applied frame:
/// float `k` of the pose for frame `f` is `f * 1000 + k`.
struct MockSkeleton {
    sim: Rc<SimState>,
    bone_count: usize,
    pose: Vec<f32>,
}

impl MockSkeleton {
    fn new(sim: &Rc<SimState>, bone_count: usize) -> Self {
        Self {
            sim: Rc::clone(sim),
            bone_count,
            pose: vec![0.0; (bone_count + 1) * 16],
        }
    }
}

impl BoneMatrixSource for MockSkeleton {
    fn bone_count(&self) -> usize {
        self.bone_count
    }

    fn refresh(&mut self) {
        let frame = self.sim.posed_frame.get();
        for (k, v) in self.pose.iter_mut().enumerate() {
            *v = frame * 1000.0 + k as f32;
        }
    }

    fn transform_matrices(&mut self) -> &[f32] {
        self.refresh();
        &self.pose
    }
}

/// Skeleton returning a pose of the wrong length.
struct ShortPoseSkeleton {
    pose: Vec<f32>,
}

impl BoneMatrixSource for ShortPoseSkeleton {
    fn bone_count(&self) -> usize {
        2
    }
    fn refresh(&mut self) {}
    fn transform_matrices(&mut self) -> &[f32] {
        &self.pose
    }
}

struct MockAsset {
    clips: Vec<BakeClip>,
    skeleton: Option<MockSkeleton>,
    disposed: Rc<Cell<bool>>,
}

impl BakeAsset for MockAsset {
    fn split(&mut self) -> (&mut [BakeClip], Option<&mut dyn BoneMatrixSource>) {
        (
            &mut self.clips,
            self.skeleton
                .as_mut()
                .map(|s| s as &mut dyn BoneMatrixSource),
        )
    }

    fn dispose(&mut self) {
        self.disposed.set(true);
    }
}

fn clip(sim: &Rc<SimState>, name: &str, from: u32, to: u32, latency: u32) -> BakeClip {
    BakeClip::new(name, from, to, MockHandle::new(sim, latency)).unwrap()
}

fn expected_pose_value(frame: u32, k: usize) -> f32 {
    frame as f32 * 1000.0 + k as f32
}

// ============================================================================
// Frame capture engine
// ============================================================================

#[test]
fn capture_buffer_length_property() {
    init_logs();
    // B = 2 bones, clips summing to F = 3 + 1 = 4 frames:
    // length = (2 + 1) * 16 * 4
    let sim = Rc::new(SimState::default());
    let mut ctx = MockContext::new(Rc::clone(&sim));
    let mut skeleton = MockSkeleton::new(&sim, 2);
    let mut clips = vec![clip(&sim, "walk", 0, 2, 1), clip(&sim, "idle", 4, 4, 1)];

    let buffer =
        capture_clips(&mut ctx, &mut skeleton, &mut clips, &CaptureSettings::default()).unwrap();

    assert_eq!(buffer.shape().bone_count, 2);
    assert_eq!(buffer.shape().frame_count, 4);
    assert_eq!(buffer.data().len(), 192);
}

#[test]
fn capture_frames_in_clip_then_frame_order() {
    let sim = Rc::new(SimState::default());
    let mut ctx = MockContext::new(Rc::clone(&sim));
    let mut skeleton = MockSkeleton::new(&sim, 1);
    // Clip order differs from frame-index order on purpose.
    let mut clips = vec![clip(&sim, "second-half", 10, 11, 2), clip(&sim, "intro", 0, 1, 1)];

    let buffer =
        capture_clips(&mut ctx, &mut skeleton, &mut clips, &CaptureSettings::default()).unwrap();

    // Global frames 0..4 hold source frames 10, 11, 0, 1.
    for (global, source_frame) in [(0, 10), (1, 11), (2, 0), (3, 1)] {
        let slice = buffer.frame_slice(global);
        for (k, &v) in slice.iter().enumerate() {
            assert_eq!(
                v,
                expected_pose_value(source_frame, k),
                "global frame {global}, float {k}"
            );
        }
    }
}

#[test]
fn capture_is_deterministic_across_runs() {
    let run = || {
        let sim = Rc::new(SimState::default());
        let mut ctx = MockContext::new(Rc::clone(&sim));
        let mut skeleton = MockSkeleton::new(&sim, 3);
        let mut clips = vec![clip(&sim, "walk", 2, 6, 3), clip(&sim, "run", 0, 3, 1)];
        capture_clips(&mut ctx, &mut skeleton, &mut clips, &CaptureSettings::default()).unwrap()
    };

    let first = run();
    let second = run();
    let a: Vec<u32> = first.data().iter().map(|v| v.to_bits()).collect();
    let b: Vec<u32> = second.data().iter().map(|v| v.to_bits()).collect();
    assert_eq!(a, b, "re-running the bake must be bit-identical");
}

#[test]
fn capture_single_frame_clip() {
    let sim = Rc::new(SimState::default());
    let mut ctx = MockContext::new(Rc::clone(&sim));
    let mut skeleton = MockSkeleton::new(&sim, 2);
    let mut clips = vec![clip(&sim, "pose", 7, 7, 1)];

    let buffer =
        capture_clips(&mut ctx, &mut skeleton, &mut clips, &CaptureSettings::default()).unwrap();

    assert_eq!(buffer.shape().frame_count, 1);
    assert_eq!(buffer.frame_slice(0)[0], expected_pose_value(7, 0));
}

#[test]
fn capture_empty_clip_list_yields_empty_buffer() {
    let sim = Rc::new(SimState::default());
    let mut ctx = MockContext::new(Rc::clone(&sim));
    let mut skeleton = MockSkeleton::new(&sim, 5);

    let buffer =
        capture_clips(&mut ctx, &mut skeleton, &mut [], &CaptureSettings::default()).unwrap();

    assert_eq!(buffer.shape().frame_count, 0);
    assert!(buffer.data().is_empty());
}

#[test]
fn capture_exhausts_settle_budget() {
    let sim = Rc::new(SimState::default());
    let mut ctx = MockContext::new(Rc::clone(&sim));
    let mut skeleton = MockSkeleton::new(&sim, 1);
    // Settles after 10 steps, but the budget is 4.
    let mut clips = vec![clip(&sim, "slow", 0, 0, 10)];
    let settings = CaptureSettings {
        settle_step_budget: 4,
        ..CaptureSettings::default()
    };

    match capture_clips(&mut ctx, &mut skeleton, &mut clips, &settings).unwrap_err() {
        VatError::FrameNeverSettled { clip, frame, budget } => {
            assert_eq!(clip, "slow");
            assert_eq!(frame, 0);
            assert_eq!(budget, 4);
        }
        other => panic!("expected FrameNeverSettled, got {other:?}"),
    }
}

#[test]
fn capture_rejects_wrong_pose_size() {
    let sim = Rc::new(SimState::default());
    let mut ctx = MockContext::new(Rc::clone(&sim));
    // Claims 2 bones (stride 48) but returns 16 floats.
    let mut skeleton = ShortPoseSkeleton { pose: vec![0.0; 16] };
    let mut clips = vec![clip(&sim, "walk", 0, 0, 1)];

    match capture_clips(&mut ctx, &mut skeleton, &mut clips, &CaptureSettings::default())
        .unwrap_err()
    {
        VatError::PoseSizeMismatch { expected, actual } => {
            assert_eq!(expected, 48);
            assert_eq!(actual, 16);
        }
        other => panic!("expected PoseSizeMismatch, got {other:?}"),
    }
}

// ============================================================================
// Offline orchestrator
// ============================================================================

#[test]
fn bake_asset_waits_for_ready_and_tears_down() {
    init_logs();
    let sim = Rc::new(SimState::default());
    let mut ctx = MockContext::new(Rc::clone(&sim));
    ctx.ready_after = 25;
    let ctx_disposed = Rc::clone(&ctx.disposed);

    let asset_disposed = Rc::new(Cell::new(false));
    let asset = MockAsset {
        clips: vec![clip(&sim, "walk", 0, 2, 1)],
        skeleton: Some(MockSkeleton::new(&sim, 2)),
        disposed: Rc::clone(&asset_disposed),
    };

    let buffer = bake_asset(ctx, asset, &CaptureSettings::default()).unwrap();
    assert_eq!(buffer.shape().frame_count, 3);
    assert!(ctx_disposed.get(), "context must be disposed on success");
    assert!(asset_disposed.get(), "asset must be disposed on success");
}

#[test]
fn bake_asset_missing_skeleton_is_fatal_and_still_disposes() {
    let sim = Rc::new(SimState::default());
    let ctx = MockContext::new(Rc::clone(&sim));
    let ctx_disposed = Rc::clone(&ctx.disposed);

    let asset_disposed = Rc::new(Cell::new(false));
    let asset = MockAsset {
        clips: vec![clip(&sim, "walk", 0, 2, 1)],
        skeleton: None,
        disposed: Rc::clone(&asset_disposed),
    };

    let err = bake_asset(ctx, asset, &CaptureSettings::default()).unwrap_err();
    assert!(matches!(err, VatError::MissingSkeleton));
    assert!(ctx_disposed.get(), "context must be disposed on failure");
    assert!(asset_disposed.get(), "asset must be disposed on failure");
}

#[test]
fn bake_asset_ready_budget_exhausted() {
    let sim = Rc::new(SimState::default());
    let mut ctx = MockContext::new(Rc::clone(&sim));
    ctx.ready_after = u64::MAX;
    let ctx_disposed = Rc::clone(&ctx.disposed);

    let asset = MockAsset {
        clips: Vec::new(),
        skeleton: Some(MockSkeleton::new(&sim, 1)),
        disposed: Rc::new(Cell::new(false)),
    };
    let settings = CaptureSettings {
        ready_step_budget: 8,
        ..CaptureSettings::default()
    };

    let err = bake_asset(ctx, asset, &settings).unwrap_err();
    assert!(matches!(err, VatError::ContextNotReady { budget: 8 }));
    assert!(ctx_disposed.get());
}

#[test]
fn bake_asset_capture_failure_still_disposes() {
    let sim = Rc::new(SimState::default());
    let ctx = MockContext::new(Rc::clone(&sim));
    let ctx_disposed = Rc::clone(&ctx.disposed);

    let asset_disposed = Rc::new(Cell::new(false));
    let asset = MockAsset {
        clips: vec![clip(&sim, "slow", 0, 0, 1000)],
        skeleton: Some(MockSkeleton::new(&sim, 1)),
        disposed: Rc::clone(&asset_disposed),
    };
    let settings = CaptureSettings {
        settle_step_budget: 3,
        ..CaptureSettings::default()
    };

    let err = bake_asset(ctx, asset, &settings).unwrap_err();
    assert!(matches!(err, VatError::FrameNeverSettled { .. }));
    assert!(ctx_disposed.get());
    assert!(asset_disposed.get());
}

// ============================================================================
// create_vat: clips arm
// ============================================================================

#[test]
fn create_vat_from_clips_bakes_a_texture() {
    let sim = Rc::new(SimState::default());
    let mut ctx = MockContext::new(Rc::clone(&sim));
    let mut skeleton = MockSkeleton::new(&sim, 2);
    let clips = vec![clip(&sim, "walk", 0, 2, 1)];
    let mut observers = TickObservers::new();

    let manager = create_vat(
        VatSource::Clips(clips),
        &mut ctx,
        Some(&mut skeleton),
        &mut observers,
        &CaptureSettings::default(),
    )
    .unwrap();

    let texture = manager.texture().unwrap();
    assert_eq!(texture.width(), 12);
    assert_eq!(texture.height(), 3);
    assert_eq!(observers.len(), 1);
}

#[test]
fn create_vat_from_clips_requires_skeleton() {
    let sim = Rc::new(SimState::default());
    let mut ctx = MockContext::new(Rc::clone(&sim));
    let clips = vec![clip(&sim, "walk", 0, 2, 1)];
    let mut observers = TickObservers::new();

    let err = create_vat(
        VatSource::Clips(clips),
        &mut ctx,
        None,
        &mut observers,
        &CaptureSettings::default(),
    )
    .unwrap_err();

    assert!(matches!(err, VatError::MissingSkeleton));
    assert!(observers.is_empty(), "no subscription on failure");
}
