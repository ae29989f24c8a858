//! Property-based invariant tests for the frame driver lifecycle.
//!
//! These tests verify structural invariants that must hold for **any**
//! host-driven operation sequence:
//!
//! 1. No sequence of resizes, impulses, ticks and teardowns panics.
//! 2. Output and background always match the grid size, op after op.
//! 3. A tick yields a frame exactly when the driver is ready on a
//!    non-empty grid.
//! 4. Resize fails only on negative dimensions or after teardown, and a
//!    failed resize changes nothing observable.
//! 5. Teardown is terminal.
//! 6. Boundary cells of both field generations stay zero throughout.
//! 7. Every rendered frame is fully opaque.
//! 8. A fixed operation sequence replays to identical frames.

use proptest::prelude::*;
use ripple_core::error::ConfigError;
use ripple_runtime::{DriverState, FrameDriver, RecordingScheduler};

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
enum Op {
    Resize { width: i32, height: i32 },
    Disturb { x: i32, y: i32 },
    DisturbCenter,
    Tick,
    Teardown,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-4i32..120, -4i32..120)
            .prop_map(|(width, height)| Op::Resize { width, height }),
        4 => (-30i32..80, -30i32..80).prop_map(|(x, y)| Op::Disturb { x, y }),
        1 => Just(Op::DisturbCenter),
        6 => Just(Op::Tick),
        1 => Just(Op::Teardown),
    ]
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(arb_op(), 0..24)
}

/// Applies one op, checking the step-local contract as it goes.
fn apply(driver: &mut FrameDriver<RecordingScheduler>, op: Op) -> Result<(), TestCaseError> {
    let state_before = driver.state();
    match op {
        Op::Resize { width, height } => {
            let result = driver.resize(width, height);
            if state_before == DriverState::TornDown {
                prop_assert_eq!(result, Err(ConfigError::TornDown));
            } else if width < 0 || height < 0 {
                prop_assert_eq!(result, Err(ConfigError::InvalidSurface { width, height }));
                prop_assert_eq!(driver.state(), state_before);
            } else {
                prop_assert_eq!(result, Ok(()));
                prop_assert_eq!(driver.state(), DriverState::Ready);
            }
        }
        Op::Disturb { x, y } => driver.disturb(x, y),
        Op::DisturbCenter => driver.disturb_center(),
        Op::Tick => {
            let expect_frame =
                state_before == DriverState::Ready && !driver.grid_size().is_empty();
            prop_assert_eq!(driver.tick().is_some(), expect_frame);
        }
        Op::Teardown => {
            driver.teardown();
            prop_assert_eq!(driver.state(), DriverState::TornDown);
        }
    }

    // Sizes stay in lockstep whatever just happened.
    let area = driver.grid_size().area();
    prop_assert_eq!(driver.output().data().len(), area * 4);
    prop_assert_eq!(driver.background().data().len(), area * 4);
    prop_assert_eq!(driver.field().current().len(), area);

    // Teardown is sticky.
    if state_before == DriverState::TornDown {
        prop_assert_eq!(driver.state(), DriverState::TornDown);
    }
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// 1-5. Arbitrary op sequences hold the lifecycle contract
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn op_sequences_hold_the_contract(ops in arb_ops()) {
        let mut driver = FrameDriver::new(RecordingScheduler::new());
        for op in ops {
            apply(&mut driver, op)?;
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Boundary cells of both generations stay zero
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn field_boundary_stays_zero(ops in arb_ops()) {
        let mut driver = FrameDriver::new(RecordingScheduler::new());
        for op in ops {
            apply(&mut driver, op)?;

            let size = driver.grid_size();
            if size.is_empty() {
                continue;
            }
            let field = driver.field();
            let (w, h) = (i32::from(size.width), i32::from(size.height));
            for x in 0..w {
                for y in [0, h - 1] {
                    let i = field.index(x, y).unwrap();
                    prop_assert_eq!(field.current()[i], 0);
                    prop_assert_eq!(field.previous()[i], 0);
                }
            }
            for y in 0..h {
                for x in [0, w - 1] {
                    let i = field.index(x, y).unwrap();
                    prop_assert_eq!(field.current()[i], 0);
                    prop_assert_eq!(field.previous()[i], 0);
                }
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Frames are fully opaque
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn frames_are_opaque(ops in arb_ops()) {
        let mut driver = FrameDriver::new(RecordingScheduler::new());
        for op in ops {
            apply(&mut driver, op)?;
        }
        for px in driver.output().data().chunks_exact(4) {
            prop_assert_eq!(px[3], 255);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Sequences replay deterministically
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn sequences_replay_identically(ops in arb_ops()) {
        let mut a = FrameDriver::new(RecordingScheduler::new());
        let mut b = FrameDriver::new(RecordingScheduler::new());
        for op in ops {
            apply(&mut a, op)?;
            apply(&mut b, op)?;
        }
        prop_assert_eq!(a.state(), b.state());
        prop_assert_eq!(a.output().data(), b.output().data());
        prop_assert_eq!(a.field().current(), b.field().current());
        prop_assert_eq!(a.field().previous(), b.field().previous());
    }
}
