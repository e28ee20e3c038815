//! Property tests for frame navigation.

use comic_viewer::{FrameNavigator, ViewModeRegistry};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Step {
    Next,
    Previous,
    Advance { wrap: bool },
    Reset,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Next),
        Just(Step::Previous),
        any::<bool>().prop_map(|wrap| Step::Advance { wrap }),
        Just(Step::Reset),
    ]
}

proptest! {
    #[test]
    fn current_frame_stays_in_range(
        frame_count in 0u32..40,
        steps in prop::collection::vec(step(), 0..200),
    ) {
        let mut nav = FrameNavigator::new(frame_count);
        let upper = frame_count.max(1);
        for step in steps {
            let frame = match step {
                Step::Next => nav.next(),
                Step::Previous => nav.previous(),
                Step::Advance { wrap } => nav.advance(wrap),
                Step::Reset => nav.reset(),
            };
            prop_assert_eq!(frame, nav.current());
            prop_assert!((1..=upper).contains(&frame));
        }
    }

    #[test]
    fn wrapping_advance_cycles(frame_count in 1u32..30, rounds in 1u32..4) {
        let mut nav = FrameNavigator::new(frame_count);
        for _ in 0..frame_count * rounds {
            nav.advance(true);
        }
        prop_assert_eq!(nav.current(), 1);
    }

    #[test]
    fn any_mode_id_resolves(mode_id in "\\PC{0,16}") {
        let policy = ViewModeRegistry::resolve(&mode_id);
        prop_assert!(!(policy.allows_manual_navigation && policy.auto_advance_enabled));
    }
}
