//! Property-based tests for step navigation
//!
//! Tests invariants:
//! - Exactly one step is current after any move sequence
//! - A step is completed iff its index is below the current index
//! - Unknown step names leave the navigator in place

use proptest::prelude::*;

use crate::core::campaign::wizard::{StepId, StepNavigator, StepStatus, WizardError};
use crate::tests::common::step_defs;

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

/// Any non-empty ordering of distinct steps
fn arb_step_order() -> impl Strategy<Value = Vec<StepId>> {
    proptest::sample::subsequence(StepId::ALL.to_vec(), 1..=StepId::ALL.len()).prop_shuffle()
}

#[derive(Debug, Clone)]
enum Move {
    Advance,
    Back,
    GoTo(StepId),
}

fn arb_move() -> impl Strategy<Value = Move> {
    prop_oneof![
        Just(Move::Advance),
        Just(Move::Back),
        proptest::sample::select(StepId::ALL.to_vec()).prop_map(Move::GoTo),
    ]
}

fn apply(nav: &mut StepNavigator, step: &Move) {
    let _ = match step {
        Move::Advance => nav.advance().map(|_| ()),
        Move::Back => nav.go_back().map(|_| ()),
        Move::GoTo(id) => nav.go_to(id.as_str()).map(|_| ()),
    };
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: statuses follow the current index for any ordering and moves
    #[test]
    fn prop_statuses_follow_current_index(
        order in arb_step_order(),
        moves in prop::collection::vec(arb_move(), 0..30)
    ) {
        let mut nav = StepNavigator::start(step_defs(&order)).unwrap();
        for step in &moves {
            apply(&mut nav, step);

            let current = nav.current_index();
            prop_assert!(current < nav.len());
            let statuses = nav.statuses();
            prop_assert_eq!(
                statuses.iter().filter(|(_, s)| *s == StepStatus::Current).count(),
                1
            );
            for (i, (_, status)) in statuses.iter().enumerate() {
                prop_assert_eq!(nav.is_completed(i), i < current);
                prop_assert_eq!(*status == StepStatus::Completed, i < current);
            }
        }
    }

    /// Property: moves never skip forward past the next step
    #[test]
    fn prop_forward_moves_advance_at_most_one(
        order in arb_step_order(),
        moves in prop::collection::vec(arb_move(), 1..30)
    ) {
        let mut nav = StepNavigator::start(step_defs(&order)).unwrap();
        for step in &moves {
            let before = nav.current_index();
            apply(&mut nav, step);
            prop_assert!(nav.current_index() <= before + 1);
        }
    }

    /// Property: an unknown step name is rejected and changes nothing
    #[test]
    fn prop_unknown_step_keeps_position(
        order in arb_step_order(),
        advances in 0usize..6,
        name in "[a-z]{3,12}"
    ) {
        prop_assume!(StepId::try_from(name.as_str()).is_err());

        let mut nav = StepNavigator::start(step_defs(&order)).unwrap();
        for _ in 0..advances {
            let _ = nav.advance();
        }
        let before = nav.current_index();

        prop_assert_eq!(
            nav.go_to(&name).map(|s| s.id),
            Err(WizardError::UnknownStep(name.clone()))
        );
        prop_assert_eq!(nav.current_index(), before);
    }
}
