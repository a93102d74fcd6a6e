//! Property-based tests for the journey builder
//!
//! Tests invariants:
//! - Saving a new communication appends it last with a fresh, unique id
//! - Locked triggers survive any sequence of delete calls

use std::collections::HashSet;

use proptest::prelude::*;

use crate::core::journey::{JourneyBuilder, JourneyKind};
use crate::tests::common::{create_referrer_journey, create_test_email};

fn arb_kind() -> impl Strategy<Value = JourneyKind> {
    prop_oneof![Just(JourneyKind::Referrer), Just(JourneyKind::Referee)]
}

proptest! {
    /// Property: every saved new communication is appended with a fresh id
    #[test]
    fn prop_new_communications_append_with_fresh_ids(
        titles in prop::collection::vec("[A-Za-z ]{1,20}", 1..8)
    ) {
        let mut journey = create_referrer_journey();
        let trigger_id = "2";
        let before = journey.trigger(trigger_id).unwrap().communications.len();

        for title in &titles {
            prop_assert!(journey.add_communication(trigger_id));
            *journey.communication_draft_mut().unwrap() = create_test_email(title);
            prop_assert_eq!(journey.save_communication(), Ok(true));

            let last = journey.trigger(trigger_id).unwrap().communications.last().unwrap();
            prop_assert_eq!(&last.title, title);
            prop_assert!(!last.id.is_empty());
        }

        let comms = &journey.trigger(trigger_id).unwrap().communications;
        prop_assert_eq!(comms.len(), before + titles.len());
        let ids: HashSet<_> = comms.iter().map(|c| c.id.as_str()).collect();
        prop_assert_eq!(ids.len(), comms.len());
    }

    /// Property: locked triggers are never removed, whatever gets deleted
    #[test]
    fn prop_locked_triggers_survive_deletes(
        kind in arb_kind(),
        added in 0usize..4,
        deletes in prop::collection::vec(0usize..8, 0..10)
    ) {
        let mut journey = JourneyBuilder::new(kind);
        for _ in 0..added {
            journey.add_trigger();
            journey.save_trigger();
        }
        let locked: Vec<String> = journey
            .triggers()
            .iter()
            .filter(|t| t.locked)
            .map(|t| t.id.clone())
            .collect();

        for idx in deletes {
            let Some(id) = journey.triggers().get(idx).map(|t| t.id.clone()) else {
                continue;
            };
            let was_locked = locked.contains(&id);
            prop_assert_eq!(journey.delete_trigger(&id), !was_locked);
        }

        for id in &locked {
            prop_assert!(journey.trigger(id).is_some());
        }
    }
}
