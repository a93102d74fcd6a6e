//! Property-based tests for the campaign list store
//!
//! Tests invariants:
//! - Added campaigns are appended last as drafts with zero referrals
//! - The name store tracks the most recently added campaign

use proptest::prelude::*;

use crate::core::campaign::CampaignStatus;
use crate::tests::common::create_test_stores;

proptest! {
    /// Property: add appends a draft with zero referrals and updates the name
    #[test]
    fn prop_add_appends_draft(
        names in prop::collection::vec("[A-Za-z0-9 #]{1,30}", 1..10)
    ) {
        let (name_store, list) = create_test_stores();
        for (i, name) in names.iter().enumerate() {
            let created = list.add(name.clone());
            let all = list.list();

            prop_assert_eq!(all.len(), i + 1);
            let last = all.last().unwrap();
            prop_assert_eq!(last, &created);
            prop_assert_eq!(&last.name, name);
            prop_assert_eq!(last.status, CampaignStatus::Draft);
            prop_assert_eq!(last.referrals, 0);
            prop_assert_eq!(name_store.get(), name.clone());
        }
    }

    /// Property: generated default names count up from one
    #[test]
    fn prop_default_names_count_up(count in 1usize..12) {
        let (_, list) = create_test_stores();
        for n in 1..=count {
            let campaign = list.create_default();
            prop_assert_eq!(campaign.name, format!("Campaign #{n}"));
        }
    }
}
