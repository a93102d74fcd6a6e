//! Property-based tests for the rewards form
//!
//! Tests invariants:
//! - Switching payout method away and back yields default fields
//! - Leaving the custom trigger clears the custom event name
//! - Unparseable numeric input leaves fields unchanged

use proptest::prelude::*;

use crate::core::rewards::{
    Party, PayoutConfig, PayoutField, PayoutMethod, RewardsForm, TriggerKind,
};

fn arb_method() -> impl Strategy<Value = PayoutMethod> {
    proptest::sample::select(PayoutMethod::all())
}

fn arb_party() -> impl Strategy<Value = Party> {
    prop_oneof![Just(Party::Referrer), Just(Party::Referee)]
}

fn arb_field() -> impl Strategy<Value = PayoutField> {
    prop_oneof![
        Just(PayoutField::Amount),
        Just(PayoutField::Currency),
        Just(PayoutField::Limit),
        Just(PayoutField::DiscountPercent),
        Just(PayoutField::DiscountDuration),
        Just(PayoutField::DiscountLimit),
        Just(PayoutField::Description),
    ]
}

proptest! {
    /// Property: a round trip through another method resets every field
    #[test]
    fn prop_method_switch_is_destructive(
        party in arb_party(),
        method in arb_method(),
        other in arb_method(),
        edits in prop::collection::vec((arb_field(), "[0-9]{1,3}"), 0..6)
    ) {
        let mut form = RewardsForm::new();
        form.select_method(party, method);
        for (field, input) in &edits {
            form.set_payout_field(party, *field, input);
        }

        form.select_method(party, other);
        form.select_method(party, method);

        prop_assert_eq!(form.payout(party), &PayoutConfig::for_method(method));
    }

    /// Property: choosing a non-custom trigger drops the custom event name
    #[test]
    fn prop_non_custom_trigger_clears_event_name(
        name in "[a-z_]{1,24}",
        kind in prop_oneof![Just(TriggerKind::NewUser), Just(TriggerKind::Subscription)]
    ) {
        let mut form = RewardsForm::new();
        form.select_trigger(TriggerKind::Custom);
        prop_assert!(form.set_custom_event_name(&name));

        form.select_trigger(kind);
        form.select_trigger(TriggerKind::Custom);

        prop_assert_eq!(form.trigger.custom_event_name(), Some(""));
    }

    /// Property: input that does not parse as a number changes nothing
    #[test]
    fn prop_unparseable_numbers_are_ignored(
        method in prop_oneof![Just(PayoutMethod::Paypal), Just(PayoutMethod::Amazon)],
        input in "[a-z]{1,8}"
    ) {
        let mut config = PayoutConfig::for_method(method);
        prop_assert!(config.set_field(PayoutField::Amount, "25"));
        let before = config.clone();

        prop_assert!(!config.set_field(PayoutField::Amount, &input));
        prop_assert!(!config.set_field(PayoutField::Limit, &input));
        prop_assert_eq!(config, before);
    }
}
