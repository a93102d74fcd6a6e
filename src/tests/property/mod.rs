//! Property-based tests for the campaign builder
//!
//! These use the proptest framework to check invariants over generated step
//! orderings, edit sequences and form input.
//!
//! ## Test Modules
//!
//! - `navigation_props`: step statuses for any ordering and move sequence
//!   - Exactly one step is current
//!   - Completed iff before the current index
//!   - Unknown step names leave the position unchanged
//!
//! - `journey_props`: trigger and communication editing
//!   - Saving a new communication appends it with a fresh id
//!   - Locked triggers survive any delete sequence
//!
//! - `rewards_props`: rewards form input
//!   - Payout method switches reset method fields
//!   - Leaving the custom trigger clears its event name
//!   - Unparseable numeric input is ignored
//!
//! - `store_props`: campaign list store
//!   - Added campaigns are appended as drafts with zero referrals
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable.

mod journey_props;
mod navigation_props;
mod rewards_props;
mod store_props;
