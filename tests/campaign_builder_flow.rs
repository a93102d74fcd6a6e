//! End-to-end flow through the campaign builder.
//!
//! Drives a builder session the way the terminal front end does: create a
//! campaign, fill every step, rename it, then publish from the summary.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test campaign_builder_flow -- --nocapture
//! ```

use std::sync::Arc;
use std::time::Duration;

use rstest::rstest;
use tempfile::TempDir;

use referral_builder::core::appearance::{FileHandoff, HandoffStore, SELECTED_TEMPLATE_KEY};
use referral_builder::core::campaign::wizard::{StepId, StepPreset};
use referral_builder::core::campaign::{
    CampaignLayout, CampaignListStore, CampaignNameStore, CampaignStatus,
};
use referral_builder::core::journey::Communication;
use referral_builder::core::publish::{Environment, Publisher, SimulatedBackend};
use referral_builder::core::rewards::{Party, PayoutField, PayoutMethod, TriggerKind};

struct Session {
    _dir: TempDir,
    names: Arc<CampaignNameStore>,
    campaigns: CampaignListStore,
    handoff: Arc<FileHandoff>,
    layout: CampaignLayout,
}

fn session(preset: StepPreset) -> Session {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let names = Arc::new(CampaignNameStore::new());
    let campaigns = CampaignListStore::new(Arc::clone(&names));
    campaigns.create_default();
    let handoff = Arc::new(FileHandoff::in_dir(dir.path()));
    let layout = CampaignLayout::new(
        preset.steps(),
        Arc::clone(&names),
        Arc::clone(&handoff) as Arc<dyn HandoffStore>,
    )
    .expect("Failed to create builder session");
    Session {
        _dir: dir,
        names,
        campaigns,
        handoff,
        layout,
    }
}

#[rstest]
#[case(StepPreset::Journeys, 5)]
#[case(StepPreset::Communications, 4)]
fn test_walk_every_step(#[case] preset: StepPreset, #[case] steps: usize) {
    let mut s = session(preset);
    assert_eq!(s.layout.navigator().len(), steps);

    let mut visited = vec![s.layout.current_step()];
    while let Ok(step) = s.layout.advance() {
        visited.push(step);
    }
    assert_eq!(visited, preset.step_ids());
    assert_eq!(s.layout.current_step(), StepId::Summary);

    let summary = s.layout.summary();
    assert_eq!(summary.sections.len(), steps - 1);
}

#[tokio::test(start_paused = true)]
async fn test_build_and_publish_campaign() {
    let mut s = session(StepPreset::Journeys);

    // Rewards
    let rewards = &mut s.layout.forms_mut().rewards;
    rewards.select_trigger(TriggerKind::Custom);
    rewards.set_custom_event_name("first_purchase");
    rewards.select_method(Party::Referrer, PayoutMethod::Amazon);
    assert!(rewards.set_payout_field(Party::Referrer, PayoutField::Amount, "20"));
    assert!(rewards.set_payout_field(Party::Referrer, PayoutField::Limit, "200"));
    assert!(!rewards.set_payout_field(Party::Referrer, PayoutField::Amount, "lots"));
    s.layout.advance().unwrap();

    // How it looks
    assert!(s.layout.forms_mut().appearance.select("wallet"));
    assert!(s.layout.use_selected_template().unwrap());
    assert_eq!(
        s.handoff.read(SELECTED_TEMPLATE_KEY).unwrap().as_deref(),
        Some("wallet")
    );
    let customize = s.layout.forms_mut().customize.as_mut().unwrap();
    assert!(customize.toggle("buttons"));
    assert!(customize.select("share-button"));
    s.layout.advance().unwrap();

    // Referrer journey: one extra email on the editable trigger
    let referrer = &mut s.layout.forms_mut().referrer;
    let seeded_messages = referrer.communication_count();
    assert!(referrer.add_communication("2"));
    *referrer.communication_draft_mut().unwrap() =
        Communication::email("", "Welcome", "", "You're in", "Thanks for joining");
    assert_eq!(referrer.save_communication(), Ok(true));
    assert!(!referrer.delete_trigger("1"));
    assert_eq!(referrer.communication_count(), seeded_messages + 1);
    s.layout.advance().unwrap();

    // Referee journey is all built-in
    let referee = &mut s.layout.forms_mut().referee;
    let first = referee.triggers()[0].id.clone();
    assert!(!referee.edit_trigger(&first));
    s.layout.advance().unwrap();

    // Rename from the header
    s.layout.open_name_editor();
    *s.layout.name_draft_mut().unwrap() = "  Spring referrals ".to_string();
    assert!(s.layout.save_name());
    assert_eq!(s.names.get(), "Spring referrals");

    // Summary
    assert_eq!(s.layout.current_step(), StepId::Summary);
    let summary = s.layout.summary();
    assert_eq!(summary.campaign_name, "Spring referrals");
    let rewards = summary.section(StepId::Rewards).unwrap();
    assert!(rewards.items[0].value.contains("first_purchase"));
    assert!(rewards.items[1].value.contains("20 USD"));
    let looks = summary.section(StepId::HowItLooks).unwrap();
    assert_eq!(looks.items[1].value, "Share Code Button");
    let journey = summary.section(StepId::ReferrerJourney).unwrap();
    assert_eq!(
        journey.items[1].value,
        format!("{} messages", seeded_messages + 1)
    );

    // Publish to both environments
    let publisher = Publisher::new(SimulatedBackend::new(Duration::from_millis(1500)));
    let envs = [Environment::Staging, Environment::Production];
    let report = publisher
        .publish(&s.layout.campaign_name(), &envs)
        .await
        .unwrap();

    assert_eq!(report.campaign, "Spring referrals");
    assert_eq!(report.environments, envs.to_vec());
    assert!(report.elapsed < Duration::from_millis(3000));
    assert!(publisher.is_published(Environment::Staging));
    assert!(publisher.is_published(Environment::Production));
    assert!(!publisher.any_in_flight());

    // Publishing leaves the campaign list alone
    let listed = s.campaigns.list();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, CampaignStatus::Draft);
}

#[test]
fn test_navigation_rules() {
    let mut s = session(StepPreset::Journeys);

    assert!(s.layout.go_to("summary").is_err());
    assert!(s.layout.go_to("launch").is_err());
    assert_eq!(s.layout.current_step(), StepId::Rewards);

    assert_eq!(s.layout.go_to("/campaign-builder/how-it-looks"), Ok(StepId::HowItLooks));
    s.layout.advance().unwrap();
    assert_eq!(s.layout.go_to("rewards"), Ok(StepId::Rewards));
    assert!(s.layout.back().is_err());
}
