//! Rewards Configuration Step
//!
//! Captures the event that triggers rewards and one payout configuration per
//! party (referrer, referee). Payout fields depend on the selected method, so
//! [`PayoutConfig`] carries them in the method's own variant: switching
//! methods replaces the variant and discards whatever was entered before.

use serde::{Deserialize, Serialize};

use crate::core::campaign::wizard::StepStatus;

// ============================================================================
// Reward Trigger
// ============================================================================

/// Trigger choice as presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerKind {
    NewUser,
    Subscription,
    Custom,
}

impl TriggerKind {
    pub fn label(&self) -> &'static str {
        match self {
            TriggerKind::NewUser => "New User Sign Up",
            TriggerKind::Subscription => "Subscription Sign Up",
            TriggerKind::Custom => "Custom Event",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TriggerKind::NewUser => "Reward is triggered when an invited user creates an account",
            TriggerKind::Subscription => {
                "Reward is triggered when an invited user subscribes to a paid plan"
            }
            TriggerKind::Custom => "Specify a custom event that will trigger the reward",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![TriggerKind::NewUser, TriggerKind::Subscription, TriggerKind::Custom]
    }
}

/// Event that triggers rewards for both parties
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RewardTrigger {
    #[default]
    NewUser,
    Subscription,
    Custom { event_name: String },
}

impl RewardTrigger {
    pub fn kind(&self) -> TriggerKind {
        match self {
            RewardTrigger::NewUser => TriggerKind::NewUser,
            RewardTrigger::Subscription => TriggerKind::Subscription,
            RewardTrigger::Custom { .. } => TriggerKind::Custom,
        }
    }

    /// Custom event name, present only for the custom trigger
    pub fn custom_event_name(&self) -> Option<&str> {
        match self {
            RewardTrigger::Custom { event_name } => Some(event_name),
            _ => None,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            RewardTrigger::Custom { event_name } if !event_name.is_empty() => {
                format!("Custom Event ({event_name})")
            }
            other => other.kind().label().to_string(),
        }
    }
}

// ============================================================================
// Payouts
// ============================================================================

/// Which side of the referral a payout belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    Referrer,
    Referee,
}

/// Payout delivery method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PayoutMethod {
    #[default]
    Stripe,
    Paypal,
    Amazon,
    Custom,
    None,
}

impl PayoutMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PayoutMethod::Stripe => "Stripe Payment",
            PayoutMethod::Paypal => "PayPal Transfer",
            PayoutMethod::Amazon => "Amazon Gift Card",
            PayoutMethod::Custom => "Custom Reward",
            PayoutMethod::None => "No Reward",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            PayoutMethod::Stripe,
            PayoutMethod::Paypal,
            PayoutMethod::Amazon,
            PayoutMethod::Custom,
            PayoutMethod::None,
        ]
    }
}

/// Cash-like reward (PayPal transfer, Amazon gift card)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashReward {
    pub amount: Option<f64>,
    pub currency: String,
    /// Maximum number of payouts
    pub limit: Option<u32>,
}

impl Default for CashReward {
    fn default() -> Self {
        Self {
            amount: None,
            currency: "USD".to_string(),
            limit: None,
        }
    }
}

/// Stripe discount applied to the party's subscription
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StripeDiscount {
    pub discount_percent: Option<f64>,
    pub discount_duration_months: Option<u32>,
    pub discount_limit: Option<u32>,
}

/// Payout configuration for one party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PayoutConfig {
    Stripe(StripeDiscount),
    Paypal(CashReward),
    Amazon(CashReward),
    Custom { description: String },
    None,
}

/// Editable payout fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoutField {
    Amount,
    Currency,
    Limit,
    DiscountPercent,
    DiscountDuration,
    DiscountLimit,
    Description,
}

impl PayoutField {
    pub fn label(&self) -> &'static str {
        match self {
            PayoutField::Amount => "Amount",
            PayoutField::Currency => "Currency",
            PayoutField::Limit => "Max referrals",
            PayoutField::DiscountPercent => "Discount %",
            PayoutField::DiscountDuration => "Duration (months)",
            PayoutField::DiscountLimit => "Max redemptions",
            PayoutField::Description => "Description",
        }
    }
}

impl PayoutConfig {
    /// Fresh configuration for `method` with every field at its default.
    pub fn for_method(method: PayoutMethod) -> Self {
        match method {
            PayoutMethod::Stripe => PayoutConfig::Stripe(StripeDiscount::default()),
            PayoutMethod::Paypal => PayoutConfig::Paypal(CashReward::default()),
            PayoutMethod::Amazon => PayoutConfig::Amazon(CashReward::default()),
            PayoutMethod::Custom => PayoutConfig::Custom {
                description: String::new(),
            },
            PayoutMethod::None => PayoutConfig::None,
        }
    }

    pub fn method(&self) -> PayoutMethod {
        match self {
            PayoutConfig::Stripe(_) => PayoutMethod::Stripe,
            PayoutConfig::Paypal(_) => PayoutMethod::Paypal,
            PayoutConfig::Amazon(_) => PayoutMethod::Amazon,
            PayoutConfig::Custom { .. } => PayoutMethod::Custom,
            PayoutConfig::None => PayoutMethod::None,
        }
    }

    /// Fields the current method accepts, in form order.
    pub fn fields(&self) -> &'static [PayoutField] {
        match self {
            PayoutConfig::Stripe(_) => &[
                PayoutField::DiscountPercent,
                PayoutField::DiscountDuration,
                PayoutField::DiscountLimit,
            ],
            PayoutConfig::Paypal(_) | PayoutConfig::Amazon(_) => &[
                PayoutField::Amount,
                PayoutField::Currency,
                PayoutField::Limit,
            ],
            PayoutConfig::Custom { .. } => &[PayoutField::Description],
            PayoutConfig::None => &[],
        }
    }

    /// Current value of `field` as form text. `None` when the field does not
    /// belong to the current method; unset numbers are empty.
    pub fn field_value(&self, field: PayoutField) -> Option<String> {
        fn text<T: ToString>(value: &Option<T>) -> String {
            value.as_ref().map(T::to_string).unwrap_or_default()
        }
        match (self, field) {
            (PayoutConfig::Paypal(cash) | PayoutConfig::Amazon(cash), PayoutField::Amount) => {
                Some(text(&cash.amount))
            }
            (PayoutConfig::Paypal(cash) | PayoutConfig::Amazon(cash), PayoutField::Currency) => {
                Some(cash.currency.clone())
            }
            (PayoutConfig::Paypal(cash) | PayoutConfig::Amazon(cash), PayoutField::Limit) => {
                Some(text(&cash.limit))
            }
            (PayoutConfig::Stripe(d), PayoutField::DiscountPercent) => Some(text(&d.discount_percent)),
            (PayoutConfig::Stripe(d), PayoutField::DiscountDuration) => {
                Some(text(&d.discount_duration_months))
            }
            (PayoutConfig::Stripe(d), PayoutField::DiscountLimit) => Some(text(&d.discount_limit)),
            (PayoutConfig::Custom { description }, PayoutField::Description) => {
                Some(description.clone())
            }
            _ => None,
        }
    }

    /// Apply raw form input to `field`.
    ///
    /// Numeric input is coerced; returns `false` when the input does not parse
    /// or the field does not belong to the current method.
    pub fn set_field(&mut self, field: PayoutField, input: &str) -> bool {
        let input = input.trim();
        match (self, field) {
            (PayoutConfig::Paypal(cash) | PayoutConfig::Amazon(cash), PayoutField::Amount) => {
                assign(&mut cash.amount, parse_amount(input))
            }
            (PayoutConfig::Paypal(cash) | PayoutConfig::Amazon(cash), PayoutField::Currency) => {
                if input.is_empty() {
                    return false;
                }
                cash.currency = input.to_uppercase();
                true
            }
            (PayoutConfig::Paypal(cash) | PayoutConfig::Amazon(cash), PayoutField::Limit) => {
                assign(&mut cash.limit, parse_count(input))
            }
            (PayoutConfig::Stripe(discount), PayoutField::DiscountPercent) => assign(
                &mut discount.discount_percent,
                parse_amount(input).filter(|p| *p <= 100.0),
            ),
            (PayoutConfig::Stripe(discount), PayoutField::DiscountDuration) => {
                assign(&mut discount.discount_duration_months, parse_count(input))
            }
            (PayoutConfig::Stripe(discount), PayoutField::DiscountLimit) => {
                assign(&mut discount.discount_limit, parse_count(input))
            }
            (PayoutConfig::Custom { description }, PayoutField::Description) => {
                *description = input.to_string();
                true
            }
            _ => false,
        }
    }

    /// One-line description for the summary page
    pub fn describe(&self) -> String {
        match self {
            PayoutConfig::Stripe(d) => {
                let mut text = match d.discount_percent {
                    Some(p) => format!("{p}% Stripe discount"),
                    None => "Stripe discount".to_string(),
                };
                if let Some(months) = d.discount_duration_months {
                    text.push_str(&format!(" for {months} months"));
                }
                if let Some(limit) = d.discount_limit {
                    text.push_str(&format!(", Max {limit} redemptions"));
                }
                text
            }
            PayoutConfig::Paypal(cash) | PayoutConfig::Amazon(cash) => {
                let mut text = match cash.amount {
                    Some(amount) => format!("{amount} {} {}", cash.currency, self.method().label()),
                    None => self.method().label().to_string(),
                };
                if let Some(limit) = cash.limit {
                    text.push_str(&format!(", Max {limit} referrals all time"));
                }
                text
            }
            PayoutConfig::Custom { description } if !description.is_empty() => description.clone(),
            PayoutConfig::Custom { .. } => PayoutMethod::Custom.label().to_string(),
            PayoutConfig::None => PayoutMethod::None.label().to_string(),
        }
    }
}

impl Default for PayoutConfig {
    fn default() -> Self {
        PayoutConfig::for_method(PayoutMethod::default())
    }
}

fn parse_amount(input: &str) -> Option<f64> {
    input
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

fn parse_count(input: &str) -> Option<u32> {
    input.parse::<u32>().ok()
}

fn assign<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
    match value {
        Some(v) => {
            *slot = Some(v);
            true
        }
        None => false,
    }
}

// ============================================================================
// Reward Limit
// ============================================================================

/// Cap on rewards paid to a single referrer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardLimit {
    pub enabled: bool,
    pub max_per_referrer: u32,
}

impl Default for RewardLimit {
    fn default() -> Self {
        Self {
            enabled: false,
            max_per_referrer: 100,
        }
    }
}

// ============================================================================
// Rewards Stages
// ============================================================================

/// Sub-steps of the rewards page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RewardsStage {
    #[default]
    TriggerSetup,
    ReferrerRewards,
    InviteeRewards,
}

impl RewardsStage {
    pub const ALL: [RewardsStage; 3] = [
        RewardsStage::TriggerSetup,
        RewardsStage::ReferrerRewards,
        RewardsStage::InviteeRewards,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RewardsStage::TriggerSetup => "Trigger Setup",
            RewardsStage::ReferrerRewards => "Referrer Rewards",
            RewardsStage::InviteeRewards => "Invitee Rewards",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            RewardsStage::TriggerSetup => 0,
            RewardsStage::ReferrerRewards => 1,
            RewardsStage::InviteeRewards => 2,
        }
    }

    pub fn next(&self) -> Option<Self> {
        RewardsStage::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(&self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| RewardsStage::ALL[i])
    }
}

// ============================================================================
// Rewards Form
// ============================================================================

/// Local form state of the rewards step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardsForm {
    pub trigger: RewardTrigger,
    pub referrer: PayoutConfig,
    pub referee: PayoutConfig,
    pub limit: RewardLimit,
    pub stage: RewardsStage,
}

impl RewardsForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the trigger event. Choosing anything other than custom clears
    /// the custom event name; re-selecting custom keeps it.
    pub fn select_trigger(&mut self, kind: TriggerKind) {
        self.trigger = match (kind, std::mem::take(&mut self.trigger)) {
            (TriggerKind::Custom, RewardTrigger::Custom { event_name }) => {
                RewardTrigger::Custom { event_name }
            }
            (TriggerKind::Custom, _) => RewardTrigger::Custom {
                event_name: String::new(),
            },
            (TriggerKind::NewUser, _) => RewardTrigger::NewUser,
            (TriggerKind::Subscription, _) => RewardTrigger::Subscription,
        };
    }

    /// Set the custom event name; ignored unless the custom trigger is selected.
    pub fn set_custom_event_name(&mut self, name: &str) -> bool {
        match &mut self.trigger {
            RewardTrigger::Custom { event_name } => {
                *event_name = name.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn payout(&self, party: Party) -> &PayoutConfig {
        match party {
            Party::Referrer => &self.referrer,
            Party::Referee => &self.referee,
        }
    }

    fn payout_mut(&mut self, party: Party) -> &mut PayoutConfig {
        match party {
            Party::Referrer => &mut self.referrer,
            Party::Referee => &mut self.referee,
        }
    }

    /// Switch a party's payout method. Always replaces the whole config,
    /// even when the method is unchanged.
    pub fn select_method(&mut self, party: Party, method: PayoutMethod) {
        tracing::debug!(?party, ?method, "Payout method selected");
        *self.payout_mut(party) = PayoutConfig::for_method(method);
    }

    pub fn set_payout_field(&mut self, party: Party, field: PayoutField, input: &str) -> bool {
        self.payout_mut(party).set_field(field, input)
    }

    pub fn set_limit_enabled(&mut self, enabled: bool) {
        self.limit.enabled = enabled;
    }

    pub fn set_limit_input(&mut self, input: &str) -> bool {
        match parse_count(input.trim()) {
            Some(max) => {
                self.limit.max_per_referrer = max;
                true
            }
            None => false,
        }
    }

    pub fn stage_status(&self, stage: RewardsStage) -> StepStatus {
        StepStatus::at(stage.index(), self.stage.index())
    }

    pub fn next_stage(&mut self) -> bool {
        match self.stage.next() {
            Some(next) => {
                self.stage = next;
                true
            }
            None => false,
        }
    }

    pub fn previous_stage(&mut self) -> bool {
        match self.stage.previous() {
            Some(prev) => {
                self.stage = prev;
                true
            }
            None => false,
        }
    }

    /// Referrer payout line including the reward limit when enabled
    pub fn describe_referrer(&self) -> String {
        let mut text = self.referrer.describe();
        if self.limit.enabled && self.referrer.method() != PayoutMethod::None {
            text.push_str(&format!(
                ", Max {} rewards per referrer",
                self.limit.max_per_referrer
            ));
        }
        text
    }
}
