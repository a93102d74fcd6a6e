//! Communications Step
//!
//! Used by the four-step layout in place of the two journey steps: one
//! reward email per party plus the invitation message referrers share.
//! A disabled email means a webhook fires instead.

use serde::{Deserialize, Serialize};

use crate::core::rewards::Party;

/// Reward email for one party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub enabled: bool,
    pub subject: String,
    pub body: String,
}

impl EmailTemplate {
    pub fn describe(&self) -> String {
        if self.enabled {
            format!("Email: {}", self.subject)
        } else {
            "Email disabled, webhook will be triggered instead".to_string()
        }
    }
}

/// Which tab of the communications page is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommunicationsTab {
    #[default]
    Referrer,
    Invitee,
}

/// Local form state of the communications step
#[derive(Debug, Clone, PartialEq)]
pub struct CommunicationsForm {
    pub tab: CommunicationsTab,
    pub referrer_email: EmailTemplate,
    pub invitee_email: EmailTemplate,
    pub invitation_message: String,
}

impl Default for CommunicationsForm {
    fn default() -> Self {
        Self {
            tab: CommunicationsTab::default(),
            referrer_email: EmailTemplate {
                enabled: true,
                subject: "You've earned a reward!".to_string(),
                body: "Hey {name},\n\nYou've received $10 for referring a friend to Acme Co!\n\n\
                       To redeem your reward, simply log into your account and visit the 'Rewards' section.\n\n\
                       Thank you for being an amazing part of our community!\n\n\
                       Best regards,\nThe Acme Co. Team"
                    .to_string(),
            },
            invitee_email: EmailTemplate {
                enabled: true,
                subject: "Welcome to Acme Co - Here's your reward!".to_string(),
                body: "Hey {name},\n\nWelcome to Acme Co! As a thank you for joining through our referral program, \
                       you've received a $5 credit!\n\n\
                       To use your reward, just log into your new account and you'll see the credit applied automatically.\n\n\
                       We're excited to have you on board!\n\n\
                       Best regards,\nThe Acme Co. Team"
                    .to_string(),
            },
            invitation_message: "Hey! I've been using Acme Co and I think you'd love it. \
                                 They're offering a special $5 credit for new users who sign up with my link. \
                                 Check it out: {referral_link}\nLet me know if you have any questions!"
                .to_string(),
        }
    }
}

impl CommunicationsForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self, party: Party) -> &EmailTemplate {
        match party {
            Party::Referrer => &self.referrer_email,
            Party::Referee => &self.invitee_email,
        }
    }

    pub fn email_mut(&mut self, party: Party) -> &mut EmailTemplate {
        match party {
            Party::Referrer => &mut self.referrer_email,
            Party::Referee => &mut self.invitee_email,
        }
    }

    pub fn set_email_enabled(&mut self, party: Party, enabled: bool) {
        self.email_mut(party).enabled = enabled;
    }

    /// Queue a test send of a party's reward email. There is no mail
    /// transport; the request is only logged. Returns `false` when the email
    /// is disabled.
    pub fn request_test_email(&self, party: Party) -> bool {
        let email = self.email(party);
        if !email.enabled {
            return false;
        }
        tracing::info!(?party, subject = %email.subject, "Test email requested");
        true
    }
}
