//! Communication Journeys
//!
//! A journey is an ordered list of triggers, each carrying the
//! communications sent when it fires. The referrer and referee steps each
//! own one [`JourneyBuilder`].

mod builder;
mod presets;
mod types;

pub use builder::{CommunicationDraft, JourneyBuilder};
pub use presets::JourneyKind;
pub use types::{Channel, Communication, JourneyError, Payload, Trigger, TriggerType};
