/// Referral Builder - Campaign Builder State Model
///
/// Core library providing the referral campaign builder wizard: step
/// navigation, campaign stores, reward configuration, communication
/// journeys, appearance templates and the simulated publish flow.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
