pub mod logging;
pub mod editor;

// Campaign stores, wizard navigation and the layout shell
pub mod campaign;

// Per-step form state
pub mod rewards;
pub mod appearance;
pub mod journey;
pub mod communications;
pub mod summary;

// Simulated publish to staging/production
pub mod publish;
