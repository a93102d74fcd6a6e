//! Terminal front end for the campaign builder.

pub mod app;
pub mod events;
pub mod layout;
pub mod theme;
pub mod views;
