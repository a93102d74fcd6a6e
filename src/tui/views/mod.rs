pub mod step_content;
pub mod step_rail;
