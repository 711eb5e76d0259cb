//! egui front end for the Brand Insight Assistant.
//!
//! Panels read only [`projection::RenderModel`]s and history summaries;
//! they report user intent back as actions and never touch sessions.

pub mod panels;
pub mod projection;
pub mod state;
pub mod theme;

#[cfg(test)]
mod tests;
