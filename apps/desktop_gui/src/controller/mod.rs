//! Controller layer: backend events and routing of session effects.

pub mod events;
pub mod orchestration;
