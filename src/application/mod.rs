//! Application layer: use-case orchestration over the domain layer.

pub mod click_recorder;
pub mod services;
