//! Controller layer: per-component state, UI events, reducer-like state transitions, and command orchestration.

pub mod creator;
pub mod dashboard;
pub mod events;
pub mod file_stager;
pub mod health;
pub mod launch;
pub mod manual_reply;
pub mod models;
pub mod notifier;
pub mod orchestration;
pub mod reducer;
pub mod registry;
pub mod review;
