//! Backend bridge: command queue from the UI and the worker runtime that services it.

pub mod commands;
pub mod runtime;
