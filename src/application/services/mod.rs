//! Application services

pub mod emitter;

pub use emitter::{EmitReport, EmitterService};
