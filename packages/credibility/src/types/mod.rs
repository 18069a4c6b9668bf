//! Data types shared across the engine.

pub mod config;
pub mod metadata;
pub mod report;
pub mod request;
pub mod result;
pub mod signals;
