//! Pipeline orchestration for IntelScout.
//!
//! This crate ties together fetching, extraction, and reporting into the
//! fixed five-stage intelligence run (see [`pipeline`]).

pub mod pipeline;
pub mod stages;

pub use pipeline::{HttpPipeline, Pipeline, SilentProgress, Stage, StageProgress};
