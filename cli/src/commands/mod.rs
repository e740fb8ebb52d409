//! CLI Commands

pub mod config;
pub mod fixtures;
pub mod normalize;
pub mod validate;
