//! CLI command implementations

pub mod catalog;
pub mod matching;
pub mod rfp;
pub mod run;
