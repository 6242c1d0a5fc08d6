//! Bidkit: RFP Response Toolkit
//!
//! A toolkit for drafting priced responses to industrial cable and
//! electrical-product RFPs from plain JSON fixture files.

pub mod cli;
pub mod core;
pub mod entities;
