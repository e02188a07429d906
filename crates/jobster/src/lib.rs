//! Job application lifecycle.
//!
//! Job seekers submit applications against job postings, employers and job seekers each
//! withdraw their own side independently, and a record is purged once both sides are gone.

pub mod applications;
pub mod config;
pub mod error;
pub mod telemetry;
