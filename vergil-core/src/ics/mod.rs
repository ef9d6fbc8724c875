//! ICS generation.
//!
//! This module renders a [`crate::Calendar`] as RFC 5545 text.

mod generate;

pub use generate::generate_ics;
