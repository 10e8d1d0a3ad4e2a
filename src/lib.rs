//! Monthly guard/civil-service shift scheduler.
//!
//! Turns a compact configuration (year, month, employee list, target
//! work-days, pinned assignments) into either a fully-assigned schedule with
//! summary statistics, or a classified "no-solution" verdict, by posting a
//! boolean constraint model to a CSP backend and solving it under a deadline.

pub mod api;
pub mod constraints;
pub mod demo_data;
pub mod domain;
pub mod error;
pub mod extract;
pub mod model;
pub mod solver;
