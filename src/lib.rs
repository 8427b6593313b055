//! vvkit: arbitrary-precision radix conversion, parent-id record trees
//! and a handful of string, unit and id helpers.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
