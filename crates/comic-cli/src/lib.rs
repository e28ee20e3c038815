//! Command-line front end for the comic viewer.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
