//! drycast command-line interface
//!
//! Argument definitions, file input for the `score` command and the text
//! renderers used by the `drycast` binary.

pub mod cli;
pub mod render;
pub mod score;
