//! CLI subcommands

pub mod list;
pub mod render;
pub mod show;
