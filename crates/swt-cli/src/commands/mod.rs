// crates/swt-cli/src/commands/mod.rs
//
// Command module declarations for the swt CLI.

pub mod evaluate;
pub mod fit;
pub mod predict;
