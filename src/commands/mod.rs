//! # CLI Command Implementations
//!
//! Each subcommand of `pbxsync` lives in its own file with:
//! - an `Args` struct derived with `clap`,
//! - an `execute` function that calls into the `pbxsync` library.
//!
//! `select` holds the flags and prompts shared by `sync` and `diff`.

pub mod completions;
pub mod diff;
pub mod ls;
pub mod select;
pub mod sync;
