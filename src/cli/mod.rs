//! Command-line interface for the `mam` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity and the shared `DISPLAY_LEVEL` atomic with its display macros. |
//! | [`args`]      | clap grammar: global `-v`/`-q` and the `compress`, `decompress`, `verify`, `info`, `batch` subcommands. |
//! | [`commands`]  | One handler per subcommand; builds the engine and reports failures through `anyhow`. |
//!
//! Typical call sequence: `Cli::parse` → `adjust_display_level` → dispatch to a handler.

pub mod constants;
pub mod args;
pub mod commands;
