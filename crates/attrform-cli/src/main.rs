//! # attrform CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/attrform-cli/src/cli/)                   │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - logging setup (logging.rs)                               │
//! │  - command handlers returning printable output (handlers.rs)│
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Library (crates/attrform/)                                 │
//! │  - schema files, registry, construction pipeline            │
//! │  - no knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers take parsed arguments and return the text to print, so they are
//! tested without spawning the binary; `tests/cli_e2e.rs` covers the wiring.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
