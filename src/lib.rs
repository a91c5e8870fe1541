//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under short names so binaries, tests and
//! benches use one import path (`blockfall::core`, `blockfall::engine`, ...).
//! The only code living here is the JSONL [`event_log`].

pub mod event_log;

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
