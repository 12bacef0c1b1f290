//! Test harness for CLI integration tests.
//!
//! Provides isolated test environments, programmatic note seeding,
//! native-messaging frame helpers, and CLI assertion helpers using
//! `assert_cmd`.

mod command;
mod env;
mod native;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::PagenoteCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
#[allow(unused_imports)]
pub use native::{decode_frames, encode_frames};
