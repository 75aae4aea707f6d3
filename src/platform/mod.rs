//! Platform abstraction layer
//!
//! Handles browser/native differences for input: raw key, mouse and touch
//! events are folded into a per-frame `TickInput`.

pub mod input;

pub use input::{Action, InputState, action_for_key, to_arena};
