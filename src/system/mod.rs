//! # System Interaction Layer
//!
//! The boundary between the generator and the filesystem.
//!
//! ## Modules
//!
//! - **`output`**: Atomic, all-or-nothing writing of generated scripts, with
//!   the executable bit set on Unix.

pub mod output;
