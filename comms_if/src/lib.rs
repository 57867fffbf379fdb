//! # Communications interface crate.
//!
//! Provides the navigation plan messages and the topic bus used to deliver them.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Navigation plan message definitions
pub mod nav;

/// Topic subscription bus
pub mod bus;
