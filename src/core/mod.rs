//! Core library components.
//!
//! Configuration parsing, sealed-box encryption, destinations, the GitHub
//! client, and the rotation driver. Nothing here touches the terminal.

pub mod config;
pub mod constants;
pub mod crypto;
pub mod destination;
pub mod github;
pub mod rotation;
pub mod version;
