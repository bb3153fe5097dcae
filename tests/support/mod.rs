//! Test support utilities for key-rotator integration tests.
//!
//! Provides an isolated config directory, a local stand-in for the GitHub
//! API, and helpers for running the binary.

#![allow(dead_code)]

pub mod server;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use server::MockGitHub;

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with an isolated temp directory.
///
/// No process-global state is mutated; child processes get their
/// environment and working directory explicitly so tests can run in
/// parallel.
pub struct Test {
    /// Temporary directory holding config files
    pub dir: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Create a test environment with `config.yaml` written.
    pub fn with_config(yaml: &str) -> Self {
        let t = Self::new();
        t.write_config("config.yaml", yaml);
        t
    }

    /// Write a config file into the test directory and return its path.
    pub fn write_config(&self, name: &str, yaml: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, yaml).expect("failed to write config");
        path
    }

    /// Path of the default config file.
    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.yaml")
    }
}
