//! Common test utilities for habitual integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't pollute
//! the user's `~/.habitual/` directory.

#![allow(dead_code)]

use assert_cmd::Command;
pub use tempfile::TempDir;

/// A test environment with its own data root (via `HABITUAL_HOME`).
pub struct TestEnv {
    pub home: TempDir,
}

impl TestEnv {
    /// Create a new, signed-out test environment.
    pub fn new() -> Self {
        Self {
            home: TempDir::new().unwrap(),
        }
    }

    /// Create a new test environment signed in as `user`.
    pub fn signed_in(user: &str) -> Self {
        let env = Self::new();
        env.habitual()
            .args(["auth", "login", user])
            .assert()
            .success();
        env
    }

    /// Get a Command for the habitual binary with an isolated data root.
    pub fn habitual(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_habitual"));
        cmd.env("HABITUAL_HOME", self.home.path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("RUST_LOG");
        cmd.env_remove("HABITUAL_OUTPUT");
        cmd
    }

    /// Create a habit and return its id.
    pub fn add_habit(&self, args: &[&str]) -> String {
        let output = self
            .habitual()
            .args(["-o", "json", "add"])
            .args(args)
            .output()
            .unwrap();
        assert!(output.status.success(), "add failed: {output:?}");

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        value["id"].as_str().unwrap().to_string()
    }

    /// Run a command with JSON output and parse stdout.
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .habitual()
            .args(["-o", "json"])
            .args(args)
            .output()
            .unwrap();
        assert!(output.status.success(), "command failed: {output:?}");
        serde_json::from_slice(&output.stdout).unwrap()
    }

    pub fn home_path(&self) -> &std::path::Path {
        self.home.path()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
