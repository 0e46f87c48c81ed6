#![allow(dead_code)]

pub mod command;
pub mod file;

/// Stdout of a finished command as a `String`
pub fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).to_string()
}
