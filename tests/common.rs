#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use keymark::config::Config;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// keymark binary with HOME pointed at a scratch directory, so the user's
/// configuration is never read or written.
pub fn km() -> Command {
    let mut cmd = cargo_bin_cmd!("keymark");
    cmd.env("HOME", test_home());
    cmd
}

pub fn test_home() -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push("keymark_test_home");
    fs::create_dir_all(&path).ok();
    path
}

/// Unique table path inside the system temp dir; removes the table and its
/// sidecars left by a previous run.
pub fn temp_table(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_keymark.csv", name));

    fs::remove_file(&path).ok();
    for suffix in ["session.json", "journal"] {
        fs::remove_file(sidecar_of(&path, suffix)).ok();
    }
    path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    fs::remove_file(&path).ok();
    path
}

pub fn sidecar_of(table: &Path, suffix: &str) -> PathBuf {
    let mut s = table.as_os_str().to_os_string();
    s.push(".");
    s.push(suffix);
    PathBuf::from(s)
}

pub fn test_config() -> Config {
    Config::default()
}

/// Write a raw table file, bypassing the store.
pub fn write_raw(path: &Path, content: &str) {
    fs::write(path, content).expect("write raw table");
}

pub fn read_raw(path: &Path) -> String {
    fs::read_to_string(path).expect("read table")
}

/// `init` a fresh log through the CLI (test mode: config untouched).
pub fn init_log(table: &Path) -> String {
    let table = table.to_string_lossy().to_string();
    km().args(["--log", &table, "--test", "init", "video.mp4"])
        .assert()
        .success();
    table
}

pub fn log_key(table: &str, key: &str, ms: &str) {
    km().args(["--log", table, "log", key, "--ms", ms])
        .assert()
        .success();
}
