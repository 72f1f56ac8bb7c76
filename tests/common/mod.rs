#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use once_cell::sync::Lazy;
use subtrack_core::{
    core::AppController,
    storage::{JsonStore, MemoryStore},
    utils::PathResolver,
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated SubTrack home directory.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Starts an app session on `home`: durable flags from disk, a fresh session scope.
pub fn launch(home: &Path) -> AppController {
    let durable =
        JsonStore::open(PathResolver::storage_file_in(home)).expect("open durable store");
    AppController::new(Box::new(durable), Box::new(MemoryStore::new()))
        .expect("bootstrap controller")
}

/// Types every character of `digits` on the active PIN pad.
pub fn enter_pin(controller: &mut AppController, digits: &str) {
    for key in digits.chars() {
        controller.press_pin(key).expect("press PIN key");
    }
}
