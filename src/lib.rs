#![doc(test(attr(deny(warnings))))]

//! SubTrack core: the subscription aggregator, the PIN lock and the screen
//! flow that gates the app, plus the interactive shell built on top of them.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("SubTrack tracing initialized.");
    });
}
