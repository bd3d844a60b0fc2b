//! File watcher for live config reload.
//!
//! Uses the `notify` crate to watch the config file's directory, with a
//! debounce window so editors that save via write + rename produce a single
//! reload.

mod config_watcher;


pub use config_watcher::{ConfigWatcher, DEBOUNCE};
