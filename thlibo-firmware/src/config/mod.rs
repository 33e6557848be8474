//! Configuration and record persistence

pub mod persistence;

pub use persistence::{load_last_run, load_machine_config, save_last_run};
