// Frameworks layer: process bootstrap, logging and runtime configuration.

pub mod config;
pub mod runtime;
