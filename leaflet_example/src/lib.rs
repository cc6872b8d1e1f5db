//! Demo page wiring for `leaflet_facade`, shared by the binary and its tests.

pub mod example;

pub use example::{bootstrap, bootstrap_with, read_config, Example, ExampleConfig, Summary};
