// Library target exists for integration tests and criterion benchmarks.
// The binary entry point is main.rs; this file re-declares the module tree so
// harnesses can import types via `mathdr::engine::*` / `mathdr::generator::*`.
// Most code is only exercised through the binary, so suppress dead_code warnings.
#![allow(dead_code)]

// Public: used directly by benchmarks and integration tests
pub mod engine;
pub mod generator;
pub mod session;
pub mod store;

// Private: required transitively (won't compile without them)
mod app;
mod config;
