// Library target backs the criterion benchmarks and integration tests.
// The binary entry point is main.rs; UI modules are only declared there.
#![allow(dead_code)]

pub mod engine;
pub mod session;
pub mod store;
pub mod vocab;
