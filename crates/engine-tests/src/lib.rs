#![allow(dead_code)]

pub mod utils;

/// Query text handed to every executor. In-memory executors ignore it.
const TEST_QUERY: &str = "SELECT id, val FROM ks.items WHERE token(id) > ? AND token(id) <= ?";

/// High enough that the limiter never dominates a test run.
const FAST_RATE: u32 = 1_000_000;
