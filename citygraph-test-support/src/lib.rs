//! Shared test utilities used across citygraph crates.
//!
//! [`tracing`](crate::tracing) captures spans and events so instrumentation can be asserted,
//! and [`ci`](crate::ci) reads the environment overrides shared by property suites.

pub mod ci;
pub mod tracing;
