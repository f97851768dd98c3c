//! Integration tests for ShopEase.
//!
//! The tests under `tests/` drive the shop through its library API with a
//! real on-disk store, covering the persistence round-trips a browser session
//! would exercise.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopease-integration-tests
//! ```
