//! # Kestrel Test Suite
//!
//! Unified test crate driving the RPC gateway over real HTTP.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── harness.rs        # Mock collaborators + server bring-up
//! │
//! └── integration/      # End-to-end gateway tests
//!     ├── gateway_routes.rs
//!     ├── transactions.rs
//!     └── lifecycle.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p kestrel-tests
//!
//! # By category
//! cargo test -p kestrel-tests integration::
//! ```

#![allow(dead_code)]
