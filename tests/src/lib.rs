//! # Agent-Trust Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── integration/        # Cross-crate flows
//! │   ├── flows.rs        # Gate → sign → authenticate, end to end
//! │   └── concurrency.rs  # Request isolation, cancellation, deadlines
//! │
//! └── exploits/           # Attack simulations
//!     ├── envelope.rs     # Replay, impersonation, tampering (Layer 1)
//!     └── delegation.rs   # Forgery, malleability, replay (Layer 2)
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p at-tests
//! cargo test -p at-tests integration::
//! cargo test -p at-tests exploits::
//! cargo bench -p at-tests
//! ```

pub mod exploits;
pub mod fixtures;
pub mod integration;
