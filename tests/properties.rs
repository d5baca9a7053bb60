//! Property tests for lunabuild.
//!
//! Properties use randomized input generation to protect the resolver
//! invariants: rewritten references never keep dots or scope prefixes, and
//! the rewrite is idempotent.
//!
//! Run with: `cargo test --test properties`

#[path = "properties/resolver.rs"]
mod resolver;
