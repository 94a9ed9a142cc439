//! # matchbook-store
//!
//! **Ordered key-value storage abstraction for Matchbook.**
//!
//! The engine persists its price levels and book metadata through the
//! [`KeyValueStore`] capability defined here. The trait is deliberately
//! narrow:
//!
//! - **`get`/`put`/`set`/`del`**: `put` creates, `set` updates, and each
//!   fails loudly when used the other way round
//! - **Synchronous**: the engine applies every mutation before returning
//! - **No durability contract**: replication and persistence live behind
//!   the implementation, never in engine logic
//!
//! [`MemoryStore`] is the in-process implementation used by the engine
//! tests and single-node deployments.

pub mod key;
pub mod kv;
pub mod memory;

pub use key::StoreKey;
pub use kv::{KeyValueStore, StoreExt};
pub use memory::MemoryStore;
