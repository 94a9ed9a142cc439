//! Keys under which the engine stores its state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A key in the book's key-value store.
///
/// One store holds exactly one trading pair: a single metadata record plus
/// one entry per occupied price level. The derived ordering puts metadata
/// first, then levels ascending by price, so ordered backends list the book
/// in price order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StoreKey {
    /// The book's [`BookMetadata`](matchbook_types::BookMetadata) record.
    Metadata,
    /// The FIFO order queue at one integer price.
    Level(i64),
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metadata => write!(f, "metadata"),
            Self::Level(price) => write!(f, "level:{price}"),
        }
    }
}
