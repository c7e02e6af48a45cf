//! Card system: movement patterns, card definitions, and the catalog.
//!
//! ## Key Types
//!
//! - `Pattern`: validated 5x5 grid of reachable relative squares
//! - `Card`: immutable named pattern with a stamp colour
//! - `CardId`: index of a card in its catalog
//! - `CardCatalog`: deterministic card lookup by id or name
//!
//! Which player currently holds a card is not part of the card; see
//! `zones::CardPossession`.

pub mod catalog;
pub mod definition;
pub mod pattern;

pub use catalog::CardCatalog;
pub use definition::{Card, CardId, Destinations};
pub use pattern::{Pattern, PATTERN_SIZE};
