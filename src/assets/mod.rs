//! Presentation asset keys.
//!
//! The engine never stores images or sounds. A shell loads its art into an
//! [`AssetCatalog`] keyed by [`AssetKey`] and re-links it to a restored deck
//! or board by content, so snapshots stay plain data.

pub mod catalog;
pub mod key;

pub use catalog::AssetCatalog;
pub use key::AssetKey;
