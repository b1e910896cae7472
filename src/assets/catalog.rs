//! `AssetCatalog`: loaded assets keyed by name.

use rustc_hash::FxHashMap;

use super::key::AssetKey;
use crate::board::Board;
use crate::cards::Deck;

/// Shell-owned store of loaded assets.
///
/// `T` is whatever the shell renders with (a texture handle, a path, ...).
#[derive(Clone, Debug)]
pub struct AssetCatalog<T> {
    assets: FxHashMap<AssetKey, T>,
}

impl<T> Default for AssetCatalog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AssetCatalog<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            assets: FxHashMap::default(),
        }
    }

    /// Store `asset` under `key`, returning the previous one.
    pub fn insert(&mut self, key: AssetKey, asset: T) -> Option<T> {
        self.assets.insert(key, asset)
    }

    #[must_use]
    pub fn get(&self, key: &AssetKey) -> Option<&T> {
        self.assets.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Keys from `expected` with no loaded asset, in order.
    #[must_use]
    pub fn missing(&self, expected: &[AssetKey]) -> Vec<AssetKey> {
        expected
            .iter()
            .filter(|key| !self.assets.contains_key(*key))
            .copied()
            .collect()
    }

    /// Face art for every card of `deck`, by deck index.
    #[must_use]
    pub fn relink_deck(&self, deck: &Deck) -> Vec<Option<&T>> {
        deck.cards()
            .iter()
            .map(|card| self.get(&AssetKey::for_card(card)))
            .collect()
    }

    /// Board art for every subsection of `board`, by position.
    #[must_use]
    pub fn relink_board(&self, board: &Board) -> Vec<Option<&T>> {
        board
            .subsections()
            .iter()
            .map(|sub| self.get(&AssetKey::for_subsection(sub)))
            .collect()
    }

    /// The card back, if loaded.
    #[must_use]
    pub fn card_back(&self) -> Option<&T> {
        self.get(&AssetKey::CardBack)
    }
}

impl<T> FromIterator<(AssetKey, T)> for AssetCatalog<T> {
    fn from_iter<I: IntoIterator<Item = (AssetKey, T)>>(iter: I) -> Self {
        Self {
            assets: iter.into_iter().collect(),
        }
    }
}
