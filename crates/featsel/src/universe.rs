//! Feature identifiers, the candidate universe, and selected feature sets.

use fixedbitset::FixedBitSet;
use serde::{Deserialize, Serialize};

use crate::data::FeatureTable;
use crate::error::SelectionError;

/// Index of a feature column, `0 <= id < arity`.
pub type FeatureId = usize;

// =============================================================================
// FeatureUniverse
// =============================================================================

/// All candidate features of a dataset: `[0, arity)`.
///
/// # Example
///
/// ```
/// use featsel::FeatureUniverse;
///
/// let universe = FeatureUniverse::build(4).unwrap();
/// assert_eq!(universe.ids(), vec![0, 1, 2, 3]);
///
/// assert!(FeatureUniverse::build(-1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureUniverse {
    arity: usize,
}

impl FeatureUniverse {
    /// Build the universe from a reported arity.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::InvalidArity`] if `arity` is negative or does
    /// not fit the platform's index type.
    pub fn build(arity: i64) -> Result<Self, SelectionError> {
        usize::try_from(arity)
            .map(Self::from_arity)
            .map_err(|_| SelectionError::InvalidArity { arity })
    }

    /// Build the universe from a non-negative arity.
    #[inline]
    pub fn from_arity(arity: usize) -> Self {
        Self { arity }
    }

    /// Build the universe from a table's column count.
    #[inline]
    pub fn from_table<T: FeatureTable + ?Sized>(table: &T) -> Self {
        Self::from_arity(table.arity())
    }

    /// Number of features.
    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arity == 0
    }

    #[inline]
    pub fn contains(&self, id: FeatureId) -> bool {
        id < self.arity
    }

    /// Iterate ids in ascending order.
    #[inline]
    pub fn iter(&self) -> std::ops::Range<FeatureId> {
        0..self.arity
    }

    /// All ids in ascending order.
    pub fn ids(&self) -> Vec<FeatureId> {
        self.iter().collect()
    }

    /// The whole universe as a [`FeatureSet`].
    pub fn to_feature_set(&self) -> FeatureSet {
        let mut set = FeatureSet::with_capacity(self.arity);
        for id in self.iter() {
            set.insert(id);
        }
        set
    }
}

// =============================================================================
// FeatureSet
// =============================================================================

/// Duplicate-free set of features that remembers insertion order.
///
/// Membership is tracked in a bitset; iteration follows the order in which
/// features were inserted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<FeatureId>", into = "Vec<FeatureId>")]
pub struct FeatureSet {
    order: Vec<FeatureId>,
    members: FixedBitSet,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set sized for ids below `arity`.
    pub fn with_capacity(arity: usize) -> Self {
        Self {
            order: Vec::with_capacity(arity),
            members: FixedBitSet::with_capacity(arity),
        }
    }

    /// Insert `id`, returning `false` if it was already present.
    pub fn insert(&mut self, id: FeatureId) -> bool {
        if self.contains(id) {
            return false;
        }
        if id >= self.members.len() {
            self.members.grow(id + 1);
        }
        self.members.insert(id);
        self.order.push(id);
        true
    }

    #[inline]
    pub fn contains(&self, id: FeatureId) -> bool {
        self.members.contains(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Features in insertion order.
    #[inline]
    pub fn as_slice(&self) -> &[FeatureId] {
        &self.order
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeatureId> {
        self.order.iter()
    }

    /// Features in ascending id order.
    pub fn sorted(&self) -> Vec<FeatureId> {
        self.members.ones().collect()
    }

    pub fn into_vec(self) -> Vec<FeatureId> {
        self.order
    }
}

impl PartialEq for FeatureSet {
    /// Sets compare by insertion order, since order is part of the result.
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for FeatureSet {}

impl From<Vec<FeatureId>> for FeatureSet {
    fn from(ids: Vec<FeatureId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<FeatureSet> for Vec<FeatureId> {
    fn from(set: FeatureSet) -> Self {
        set.order
    }
}

impl FromIterator<FeatureId> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = FeatureId>>(iter: I) -> Self {
        let mut set = FeatureSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl<'a> IntoIterator for &'a FeatureSet {
    type Item = &'a FeatureId;
    type IntoIter = std::slice::Iter<'a, FeatureId>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}
