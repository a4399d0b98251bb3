use std::{
    cmp::Ordering,
    ops::{Index, IndexMut},
};

use crate::{Version, VersionKind};

/// The three version identities of one file or project, one field per slot.
///
/// Slots a file format cannot carry stay [`Version::EMPTY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VersionSet {
    pub primary: Version,
    pub file: Version,
    pub informational: Version,
}

impl VersionSet {
    pub const EMPTY: Self = Self {
        primary: Version::EMPTY,
        file: Version::EMPTY,
        informational: Version::EMPTY,
    };

    pub const MIN_VALUE: Self = Self {
        primary: Version::from_numbers(0, 0, 0, 0),
        file: Version::from_numbers(0, 0, 0, 0),
        informational: Version::from_numbers(0, 0, 0, 0),
    };

    #[must_use]
    pub fn with(mut self, kind: VersionKind, version: Version) -> Self {
        self[kind] = version;
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, version)| version.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (VersionKind, Version)> + '_ {
        VersionKind::ALL.into_iter().map(|kind| (kind, self[kind]))
    }

    /// Slot-by-slot maximum of two sets.
    #[must_use]
    pub fn max(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a.max(b))
    }

    /// Slot-by-slot maximum of two sets of proposed versions.
    ///
    /// Proposed versions may still hold wildcards, so slots are ordered as patterns:
    /// wildcard positions never decide. On a tie the concrete candidate wins.
    #[must_use]
    pub fn max_proposed(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| match a.compare_to_pattern(&b) {
            Ordering::Greater => a,
            Ordering::Less => b,
            Ordering::Equal if !a.is_concrete() && b.is_concrete() => b,
            Ordering::Equal => a,
        })
    }

    /// Highest version among the populated slots, or [`Version::EMPTY`] if none is.
    #[must_use]
    pub fn highest_populated_slot(&self) -> Version {
        self.iter()
            .map(|(_, version)| version)
            .filter(|version| !version.is_empty())
            .max()
            .unwrap_or(Version::EMPTY)
    }

    fn zip_with(&self, other: &Self, pick: impl Fn(Version, Version) -> Version) -> Self {
        Self {
            primary: pick(self.primary, other.primary),
            file: pick(self.file, other.file),
            informational: pick(self.informational, other.informational),
        }
    }
}

impl Index<VersionKind> for VersionSet {
    type Output = Version;

    fn index(&self, kind: VersionKind) -> &Self::Output {
        match kind {
            VersionKind::Primary => &self.primary,
            VersionKind::File => &self.file,
            VersionKind::Informational => &self.informational,
        }
    }
}

impl IndexMut<VersionKind> for VersionSet {
    fn index_mut(&mut self, kind: VersionKind) -> &mut Self::Output {
        match kind {
            VersionKind::Primary => &mut self.primary,
            VersionKind::File => &mut self.file,
            VersionKind::Informational => &mut self.informational,
        }
    }
}
