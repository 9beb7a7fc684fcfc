// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Object categories and their bitmask encoding.

use core::fmt;

bitflags::bitflags! {
    /// One bit per object category.
    ///
    /// Every object carries exactly one bit, so filtering by category is a single
    /// integer comparison.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CategoryMask: u32 {
        /// Unknown or unrecognized category.
        const UNKNOWN  = 0b0000_0001;
        /// Cars and other driven bodies.
        const VEHICLE  = 0b0000_0010;
        /// Houses, shops, towers.
        const BUILDING = 0b0000_0100;
        /// Ground tiles.
        const TERRAIN  = 0b0000_1000;
        /// Small decorative items.
        const PROP     = 0b0001_0000;
        /// Road segments.
        const ROAD     = 0b0010_0000;
        /// Trees.
        const TREE     = 0b0100_0000;
        /// Parks and green areas.
        const PARK     = 0b1000_0000;
    }
}

/// Category of a scene object.
///
/// Labels the host does not recognize are kept, trimmed and lowercased, in
/// [`Category::Unrecognized`] instead of being folded into [`Category::Unknown`]. Both share the
/// [`CategoryMask::UNKNOWN`] bit, but [`Category::matches`] also compares the label,
/// so two different unrecognized labels never match each other.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Category {
    /// Explicitly unknown (empty label or `"unknown"`).
    #[default]
    Unknown,
    /// See [`CategoryMask::VEHICLE`].
    Vehicle,
    /// See [`CategoryMask::BUILDING`].
    Building,
    /// See [`CategoryMask::TERRAIN`].
    Terrain,
    /// See [`CategoryMask::PROP`].
    Prop,
    /// See [`CategoryMask::ROAD`].
    Road,
    /// See [`CategoryMask::TREE`].
    Tree,
    /// See [`CategoryMask::PARK`].
    Park,
    /// A label outside the known set, trimmed and ASCII-lowercased.
    Unrecognized(Box<str>),
}

impl Category {
    /// Parse a host category label.
    ///
    /// Accepts the plural directory-style labels used by the scene builder
    /// (`"vehicles"`, `"buildings"`, `"props"`, ...) and their singular forms,
    /// ignoring ASCII case and surrounding whitespace.
    pub fn from_label(label: &str) -> Self {
        let lower = label.trim().to_ascii_lowercase();
        match lower.as_str() {
            "" | "unknown" => Self::Unknown,
            "vehicle" | "vehicles" => Self::Vehicle,
            "building" | "buildings" => Self::Building,
            "terrain" | "terrains" => Self::Terrain,
            "prop" | "props" => Self::Prop,
            "road" | "roads" => Self::Road,
            "tree" | "trees" => Self::Tree,
            "park" | "parks" => Self::Park,
            _ => Self::Unrecognized(lower.into()),
        }
    }

    /// The mask bit for this category.
    pub const fn mask(&self) -> CategoryMask {
        match self {
            Self::Unknown | Self::Unrecognized(_) => CategoryMask::UNKNOWN,
            Self::Vehicle => CategoryMask::VEHICLE,
            Self::Building => CategoryMask::BUILDING,
            Self::Terrain => CategoryMask::TERRAIN,
            Self::Prop => CategoryMask::PROP,
            Self::Road => CategoryMask::ROAD,
            Self::Tree => CategoryMask::TREE,
            Self::Park => CategoryMask::PARK,
        }
    }

    /// Canonical label, as the host spells it.
    pub fn label(&self) -> &str {
        match self {
            Self::Unknown => "unknown",
            Self::Vehicle => "vehicles",
            Self::Building => "buildings",
            Self::Terrain => "terrain",
            Self::Prop => "props",
            Self::Road => "roads",
            Self::Tree => "trees",
            Self::Park => "park",
            Self::Unrecognized(label) => label,
        }
    }

    /// Whether an object tagged `mask`/`category` belongs to this category.
    ///
    /// Known categories compare by mask only. Unknown-bit categories must also agree on
    /// the label.
    #[inline]
    pub fn matches(&self, mask: CategoryMask, category: &Self) -> bool {
        let own = self.mask();
        if own != mask {
            return false;
        }
        own != CategoryMask::UNKNOWN || self == category
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plural_and_singular_labels_parse_alike() {
        assert_eq!(Category::from_label("vehicles"), Category::Vehicle);
        assert_eq!(Category::from_label("Vehicle"), Category::Vehicle);
        assert_eq!(Category::from_label(" trees "), Category::Tree);
        assert_eq!(Category::from_label(""), Category::Unknown);
    }

    #[test]
    fn masks_are_distinct_bits() {
        let all = [
            Category::Unknown,
            Category::Vehicle,
            Category::Building,
            Category::Terrain,
            Category::Prop,
            Category::Road,
            Category::Tree,
            Category::Park,
        ];
        let mut seen = CategoryMask::empty();
        for c in &all {
            assert_eq!(c.mask().bits().count_ones(), 1, "{c} must be a single bit");
            assert!(!seen.intersects(c.mask()), "{c} reuses a bit");
            seen |= c.mask();
        }
        assert_eq!(seen, CategoryMask::all());
    }

    #[test]
    fn different_unrecognized_labels_do_not_match() {
        let boat = Category::from_label("boats");
        let crane = Category::from_label("cranes");
        assert_eq!(boat.mask(), crane.mask());
        assert!(!boat.matches(crane.mask(), &crane));
        assert!(boat.matches(boat.mask(), &boat.clone()));
        assert!(!Category::Unknown.matches(boat.mask(), &boat));
    }

    #[test]
    fn unrecognized_labels_ignore_case_like_known_ones() {
        let upper = Category::from_label(" Boats");
        let lower = Category::from_label("boats");
        assert_eq!(upper, lower);
        assert_eq!(upper.label(), "boats");
        assert!(upper.matches(lower.mask(), &lower));
    }

    #[test]
    fn known_categories_match_by_mask() {
        let v = Category::Vehicle;
        assert!(v.matches(CategoryMask::VEHICLE, &Category::Vehicle));
        assert!(!v.matches(CategoryMask::TREE, &Category::Tree));
    }
}
