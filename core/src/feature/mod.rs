//! # Feature Table
//!
//! Static mapping from [`Feature`] to the CPUID bit that reports it.
//!
//! Every feature resolves to exactly one [`FeatureLocation`]: a leaf, an
//! output register, a bit index and a [`VendorGate`]. A lookup reads the bit
//! from the snapshot of that leaf and nothing else, so a feature can never be
//! evaluated against another leaf's registers.
//!
//! A handful of bits are only meaningful on Intel parts (`PSN`, `MPX`, `ADX`,
//! `PT`, `MAWAU`, `SGX_LC`); those are gated and read as absent on every
//! other vendor whatever the raw bit says. A few features alias one location
//! under different names (`SEP`/`SCE`, `PQM`/`RDT_M`, `ABM`/`LZCNT`).

mod set;
mod table;

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use x86v_hal::{CpuidSnapshot, Leaf, Register, Vendor};

use crate::error::Error;

pub use set::CpuFeatures;
pub use table::Feature;
use table::FEATURE_TABLE;

// =============================================================================
// LOCATIONS
// =============================================================================

/// Vendor precondition on a feature lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorGate {
    /// The bit means the same thing on every vendor
    Any,
    /// The bit is only defined on Intel processors
    IntelOnly,
}

impl VendorGate {
    /// Whether a processor from `vendor` passes this gate
    pub const fn admits(self, vendor: Vendor) -> bool {
        match self {
            VendorGate::Any => true,
            VendorGate::IntelOnly => vendor.is_intel(),
        }
    }
}

/// Where a feature bit lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureLocation {
    /// Leaf whose snapshot holds the bit
    pub leaf: Leaf,
    /// Output register
    pub register: Register,
    /// Bit index, `0..=31`
    pub bit: u8,
    /// Vendor precondition
    pub gate: VendorGate,
}

impl FeatureLocation {
    /// Evaluate this location against a snapshot
    #[inline]
    pub fn is_set(&self, snapshot: &CpuidSnapshot) -> bool {
        if self.gate != VendorGate::Any && !self.gate.admits(snapshot.vendor()) {
            return false;
        }
        snapshot.leaf(self.leaf).bit(self.register, self.bit)
    }
}

impl fmt::Display for FeatureLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CPUID.{}:{}[{}]", self.leaf, self.register, self.bit)?;
        if self.gate == VendorGate::IntelOnly {
            f.write_str(" (Intel only)")?;
        }
        Ok(())
    }
}

/// One row of the feature table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureInfo {
    /// The feature this row describes
    pub feature: Feature,
    /// Display name as stored (mixed case)
    pub name: &'static str,
    /// Where the bit lives
    pub location: FeatureLocation,
}

const fn table_is_well_formed() -> bool {
    if FEATURE_TABLE.len() != Feature::COUNT {
        return false;
    }
    let mut i = 0;
    while i < FEATURE_TABLE.len() {
        let row = &FEATURE_TABLE[i];
        if row.feature as usize != i || row.location.bit > 31 {
            return false;
        }
        i += 1;
    }
    true
}

static_assertions::const_assert!(table_is_well_formed());

/// Bit index of `feature`, usable in constant expressions
pub(crate) const fn bit_of(feature: Feature) -> u8 {
    FEATURE_TABLE[feature as usize].location.bit
}

// =============================================================================
// FEATURE
// =============================================================================

impl Feature {
    /// Table row for this feature
    #[inline]
    pub fn info(self) -> &'static FeatureInfo {
        let row = &FEATURE_TABLE[self as usize];
        debug_assert_eq!(row.feature, self);
        row
    }

    /// Where this feature's bit lives
    #[inline]
    pub fn location(self) -> FeatureLocation {
        self.info().location
    }

    /// Display name as stored
    #[inline]
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Iterate over every feature in declaration order
    pub fn iter() -> impl Iterator<Item = Feature> {
        Feature::ALL.iter().copied()
    }

    /// Whether this feature is present in `snapshot`
    #[inline]
    pub fn is_present(self, snapshot: &CpuidSnapshot) -> bool {
        has(self, snapshot)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = Error;

    /// Parse a display name, ignoring ASCII case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        FEATURE_TABLE
            .iter()
            .find(|row| row.name.eq_ignore_ascii_case(s))
            .map(|row| row.feature)
            .ok_or_else(|| Error::UnknownFeature(s.to_string()))
    }
}

/// Whether `feature` is present in `snapshot`.
///
/// Pure: no allocation and no side effects. A vendor-gated feature reads as
/// absent on a processor that fails the gate, whatever the raw bit value.
#[inline]
pub fn has(feature: Feature, snapshot: &CpuidSnapshot) -> bool {
    feature.location().is_set(snapshot)
}

// =============================================================================
// TESTS
// =============================================================================
