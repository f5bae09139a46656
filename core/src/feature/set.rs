//! First-class feature booleans for front ends.

use x86v_hal::{CpuidSnapshot, NativeCpuid, Vendor};

use super::{has, Feature};

/// Feature view over one captured [`CpuidSnapshot`].
///
/// Besides [`CpuFeatures::has`] there is one `has_<feature>()` accessor per
/// table row, e.g. [`CpuFeatures::has_avx2`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuFeatures {
    snapshot: CpuidSnapshot,
}

impl CpuFeatures {
    /// Wrap an existing snapshot
    pub const fn new(snapshot: CpuidSnapshot) -> Self {
        Self { snapshot }
    }

    /// Capture the executing processor
    pub fn detect() -> Self {
        Self::new(CpuidSnapshot::capture(&NativeCpuid))
    }

    /// Whether `feature` is present
    #[inline]
    pub fn has(&self, feature: Feature) -> bool {
        has(feature, &self.snapshot)
    }

    /// Vendor of the captured processor
    pub fn vendor(&self) -> Vendor {
        self.snapshot.vendor()
    }

    /// The underlying snapshot
    pub fn snapshot(&self) -> &CpuidSnapshot {
        &self.snapshot
    }

    /// Present features, in declaration order
    pub fn iter_present(&self) -> impl Iterator<Item = Feature> + '_ {
        Feature::iter().filter(move |&feature| self.has(feature))
    }

    /// Number of present features
    pub fn count(&self) -> usize {
        self.iter_present().count()
    }
}

impl From<CpuidSnapshot> for CpuFeatures {
    fn from(snapshot: CpuidSnapshot) -> Self {
        Self::new(snapshot)
    }
}
