//! Per-leaf register capture.
//!
//! A [`CpuidSnapshot`] holds exactly one [`RegisterSnapshot`] per leaf and is
//! the only way the feature table reads register state, so a bit can never
//! be looked up in the wrong leaf's registers.

use crate::cpuid::{CpuidSource, Leaf, RegisterSnapshot};
use crate::vendor::{signature_snapshot, Vendor, AMD_SIGNATURE, INTEL_SIGNATURE};

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Register state of every leaf the detector reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuidSnapshot {
    regs: [RegisterSnapshot; Leaf::ALL.len()],
}

impl CpuidSnapshot {
    /// Query every leaf once through `source`.
    ///
    /// Feature leaves above the maximum the processor reports are not issued
    /// and read as all-zero.
    pub fn capture(source: &impl CpuidSource) -> Self {
        let mut snapshot = Self::empty();

        let basic = source.query(Leaf::VendorId);
        let extended = source.query(Leaf::ExtendedMax);
        snapshot.regs[Leaf::VendorId as usize] = basic;
        snapshot.regs[Leaf::ExtendedMax as usize] = extended;

        log::debug!(
            "cpuid: vendor={:?} max_basic={:#x} max_extended={:#x}",
            Vendor::from_snapshot(&basic),
            basic.eax,
            extended.eax
        );

        for leaf in Leaf::FEATURE_LEAVES {
            let max = if leaf.is_extended() { extended.eax } else { basic.eax };
            if max >= leaf.id() {
                snapshot.regs[leaf as usize] = source.query(leaf);
            } else {
                log::debug!("cpuid: leaf {} above maximum {:#x}, reading as zero", leaf, max);
            }
        }

        snapshot
    }

    /// Snapshot with every leaf zeroed
    pub const fn empty() -> Self {
        Self {
            regs: [RegisterSnapshot::ZERO; Leaf::ALL.len()],
        }
    }

    /// Synthetic snapshot for `vendor` with every feature leaf reported as
    /// supported and zeroed
    pub fn synthetic(vendor: Vendor) -> Self {
        let signature = match vendor {
            Vendor::Intel => INTEL_SIGNATURE,
            Vendor::Other => AMD_SIGNATURE,
        };
        Self::empty()
            .with_leaf(
                Leaf::VendorId,
                signature_snapshot(Leaf::StructuredExtended.id(), signature),
            )
            .with_leaf(
                Leaf::ExtendedMax,
                RegisterSnapshot::new(Leaf::ExtendedFeatures.id(), 0, 0, 0),
            )
    }

    /// Synthetic snapshot for `vendor` with the given leaves replaced
    pub fn from_parts(
        vendor: Vendor,
        parts: impl IntoIterator<Item = (Leaf, RegisterSnapshot)>,
    ) -> Self {
        parts
            .into_iter()
            .fold(Self::synthetic(vendor), |snapshot, (leaf, regs)| snapshot.with_leaf(leaf, regs))
    }

    /// Synthetic snapshot for `vendor` with every feature bit set
    pub fn all_set(vendor: Vendor) -> Self {
        Leaf::FEATURE_LEAVES
            .iter()
            .fold(Self::synthetic(vendor), |snapshot, &leaf| {
                snapshot.with_leaf(leaf, RegisterSnapshot::ALL)
            })
    }

    /// Replace the registers of one leaf
    pub fn with_leaf(mut self, leaf: Leaf, regs: RegisterSnapshot) -> Self {
        self.regs[leaf as usize] = regs;
        self
    }

    /// Registers captured for `leaf`
    #[inline]
    pub fn leaf(&self, leaf: Leaf) -> &RegisterSnapshot {
        &self.regs[leaf as usize]
    }

    /// Vendor derived from the leaf 0 registers
    pub fn vendor(&self) -> Vendor {
        Vendor::from_snapshot(self.leaf(Leaf::VendorId))
    }
}

impl Default for CpuidSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

// =============================================================================
// STATIC SOURCE
// =============================================================================

/// A [`CpuidSource`] answering from canned register values.
///
/// Used to replay a captured processor and to feed synthetic inputs.
/// Leaves that were never set read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticCpuid {
    regs: [RegisterSnapshot; Leaf::ALL.len()],
}

impl StaticCpuid {
    /// Source answering every leaf with zero
    pub const fn new() -> Self {
        Self {
            regs: [RegisterSnapshot::ZERO; Leaf::ALL.len()],
        }
    }

    /// Source that replays `snapshot`
    pub fn from_snapshot(snapshot: &CpuidSnapshot) -> Self {
        Self { regs: snapshot.regs }
    }

    /// Set the answer for one leaf
    pub fn with_leaf(mut self, leaf: Leaf, regs: RegisterSnapshot) -> Self {
        self.regs[leaf as usize] = regs;
        self
    }
}

impl CpuidSource for StaticCpuid {
    fn query(&self, leaf: Leaf) -> RegisterSnapshot {
        self.regs[leaf as usize]
    }
}

// =============================================================================
// TESTS
// =============================================================================
