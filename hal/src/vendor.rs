//! CPU vendor classification.
//!
//! The vendor string comes back from leaf 0 in EBX, EDX, ECX (in that
//! order). Classification is binary: a few feature bits are only
//! meaningful on Intel parts, everything else is treated alike.

use crate::cpuid::{CpuidSource, Leaf, NativeCpuid, RegisterSnapshot};

/// Vendor string reported by Intel processors
pub const INTEL_SIGNATURE: &[u8; 12] = b"GenuineIntel";

/// Vendor string reported by AMD processors
pub const AMD_SIGNATURE: &[u8; 12] = b"AuthenticAMD";

/// CPU vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    /// Intel processor
    Intel,
    /// Any other vendor
    Other,
}

impl Vendor {
    /// Detect the vendor of the executing processor
    pub fn detect() -> Self {
        Self::from_source(&NativeCpuid)
    }

    /// Detect the vendor through an arbitrary source
    pub fn from_source(source: &impl CpuidSource) -> Self {
        Self::from_snapshot(&source.query(Leaf::VendorId))
    }

    /// Classify a leaf 0 snapshot
    pub fn from_snapshot(regs: &RegisterSnapshot) -> Self {
        if &vendor_string(regs) == INTEL_SIGNATURE {
            Vendor::Intel
        } else {
            Vendor::Other
        }
    }

    /// Whether this is an Intel processor
    pub const fn is_intel(self) -> bool {
        matches!(self, Vendor::Intel)
    }

    /// Whether this is not an Intel processor
    pub const fn is_other(self) -> bool {
        !self.is_intel()
    }
}

/// Reassemble the 12-byte vendor string from a leaf 0 snapshot
pub fn vendor_string(regs: &RegisterSnapshot) -> [u8; 12] {
    let mut bytes = [0u8; 12];
    bytes[0..4].copy_from_slice(&regs.ebx.to_le_bytes());
    bytes[4..8].copy_from_slice(&regs.edx.to_le_bytes());
    bytes[8..12].copy_from_slice(&regs.ecx.to_le_bytes());
    bytes
}

/// Build the leaf 0 snapshot a processor with this signature would report
pub fn signature_snapshot(max_leaf: u32, signature: &[u8; 12]) -> RegisterSnapshot {
    let word = |i: usize| {
        u32::from_le_bytes([
            signature[i],
            signature[i + 1],
            signature[i + 2],
            signature[i + 3],
        ])
    };
    RegisterSnapshot::new(max_leaf, word(0), word(8), word(4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intel_registers() {
        // Raw register values reported by every Intel part.
        let regs = RegisterSnapshot::new(0x16, 0x756e_6547, 0x6c65_746e, 0x4965_6e69);
        assert_eq!(&vendor_string(&regs), INTEL_SIGNATURE);
        assert_eq!(Vendor::from_snapshot(&regs), Vendor::Intel);
    }

    #[test]
    fn test_amd_is_other() {
        let regs = signature_snapshot(0x10, AMD_SIGNATURE);
        assert_eq!(&vendor_string(&regs), AMD_SIGNATURE);
        assert_eq!(Vendor::from_snapshot(&regs), Vendor::Other);
        assert!(Vendor::from_snapshot(&regs).is_other());
    }

    #[test]
    fn test_unknown_vendor_is_other() {
        let regs = signature_snapshot(0x0d, b"HygonGenuine");
        assert_eq!(Vendor::from_snapshot(&regs), Vendor::Other);
        assert_eq!(Vendor::from_snapshot(&RegisterSnapshot::ZERO), Vendor::Other);
    }

    #[test]
    fn test_signature_round_trip() {
        let regs = signature_snapshot(7, INTEL_SIGNATURE);
        assert_eq!(regs.eax, 7);
        assert!(Vendor::from_snapshot(&regs).is_intel());
    }

    #[test]
    fn test_detect_is_stable() {
        assert_eq!(Vendor::detect(), Vendor::detect());
    }
}
