//! CPUID instruction wrapper.
//!
//! Provides the raw instruction, the closed set of leaves the detector
//! issues, and [`RegisterSnapshot`], the immutable record of one query.

#[cfg(target_arch = "x86")]
use core::arch::x86::__cpuid_count;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::__cpuid_count;
use core::fmt;

// =============================================================================
// CPUID INSTRUCTION
// =============================================================================

/// Execute CPUID with a specific leaf and subleaf (ECX).
///
/// Absence of a feature is encoded as zero bits; the instruction itself has
/// no failure mode on supported hardware.
#[inline]
#[allow(unused_unsafe)]
pub fn cpuid(leaf: u32, subleaf: u32) -> RegisterSnapshot {
    // SAFETY: CPUID exists on every x86 target rustc supports (i586+) and
    // unconditionally in long mode.
    let res = unsafe { __cpuid_count(leaf, subleaf) };
    RegisterSnapshot::new(res.eax, res.ebx, res.ecx, res.edx)
}

// =============================================================================
// LEAVES
// =============================================================================

/// CPUID leaves issued by the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Leaf {
    /// Maximum basic leaf (EAX) and vendor string (EBX, EDX, ECX)
    VendorId,
    /// Version information and feature flags (ECX, EDX)
    Features,
    /// Thermal and power management (EAX)
    ThermalPower,
    /// Structured extended feature flags, subleaf 0 (EBX, ECX, EDX)
    StructuredExtended,
    /// Maximum extended leaf (EAX)
    ExtendedMax,
    /// Extended processor signature and feature bits (ECX, EDX)
    ExtendedFeatures,
}

impl Leaf {
    /// Every leaf, in discriminant order
    pub const ALL: [Leaf; 6] = [
        Leaf::VendorId,
        Leaf::Features,
        Leaf::ThermalPower,
        Leaf::StructuredExtended,
        Leaf::ExtendedMax,
        Leaf::ExtendedFeatures,
    ];

    /// Leaves that carry feature bits, in query order
    pub const FEATURE_LEAVES: [Leaf; 4] = [
        Leaf::Features,
        Leaf::ThermalPower,
        Leaf::StructuredExtended,
        Leaf::ExtendedFeatures,
    ];

    /// Raw selector loaded into EAX
    pub const fn id(self) -> u32 {
        match self {
            Leaf::VendorId => 0x0000_0000,
            Leaf::Features => 0x0000_0001,
            Leaf::ThermalPower => 0x0000_0006,
            Leaf::StructuredExtended => 0x0000_0007,
            Leaf::ExtendedMax => 0x8000_0000,
            Leaf::ExtendedFeatures => 0x8000_0001,
        }
    }

    /// Subleaf loaded into ECX
    pub const fn subleaf(self) -> u32 {
        0
    }

    /// Whether the selector lives in the extended (`0x8000_xxxx`) range
    pub const fn is_extended(self) -> bool {
        self.id() >= 0x8000_0000
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::StructuredExtended => write!(f, "{:#x}.{}", self.id(), self.subleaf()),
            _ => write!(f, "{:#x}", self.id()),
        }
    }
}

// =============================================================================
// REGISTERS
// =============================================================================

/// Output register of a CPUID query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// EAX
    Eax,
    /// EBX
    Ebx,
    /// ECX
    Ecx,
    /// EDX
    Edx,
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Register::Eax => "EAX",
            Register::Ebx => "EBX",
            Register::Ecx => "ECX",
            Register::Edx => "EDX",
        };
        f.write_str(name)
    }
}

/// Register values captured from one CPUID query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RegisterSnapshot {
    /// EAX
    pub eax: u32,
    /// EBX
    pub ebx: u32,
    /// ECX
    pub ecx: u32,
    /// EDX
    pub edx: u32,
}

impl RegisterSnapshot {
    /// Snapshot with every bit clear (an unsupported leaf)
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Snapshot with every bit set
    pub const ALL: Self = Self::new(u32::MAX, u32::MAX, u32::MAX, u32::MAX);

    /// Create a snapshot from raw register values
    pub const fn new(eax: u32, ebx: u32, ecx: u32, edx: u32) -> Self {
        Self { eax, ebx, ecx, edx }
    }

    /// Value of one register
    pub const fn register(&self, register: Register) -> u32 {
        match register {
            Register::Eax => self.eax,
            Register::Ebx => self.ebx,
            Register::Ecx => self.ecx,
            Register::Edx => self.edx,
        }
    }

    /// Test one bit of one register.
    ///
    /// `bit` comes from a compile-time table; an index past 31 is a
    /// programming error.
    #[inline]
    pub fn bit(&self, register: Register, bit: u8) -> bool {
        assert!(bit < 32, "register bit index {bit} out of range");
        (self.register(register) & (1 << bit)) != 0
    }

    /// Copy of this snapshot with one bit set or cleared
    pub fn with_bit(mut self, register: Register, bit: u8, value: bool) -> Self {
        assert!(bit < 32, "register bit index {bit} out of range");
        let reg = match register {
            Register::Eax => &mut self.eax,
            Register::Ebx => &mut self.ebx,
            Register::Ecx => &mut self.ecx,
            Register::Edx => &mut self.edx,
        };
        if value {
            *reg |= 1 << bit;
        } else {
            *reg &= !(1 << bit);
        }
        self
    }
}

// =============================================================================
// SOURCES
// =============================================================================

/// Something that can answer CPUID queries
pub trait CpuidSource {
    /// Issue one query
    fn query(&self, leaf: Leaf) -> RegisterSnapshot;
}

impl<S: CpuidSource + ?Sized> CpuidSource for &S {
    fn query(&self, leaf: Leaf) -> RegisterSnapshot {
        (**self).query(leaf)
    }
}

/// The executing processor
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCpuid;

impl CpuidSource for NativeCpuid {
    fn query(&self, leaf: Leaf) -> RegisterSnapshot {
        let regs = cpuid(leaf.id(), leaf.subleaf());
        log::trace!(
            "cpuid {}: eax={:#010x} ebx={:#010x} ecx={:#010x} edx={:#010x}",
            leaf,
            regs.eax,
            regs.ebx,
            regs.ecx,
            regs.edx
        );
        regs
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_in_discriminant_order() {
        for (i, leaf) in Leaf::ALL.iter().enumerate() {
            assert_eq!(*leaf as usize, i);
        }
    }

    #[test]
    fn test_extended_range() {
        assert!(Leaf::ExtendedFeatures.is_extended());
        assert!(Leaf::ExtendedMax.is_extended());
        assert!(!Leaf::StructuredExtended.is_extended());
    }

    #[test]
    fn test_bit_extraction() {
        let regs = RegisterSnapshot::new(0x1, 0x8000_0000, 0, 1 << 26);
        assert!(regs.bit(Register::Eax, 0));
        assert!(!regs.bit(Register::Eax, 1));
        assert!(regs.bit(Register::Ebx, 31));
        assert!(regs.bit(Register::Edx, 26));
        assert!(!regs.bit(Register::Ecx, 0));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_bit_panics_out_of_range() {
        let _ = RegisterSnapshot::ZERO.bit(Register::Eax, 40);
    }

    #[test]
    fn test_with_bit() {
        let regs = RegisterSnapshot::ZERO.with_bit(Register::Ecx, 5, true);
        assert_eq!(regs.ecx, 1 << 5);
        let regs = RegisterSnapshot::ALL.with_bit(Register::Ebx, 0, false);
        assert_eq!(regs.ebx, u32::MAX - 1);
    }

    #[test]
    fn test_native_query_basic_leaf() {
        // Leaf 1 EDX bit 26 (SSE2) is architectural on x86_64.
        let regs = NativeCpuid.query(Leaf::Features);
        #[cfg(target_arch = "x86_64")]
        assert!(regs.bit(Register::Edx, 26));
        let _ = regs;
    }
}
