//! Human-readable classification report.

use alloc::string::{String, ToString};
use core::fmt;

use crate::level::Classification;

/// One line per supported level, lowest first, each ending in a newline
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    classification: &'a Classification,
}

impl<'a> Report<'a> {
    /// Report over `classification`
    pub const fn new(classification: &'a Classification) -> Self {
        Self { classification }
    }

    /// Render to a string
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for eval in self.classification.iter_supported() {
            writeln!(f, "{eval}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Classifier;
    use x86v_hal::{CpuidSnapshot, Leaf, Register, RegisterSnapshot, Vendor};

    #[test]
    fn test_full_report() {
        let classification = Classifier::new().classify(&CpuidSnapshot::all_set(Vendor::Intel));
        assert_eq!(
            Report::new(&classification).render(),
            "x86-64 v1 supported (fpu cx8 sce cmov mmx fxsr sse sse2)\n\
             x86-64 v2 supported (cmpxchg16b popcnt sse3 sse4.1 sse4.2 ssse3 lahf_sahf)\n\
             x86-64 v3 supported (avx f16c fma movbe osxsave avx2 bmi1 bmi2 lzcnt)\n\
             x86-64 v4 supported (avx512-f avx512-bw avx512-cd avx512-dq avx512-vl)\n"
        );
    }

    #[test]
    fn test_v1_from_leaf_one_edx_alone() {
        // FPU CX8 SCE CMOV MMX FXSR SSE SSE2, extended leaf zero
        let edx = 0x0780_8901;
        let snapshot = CpuidSnapshot::synthetic(Vendor::Intel)
            .with_leaf(Leaf::Features, RegisterSnapshot::new(0, 0, 0, edx));
        assert_eq!(*snapshot.leaf(Leaf::ExtendedFeatures), RegisterSnapshot::ZERO);
        let classification = Classifier::new().classify(&snapshot);
        assert_eq!(
            Report::new(&classification).render(),
            "x86-64 v1 supported (fpu cx8 sce cmov mmx fxsr sse sse2)\n"
        );
    }

    #[test]
    fn test_only_supported_levels_are_listed() {
        // v4 bits only
        let ebx = (1 << 16) | (1 << 17) | (1 << 28) | (1 << 30) | (1u32 << 31);
        let snapshot = CpuidSnapshot::synthetic(Vendor::Other)
            .with_leaf(Leaf::StructuredExtended, RegisterSnapshot::new(0, ebx, 0, 0));
        assert!(snapshot.leaf(Leaf::StructuredExtended).bit(Register::Ebx, 31));
        let classification = Classifier::new().classify(&snapshot);
        assert_eq!(
            Report::new(&classification).render(),
            "x86-64 v4 supported (avx512-f avx512-bw avx512-cd avx512-dq avx512-vl)\n"
        );
    }

    #[test]
    fn test_empty_report() {
        let classification = Classifier::new().classify(&CpuidSnapshot::empty());
        assert_eq!(Report::new(&classification).render(), "");
    }
}
