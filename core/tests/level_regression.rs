//! Classification of recorded register dumps.
//!
//! Each processor below is replayed through [`StaticCpuid`] and captured the
//! same way the binary captures the real processor.

use x86v_core::{Classifier, Level, LevelProfile, Report, SupportedLevels};
use x86v_hal::vendor::{signature_snapshot, AMD_SIGNATURE, INTEL_SIGNATURE};
use x86v_hal::{CpuidSnapshot, Leaf, RegisterSnapshot, StaticCpuid, Vendor};

struct Dump {
    signature: &'static [u8; 12],
    max_basic: u32,
    leaf1: (u32, u32),
    leaf7_ebx: u32,
    ext: (u32, u32),
}

impl Dump {
    fn capture(&self) -> CpuidSnapshot {
        let source = StaticCpuid::new()
            .with_leaf(Leaf::VendorId, signature_snapshot(self.max_basic, self.signature))
            .with_leaf(Leaf::Features, RegisterSnapshot::new(0, 0, self.leaf1.0, self.leaf1.1))
            .with_leaf(Leaf::StructuredExtended, RegisterSnapshot::new(0, self.leaf7_ebx, 0, 0))
            .with_leaf(Leaf::ExtendedMax, RegisterSnapshot::new(0x8000_0008, 0, 0, 0))
            .with_leaf(Leaf::ExtendedFeatures, RegisterSnapshot::new(0, 0, self.ext.0, self.ext.1));
        CpuidSnapshot::capture(&source)
    }
}

const PENRYN: Dump = Dump {
    signature: INTEL_SIGNATURE,
    max_basic: 0xd,
    leaf1: (0x0008_e3fd, 0xbfeb_fbff),
    leaf7_ebx: 0,
    ext: (0x0000_0001, 0x2010_0800),
};

const HASWELL: Dump = Dump {
    signature: INTEL_SIGNATURE,
    max_basic: 0xd,
    leaf1: (0x7ffa_fbff, 0xbfeb_fbff),
    leaf7_ebx: 0x0000_27ab,
    ext: (0x0000_0021, 0x2c10_0800),
};

const SKYLAKE_SP: Dump = Dump {
    signature: INTEL_SIGNATURE,
    max_basic: 0x16,
    leaf1: (0x7ffe_fbff, 0xbfeb_fbff),
    leaf7_ebx: 0xd39f_fffb,
    ext: (0x0000_0121, 0x2c10_0800),
};

const ZEN2: Dump = Dump {
    signature: AMD_SIGNATURE,
    max_basic: 0x10,
    leaf1: (0x7ed8_320b, 0x178b_fbff),
    leaf7_ebx: 0x219c_91a9,
    ext: (0x75c2_37ff, 0x2fd3_fbff),
};

fn supported(dump: &Dump) -> SupportedLevels {
    Classifier::new().classify(&dump.capture()).supported()
}

#[test]
fn pinned_checksums() {
    let expected = [132, 84, 139, 122];
    for (profile, checksum) in LevelProfile::ALL.iter().zip(expected) {
        assert_eq!(profile.expected_checksum, checksum, "{}", profile.level);
    }
}

#[test]
fn penryn_is_v1() {
    assert_eq!(supported(&PENRYN), SupportedLevels::V1);
}

#[test]
fn haswell_is_v3() {
    let classification = Classifier::new().classify(&HASWELL.capture());
    assert_eq!(classification.highest(), Some(Level::V3));
    assert_eq!(
        Report::new(&classification).render(),
        "x86-64 v1 supported (fpu cx8 sce cmov mmx fxsr sse sse2)\n\
         x86-64 v2 supported (cmpxchg16b popcnt sse3 sse4.1 sse4.2 ssse3 lahf_sahf)\n\
         x86-64 v3 supported (avx f16c fma movbe osxsave avx2 bmi1 bmi2 lzcnt)\n"
    );
}

#[test]
fn skylake_sp_is_v4() {
    assert_eq!(supported(&SKYLAKE_SP), SupportedLevels::all());
}

#[test]
fn zen2_is_v3() {
    let snapshot = ZEN2.capture();
    assert_eq!(snapshot.vendor(), Vendor::Other);
    assert_eq!(
        Classifier::new().classify(&snapshot).supported(),
        SupportedLevels::V1 | SupportedLevels::V2 | SupportedLevels::V3
    );
}

#[test]
fn leaf_above_max_is_ignored() {
    // AVX-512 bits are reported but leaf 7 is beyond the advertised maximum.
    let dump = Dump {
        max_basic: 0x6,
        ..SKYLAKE_SP
    };
    let classification = Classifier::new().classify(&dump.capture());
    assert_eq!(classification.highest(), Some(Level::V2));
    assert_eq!(classification.get(Level::V4).checksum, 0);
}

#[test]
fn v4_evaluation_reads_leaf_seven_only() {
    let dump = Dump {
        leaf1: (0, 0),
        ext: (0, 0),
        ..SKYLAKE_SP
    };
    assert_eq!(supported(&dump), SupportedLevels::V4);
}

#[test]
fn leaf_one_edx_alone_is_v1() {
    // FPU CX8 SCE CMOV MMX FXSR SSE SSE2
    let dump = Dump {
        signature: INTEL_SIGNATURE,
        max_basic: 0xd,
        leaf1: (0, 0x0780_8901),
        leaf7_ebx: 0,
        ext: (0, 0),
    };
    let classification = Classifier::new().classify(&dump.capture());
    assert_eq!(classification.supported(), SupportedLevels::V1);
    assert_eq!(
        Report::new(&classification).render(),
        "x86-64 v1 supported (fpu cx8 sce cmov mmx fxsr sse sse2)\n"
    );
}

#[test]
fn v1_survives_capped_extended_leaves() {
    // Guest advertising no extended feature leaf; SYSCALL would be set there.
    let source = StaticCpuid::new()
        .with_leaf(Leaf::VendorId, signature_snapshot(0xd, INTEL_SIGNATURE))
        .with_leaf(Leaf::Features, RegisterSnapshot::new(0, 0, PENRYN.leaf1.0, PENRYN.leaf1.1))
        .with_leaf(Leaf::ExtendedMax, RegisterSnapshot::new(0x8000_0000, 0, 0, 0))
        .with_leaf(Leaf::ExtendedFeatures, RegisterSnapshot::new(0, 0, 0, 1 << 11));
    let snapshot = CpuidSnapshot::capture(&source);
    assert_eq!(*snapshot.leaf(Leaf::ExtendedFeatures), RegisterSnapshot::ZERO);
    assert_eq!(Classifier::new().classify(&snapshot).supported(), SupportedLevels::V1);
}
