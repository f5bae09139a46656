//! The exhaustive bit map.
//!
//! One row per [`Feature`]: display name, leaf, register, bit and an
//! optional `intel` gate. The macro emits the enum, the lookup table (in
//! discriminant order) and one `has_*` accessor on [`CpuFeatures`] per row.

use x86v_hal::{Leaf, Register};

use super::set::CpuFeatures;
use super::{FeatureInfo, FeatureLocation, VendorGate};

macro_rules! gate {
    () => {
        VendorGate::Any
    };
    (intel) => {
        VendorGate::IntelOnly
    };
}

macro_rules! feature_table {
    ($(
        $(#[$doc:meta])*
        $variant:ident => $name:literal, $leaf:ident, $reg:ident, $bit:literal $(, $gate:ident)?;
    )*) => {
        /// A named CPUID feature flag
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum Feature {
            $(
                $(#[$doc])*
                $variant,
            )*
        }

        impl Feature {
            /// Every feature, in declaration order
            pub const ALL: &'static [Feature] = &[$(Feature::$variant,)*];

            /// Number of features
            pub const COUNT: usize = Feature::ALL.len();
        }

        /// Location of every feature, indexed by discriminant
        pub(super) const FEATURE_TABLE: &[FeatureInfo] = &[$(
            FeatureInfo {
                feature: Feature::$variant,
                name: $name,
                location: FeatureLocation {
                    leaf: Leaf::$leaf,
                    register: Register::$reg,
                    bit: $bit,
                    gate: gate!($($gate)?),
                },
            },
        )*];

        paste::paste! {
            impl CpuFeatures {
                $(
                    #[doc = concat!("Whether `", $name, "` is present")]
                    #[inline]
                    pub fn [<has_ $variant:snake>](&self) -> bool {
                        self.has(Feature::$variant)
                    }
                )*
            }
        }
    };
}

feature_table! {
    // -------------------------------------------------------------------------
    // Leaf 1, EDX
    // -------------------------------------------------------------------------
    /// x87 floating point unit on-chip
    Fpu => "FPU", Features, Edx, 0;
    /// Virtual 8086 mode extensions
    Vme => "VME", Features, Edx, 1;
    /// Debugging extensions
    De => "DE", Features, Edx, 2;
    /// Page size extension
    Pse => "PSE", Features, Edx, 3;
    /// Time stamp counter
    Tsc => "TSC", Features, Edx, 4;
    /// Model specific registers
    Msr => "MSR", Features, Edx, 5;
    /// Physical address extension
    Pae => "PAE", Features, Edx, 6;
    /// Machine check exception
    Mce => "MCE", Features, Edx, 7;
    /// CMPXCHG8B
    Cx8 => "CX8", Features, Edx, 8;
    /// On-chip APIC
    Apic => "APIC", Features, Edx, 9;
    /// SYSENTER/SYSEXIT
    Sep => "SEP", Features, Edx, 11;
    /// System call extension (x86-64 v1 baseline name of SEP)
    Sce => "SCE", Features, Edx, 11;
    /// Memory type range registers
    Mtrr => "MTRR", Features, Edx, 12;
    /// Page global enable
    Pge => "PGE", Features, Edx, 13;
    /// Machine check architecture
    Mca => "MCA", Features, Edx, 14;
    /// Conditional move
    Cmov => "CMOV", Features, Edx, 15;
    /// Page attribute table
    Pat => "PAT", Features, Edx, 16;
    /// 36-bit page size extension
    Pse36 => "PSE36", Features, Edx, 17;
    /// Processor serial number; reserved on other vendors
    Psn => "PSN", Features, Edx, 18, intel;
    /// CLFLUSH
    Clfsh => "CLFSH", Features, Edx, 19;
    /// Debug store
    Ds => "DS", Features, Edx, 21;
    /// Thermal monitor and clock control MSRs
    Acpi => "ACPI", Features, Edx, 22;
    /// MMX
    Mmx => "MMX", Features, Edx, 23;
    /// FXSAVE/FXRSTOR
    Fxsr => "FXSR", Features, Edx, 24;
    /// SSE
    Sse => "SSE", Features, Edx, 25;
    /// SSE2
    Sse2 => "SSE2", Features, Edx, 26;
    /// Self snoop
    Ss => "SS", Features, Edx, 27;
    /// Max APIC IDs field is valid
    Htt => "HTT", Features, Edx, 28;
    /// Thermal monitor
    Tm => "TM", Features, Edx, 29;
    /// IA-64 processor emulating x86
    Ia64 => "IA64", Features, Edx, 30;
    /// Pending break enable
    Pbe => "PBE", Features, Edx, 31;

    // -------------------------------------------------------------------------
    // Leaf 1, ECX
    // -------------------------------------------------------------------------
    /// SSE3
    Sse3 => "SSE3", Features, Ecx, 0;
    /// Carry-less multiply
    Pclmulqdq => "PCLMULQDQ", Features, Ecx, 1;
    /// 64-bit debug store
    Dtes64 => "DTES64", Features, Ecx, 2;
    /// MONITOR/MWAIT
    Monitor => "MONITOR", Features, Ecx, 3;
    /// CPL qualified debug store
    DsCpl => "DS_CPL", Features, Ecx, 4;
    /// Virtual machine extensions
    Vmx => "VMX", Features, Ecx, 5;
    /// Safer mode extensions
    Smx => "SMX", Features, Ecx, 6;
    /// Enhanced SpeedStep
    Est => "EST", Features, Ecx, 7;
    /// Thermal monitor 2
    Tm2 => "TM2", Features, Ecx, 8;
    /// Supplemental SSE3
    Ssse3 => "SSSE3", Features, Ecx, 9;
    /// L1 context ID
    CnxtId => "CNXT_ID", Features, Ecx, 10;
    /// Silicon debug interface
    Sdbg => "SDBG", Features, Ecx, 11;
    /// Fused multiply-add (FMA3)
    Fma => "FMA", Features, Ecx, 12;
    /// CMPXCHG16B
    Cmpxchg16b => "CMPXCHG16B", Features, Ecx, 13;
    /// Can disable sending task priority messages
    Xtpr => "XTPR", Features, Ecx, 14;
    /// Perfmon and debug capability
    Pdcm => "PDCM", Features, Ecx, 15;
    /// Process context identifiers
    Pcid => "PCID", Features, Ecx, 17;
    /// Direct cache access for DMA writes
    Dca => "DCA", Features, Ecx, 18;
    /// SSE4.1
    Sse41 => "SSE4.1", Features, Ecx, 19;
    /// SSE4.2
    Sse42 => "SSE4.2", Features, Ecx, 20;
    /// x2APIC
    X2apic => "X2APIC", Features, Ecx, 21;
    /// MOVBE
    Movbe => "MOVBE", Features, Ecx, 22;
    /// POPCNT
    Popcnt => "POPCNT", Features, Ecx, 23;
    /// APIC one-shot TSC deadline
    TscDeadline => "TSC_DEADLINE", Features, Ecx, 24;
    /// AES instruction set
    AesNi => "AES_NI", Features, Ecx, 25;
    /// XSAVE/XRSTOR/XSETBV/XGETBV
    Xsave => "XSAVE", Features, Ecx, 26;
    /// XSAVE enabled by the OS
    Osxsave => "OSXSAVE", Features, Ecx, 27;
    /// AVX
    Avx => "AVX", Features, Ecx, 28;
    /// Half-precision conversion
    F16c => "F16C", Features, Ecx, 29;
    /// RDRAND
    Rdrnd => "RDRND", Features, Ecx, 30;
    /// Running under a hypervisor
    Hypervisor => "HYPERVISOR", Features, Ecx, 31;

    // -------------------------------------------------------------------------
    // Leaf 6, EAX (thermal and power management)
    // -------------------------------------------------------------------------
    /// Digital temperature sensor
    Dts => "DTS", ThermalPower, Eax, 0;
    /// Turbo Boost
    TurboBoost => "TURBO_BOOST", ThermalPower, Eax, 1;
    /// APIC timer always running (operating point protection on Pentium 4)
    Arat => "ARAT", ThermalPower, Eax, 2;
    /// Power limit notification
    Pln => "PLN", ThermalPower, Eax, 4;
    /// Clock modulation duty cycle extension
    Ecmd => "ECMD", ThermalPower, Eax, 5;
    /// Package thermal management
    Ptm => "PTM", ThermalPower, Eax, 6;
    /// Hardware-controlled performance states
    Hwp => "HWP", ThermalPower, Eax, 7;

    // -------------------------------------------------------------------------
    // Leaf 7 subleaf 0, EBX
    // -------------------------------------------------------------------------
    /// RDFSBASE/RDGSBASE/WRFSBASE/WRGSBASE
    Fsgsbase => "FSGSBASE", StructuredExtended, Ebx, 0;
    /// IA32_TSC_ADJUST MSR
    TscAdjust => "TSC_ADJUST", StructuredExtended, Ebx, 1;
    /// Software guard extensions
    Sgx => "SGX", StructuredExtended, Ebx, 2;
    /// Bit manipulation instruction set 1
    Bmi1 => "BMI1", StructuredExtended, Ebx, 3;
    /// Hardware lock elision
    Hle => "HLE", StructuredExtended, Ebx, 4;
    /// AVX2
    Avx2 => "AVX2", StructuredExtended, Ebx, 5;
    /// x87 FPU data pointer updated only on exceptions
    FdpExcptnOnly => "FDP_EXCPTN_ONLY", StructuredExtended, Ebx, 6;
    /// Supervisor mode execution prevention
    Smep => "SMEP", StructuredExtended, Ebx, 7;
    /// Bit manipulation instruction set 2
    Bmi2 => "BMI2", StructuredExtended, Ebx, 8;
    /// Enhanced REP MOVSB/STOSB
    Erms => "ERMS", StructuredExtended, Ebx, 9;
    /// INVPCID
    Invpcid => "INVPCID", StructuredExtended, Ebx, 10;
    /// Restricted transactional memory
    Rtm => "RTM", StructuredExtended, Ebx, 11;
    /// Platform quality of service monitoring (AMD name of RDT_M)
    Pqm => "PQM", StructuredExtended, Ebx, 12;
    /// Resource director technology monitoring
    RdtM => "RDT_M", StructuredExtended, Ebx, 12;
    /// Memory protection extensions; reserved on other vendors
    Mpx => "MPX", StructuredExtended, Ebx, 14, intel;
    /// Resource director technology allocation
    RdtA => "RDT_A", StructuredExtended, Ebx, 15;
    /// AVX-512 foundation
    Avx512F => "AVX512-F", StructuredExtended, Ebx, 16;
    /// AVX-512 doubleword and quadword
    Avx512Dq => "AVX512-DQ", StructuredExtended, Ebx, 17;
    /// RDSEED
    Rdseed => "RDSEED", StructuredExtended, Ebx, 18;
    /// Multi-precision add-carry
    Adx => "ADX", StructuredExtended, Ebx, 19, intel;
    /// Supervisor mode access prevention
    Smap => "SMAP", StructuredExtended, Ebx, 20;
    /// AVX-512 integer fused multiply-add
    Avx512Ifma => "AVX512-IFMA", StructuredExtended, Ebx, 21;
    /// CLFLUSHOPT
    Clflushopt => "CLFLUSHOPT", StructuredExtended, Ebx, 23;
    /// CLWB
    Clwb => "CLWB", StructuredExtended, Ebx, 24;
    /// Processor trace
    Pt => "PT", StructuredExtended, Ebx, 25, intel;
    /// AVX-512 prefetch
    Avx512Pf => "AVX512-PF", StructuredExtended, Ebx, 26;
    /// AVX-512 exponential and reciprocal
    Avx512Er => "AVX512-ER", StructuredExtended, Ebx, 27;
    /// AVX-512 conflict detection
    Avx512Cd => "AVX512-CD", StructuredExtended, Ebx, 28;
    /// SHA extensions
    Sha => "SHA", StructuredExtended, Ebx, 29;
    /// AVX-512 byte and word
    Avx512Bw => "AVX512-BW", StructuredExtended, Ebx, 30;
    /// AVX-512 vector length extensions
    Avx512Vl => "AVX512-VL", StructuredExtended, Ebx, 31;

    // -------------------------------------------------------------------------
    // Leaf 7 subleaf 0, ECX
    // -------------------------------------------------------------------------
    /// PREFETCHWT1
    Prefetchwt1 => "PREFETCHWT1", StructuredExtended, Ecx, 0;
    /// AVX-512 vector bit manipulation
    Avx512Vbmi => "AVX512-VBMI", StructuredExtended, Ecx, 1;
    /// User-mode instruction prevention
    Umip => "UMIP", StructuredExtended, Ecx, 2;
    /// Memory protection keys for user-mode pages
    Pku => "PKU", StructuredExtended, Ecx, 3;
    /// PKU enabled by the OS
    Ospke => "OSPKE", StructuredExtended, Ecx, 4;
    /// Timed pause and user-level monitor/wait
    Waitpkg => "WAITPKG", StructuredExtended, Ecx, 5;
    /// AVX-512 vector bit manipulation 2
    Avx512Vbmi2 => "AVX512-VBMI2", StructuredExtended, Ecx, 6;
    /// Control-flow enforcement shadow stack
    CetSs => "CET_SS", StructuredExtended, Ecx, 7;
    /// Galois field instructions
    Gfni => "GFNI", StructuredExtended, Ecx, 8;
    /// Vector AES
    Vaes => "VAES", StructuredExtended, Ecx, 9;
    /// Vector carry-less multiply
    Vpclmulqdq => "VPCLMULQDQ", StructuredExtended, Ecx, 10;
    /// AVX-512 vector neural network instructions
    Avx512Vnni => "AVX512-VNNI", StructuredExtended, Ecx, 11;
    /// AVX-512 bit algorithms
    Avx512Bitalg => "AVX512-BITALG", StructuredExtended, Ecx, 12;
    /// Total memory encryption
    TmeEn => "TME_EN", StructuredExtended, Ecx, 13;
    /// AVX-512 vector population count
    Avx512Vpopcntdq => "AVX512-VPOPCNTDQ", StructuredExtended, Ecx, 14;
    /// Five-level paging
    La57 => "LA57", StructuredExtended, Ecx, 16;
    /// MPX address-width adjust; reserved on other vendors
    Mawau => "MAWAU", StructuredExtended, Ecx, 17, intel;
    /// RDPID
    Rdpid => "RDPID", StructuredExtended, Ecx, 22;
    /// Key locker
    Kl => "KL", StructuredExtended, Ecx, 23;
    /// Bus lock debug exceptions
    BusLockDetect => "BUS_LOCK_DETECT", StructuredExtended, Ecx, 24;
    /// Cache line demote
    Cldemote => "CLDEMOTE", StructuredExtended, Ecx, 25;
    /// MOVDIRI
    Movdiri => "MOVDIRI", StructuredExtended, Ecx, 27;
    /// MOVDIR64B
    Movdir64b => "MOVDIR64B", StructuredExtended, Ecx, 28;
    /// Enqueue stores
    Enqcmd => "ENQCMD", StructuredExtended, Ecx, 29;
    /// SGX launch configuration; reserved on other vendors
    SgxLc => "SGX_LC", StructuredExtended, Ecx, 30, intel;
    /// Protection keys for supervisor-mode pages
    Pks => "PKS", StructuredExtended, Ecx, 31;

    // -------------------------------------------------------------------------
    // Leaf 7 subleaf 0, EDX
    // -------------------------------------------------------------------------
    /// AVX-512 4-register neural network instructions
    Avx5124Vnniw => "AVX512-4VNNIW", StructuredExtended, Edx, 2;
    /// AVX-512 4-register multiply accumulate
    Avx5124Fmaps => "AVX512-4FMAPS", StructuredExtended, Edx, 3;
    /// Fast short REP MOV
    Fsrm => "FSRM", StructuredExtended, Edx, 4;
    /// AVX-512 vector pair intersection
    Avx512Vp2intersect => "AVX512-VP2INTERSECT", StructuredExtended, Edx, 8;
    /// VERW clears microarchitectural buffers
    MdClear => "MD_CLEAR", StructuredExtended, Edx, 10;
    /// SERIALIZE
    Serialize => "SERIALIZE", StructuredExtended, Edx, 14;
    /// Hybrid part (mixed core types)
    Hybrid => "HYBRID", StructuredExtended, Edx, 15;
    /// TSX suspend load address tracking
    Tsxldtrk => "TSXLDTRK", StructuredExtended, Edx, 16;
    /// Platform configuration
    Pconfig => "PCONFIG", StructuredExtended, Edx, 18;
    /// Control-flow enforcement indirect branch tracking
    CetIbt => "CET_IBT", StructuredExtended, Edx, 20;
    /// AMX bfloat16
    AmxBf16 => "AMX-BF16", StructuredExtended, Edx, 22;
    /// AMX tile architecture
    AmxTile => "AMX-TILE", StructuredExtended, Edx, 24;
    /// AMX 8-bit integer
    AmxInt8 => "AMX-INT8", StructuredExtended, Edx, 25;
    /// IBRS and IBPB speculation control
    SpecCtrl => "SPEC_CTRL", StructuredExtended, Edx, 26;
    /// Single thread indirect branch predictors
    Stibp => "STIBP", StructuredExtended, Edx, 27;
    /// IA32_FLUSH_CMD MSR
    FlushL1d => "FLUSH_L1D", StructuredExtended, Edx, 28;
    /// IA32_ARCH_CAPABILITIES MSR
    ArchCapabilities => "ARCH_CAPABILITIES", StructuredExtended, Edx, 29;
    /// IA32_CORE_CAPABILITIES MSR
    CoreCapabilities => "CORE_CAPABILITIES", StructuredExtended, Edx, 30;
    /// Speculative store bypass disable
    Ssbd => "SSBD", StructuredExtended, Edx, 31;

    // -------------------------------------------------------------------------
    // Leaf 0x8000_0001, ECX
    // -------------------------------------------------------------------------
    /// LAHF/SAHF in 64-bit mode
    LahfSahf => "LAHF_SAHF", ExtendedFeatures, Ecx, 0;
    /// Hyperthreading not valid
    CmpLegacy => "CMP_LEGACY", ExtendedFeatures, Ecx, 1;
    /// Secure virtual machine
    Svm => "SVM", ExtendedFeatures, Ecx, 2;
    /// Extended APIC space
    ExtApic => "EXTAPIC", ExtendedFeatures, Ecx, 3;
    /// CR8 in 32-bit mode
    Cr8Legacy => "CR8_LEGACY", ExtendedFeatures, Ecx, 4;
    /// LZCNT
    Lzcnt => "LZCNT", ExtendedFeatures, Ecx, 5;
    /// Advanced bit manipulation (AMD name of LZCNT)
    Abm => "ABM", ExtendedFeatures, Ecx, 5;
    /// SSE4a
    Sse4a => "SSE4A", ExtendedFeatures, Ecx, 6;
    /// Misaligned SSE mode
    MisalignSse => "MISALIGNSSE", ExtendedFeatures, Ecx, 7;
    /// PREFETCH/PREFETCHW
    Prefetchw => "PREFETCHW", ExtendedFeatures, Ecx, 8;
    /// OS visible workaround
    Osvw => "OSVW", ExtendedFeatures, Ecx, 9;
    /// Instruction based sampling
    Ibs => "IBS", ExtendedFeatures, Ecx, 10;
    /// Extended operations
    Xop => "XOP", ExtendedFeatures, Ecx, 11;
    /// SKINIT/STGI
    Skinit => "SKINIT", ExtendedFeatures, Ecx, 12;
    /// Watchdog timer
    Wdt => "WDT", ExtendedFeatures, Ecx, 13;
    /// Lightweight profiling
    Lwp => "LWP", ExtendedFeatures, Ecx, 15;
    /// Four-operand fused multiply-add
    Fma4 => "FMA4", ExtendedFeatures, Ecx, 16;
    /// Translation cache extension
    Tce => "TCE", ExtendedFeatures, Ecx, 17;
    /// Trailing bit manipulation
    Tbm => "TBM", ExtendedFeatures, Ecx, 21;
    /// Topology extensions
    Topoext => "TOPOEXT", ExtendedFeatures, Ecx, 22;

    // -------------------------------------------------------------------------
    // Leaf 0x8000_0001, EDX
    // -------------------------------------------------------------------------
    /// SYSCALL/SYSRET
    Syscall => "SYSCALL", ExtendedFeatures, Edx, 11;
    /// No-execute page protection
    Nx => "NX", ExtendedFeatures, Edx, 20;
    /// Extended MMX
    MmxExt => "MMXEXT", ExtendedFeatures, Edx, 22;
    /// FXSAVE/FXRSTOR optimizations
    FxsrOpt => "FXSR_OPT", ExtendedFeatures, Edx, 25;
    /// 1 GiB pages
    Pdpe1gb => "PDPE1GB", ExtendedFeatures, Edx, 26;
    /// RDTSCP
    Rdtscp => "RDTSCP", ExtendedFeatures, Edx, 27;
    /// Long mode
    Lm => "LM", ExtendedFeatures, Edx, 29;
    /// Extended 3DNow!
    Amd3dnowExt => "3DNOWEXT", ExtendedFeatures, Edx, 30;
    /// 3DNow!
    Amd3dnow => "3DNOW", ExtendedFeatures, Edx, 31;
}
