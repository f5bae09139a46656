//! # Level Classifier
//!
//! Classifies the processor against the four cumulative x86-64
//! microarchitecture levels.
//!
//! Each [`LevelProfile`] lists its required features and an expected
//! checksum: the sum of the required features' bit indices. Evaluating a
//! profile walks the list, adds the bit index of every present feature to a
//! running [`Tally`] and records the feature's name in a [`MatchedFeatures`]
//! list. A [`LevelCheck`] then decides from the tally whether the level is
//! supported.
//!
//! | Level | Leaves read                      | Expected checksum |
//! |-------|----------------------------------|-------------------|
//! | v1    | 0x1 EDX                          | 132               |
//! | v2    | 0x1 ECX, 0x8000_0001 ECX         | 84                |
//! | v3    | 0x1 ECX, 0x7 EBX, 0x8000_0001 ECX| 139               |
//! | v4    | 0x7 EBX                          | 122               |

mod check;
mod classifier;
mod matched;

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use x86v_hal::Leaf;

use crate::error::Error;
use crate::feature::{bit_of, Feature};

pub use check::{ChecksumCheck, DefaultCheck, ExactSetCheck, LevelCheck, Tally};
pub use classifier::{Classification, Classifier, LevelEvaluation, SupportedLevels};
pub use matched::MatchedFeatures;

// =============================================================================
// LEVELS
// =============================================================================

/// x86-64 microarchitecture level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    /// Baseline x86-64
    V1 = 1,
    /// Nehalem-class: SSE4.2, POPCNT, CMPXCHG16B
    V2 = 2,
    /// Haswell-class: AVX2, BMI, FMA
    V3 = 3,
    /// AVX-512 (F, BW, CD, DQ, VL)
    V4 = 4,
}

impl Level {
    /// Every level, lowest first
    pub const ALL: [Level; 4] = [Level::V1, Level::V2, Level::V3, Level::V4];

    /// Level number, 1 to 4
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// The profile describing this level
    pub const fn profile(self) -> &'static LevelProfile {
        match self {
            Level::V1 => &V1,
            Level::V2 => &V2,
            Level::V3 => &V3,
            Level::V4 => &V4,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.number())
    }
}

impl FromStr for Level {
    type Err = Error;

    /// Accepts `3`, `v3` and `x86-64-v3`, ignoring ASCII case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        let rest = lower.strip_prefix("x86-64-").unwrap_or(&lower);
        let rest = rest.strip_prefix('v').unwrap_or(rest);
        match rest {
            "1" => Ok(Level::V1),
            "2" => Ok(Level::V2),
            "3" => Ok(Level::V3),
            "4" => Ok(Level::V4),
            _ => Err(Error::UnknownLevel(trimmed.to_string())),
        }
    }
}

// =============================================================================
// PROFILES
// =============================================================================

/// Required feature list and checksum of one level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProfile {
    /// Level this profile describes
    pub level: Level,
    /// Required features, in display order
    pub features: &'static [Feature],
    /// Sum of the required features' bit indices
    pub expected_checksum: u32,
}

impl LevelProfile {
    /// Every profile, lowest level first
    pub const ALL: [&'static LevelProfile; 4] = [&V1, &V2, &V3, &V4];

    /// Distinct leaves this profile reads, in query order
    pub fn leaves(&self) -> impl Iterator<Item = Leaf> + '_ {
        Leaf::FEATURE_LEAVES
            .into_iter()
            .filter(move |&leaf| self.features.iter().any(|f| f.location().leaf == leaf))
    }

    /// Whether `feature` is required by this profile
    pub fn requires(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }
}

/// Sum of the bit indices of `features`
pub const fn checksum_of(features: &[Feature]) -> u32 {
    let mut sum = 0u32;
    let mut i = 0;
    while i < features.len() {
        sum += bit_of(features[i]) as u32;
        i += 1;
    }
    sum
}

/// x86-64 v1 profile
pub const V1: LevelProfile = LevelProfile {
    level: Level::V1,
    features: &[
        Feature::Fpu,
        Feature::Cx8,
        Feature::Sce,
        Feature::Cmov,
        Feature::Mmx,
        Feature::Fxsr,
        Feature::Sse,
        Feature::Sse2,
    ],
    expected_checksum: 132,
};

/// x86-64 v2 profile
pub const V2: LevelProfile = LevelProfile {
    level: Level::V2,
    features: &[
        Feature::Cmpxchg16b,
        Feature::Popcnt,
        Feature::Sse3,
        Feature::Sse41,
        Feature::Sse42,
        Feature::Ssse3,
        Feature::LahfSahf,
    ],
    expected_checksum: 84,
};

/// x86-64 v3 profile
pub const V3: LevelProfile = LevelProfile {
    level: Level::V3,
    features: &[
        Feature::Avx,
        Feature::F16c,
        Feature::Fma,
        Feature::Movbe,
        Feature::Osxsave,
        Feature::Avx2,
        Feature::Bmi1,
        Feature::Bmi2,
        Feature::Lzcnt,
    ],
    expected_checksum: 139,
};

/// x86-64 v4 profile
pub const V4: LevelProfile = LevelProfile {
    level: Level::V4,
    features: &[
        Feature::Avx512F,
        Feature::Avx512Bw,
        Feature::Avx512Cd,
        Feature::Avx512Dq,
        Feature::Avx512Vl,
    ],
    expected_checksum: 122,
};

static_assertions::const_assert_eq!(checksum_of(V1.features), 132);
static_assertions::const_assert_eq!(checksum_of(V2.features), 84);
static_assertions::const_assert_eq!(checksum_of(V3.features), 139);
static_assertions::const_assert_eq!(checksum_of(V4.features), 122);

// =============================================================================
// TESTS
// =============================================================================
