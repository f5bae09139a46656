//! Level evaluation and whole-processor classification.

use core::fmt;

use x86v_hal::CpuidSnapshot;

use super::check::{DefaultCheck, LevelCheck, Tally};
use super::matched::MatchedFeatures;
use super::{Level, LevelProfile};
use crate::feature::has;

bitflags::bitflags! {
    /// Set of supported levels
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SupportedLevels: u8 {
        /// x86-64 v1
        const V1 = 1 << 0;
        /// x86-64 v2
        const V2 = 1 << 1;
        /// x86-64 v3
        const V3 = 1 << 2;
        /// x86-64 v4
        const V4 = 1 << 3;
    }
}

impl SupportedLevels {
    /// Whether `level` is in the set
    pub fn contains_level(self, level: Level) -> bool {
        self.contains(level.into())
    }
}

impl From<Level> for SupportedLevels {
    fn from(level: Level) -> Self {
        SupportedLevels::from_bits_retain(1 << (level.number() - 1))
    }
}

// =============================================================================
// EVALUATION
// =============================================================================

/// Outcome of evaluating one level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelEvaluation {
    /// Evaluated level
    pub level: Level,
    /// Whether the level is supported
    pub supported: bool,
    /// Sum of the bit indices of present required features
    pub checksum: u32,
    /// Names of the present required features; empty when unsupported
    pub matched: MatchedFeatures,
}

impl fmt::Display for LevelEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.supported {
            write!(f, "x86-64 {} supported ({})", self.level, self.matched)
        } else {
            write!(f, "x86-64 {} not supported", self.level)
        }
    }
}

/// Evaluates level profiles against a snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier<C = DefaultCheck> {
    check: C,
}

impl Classifier {
    /// Classifier using [`DefaultCheck`]
    pub const fn new() -> Self {
        Self {
            check: DefaultCheck {},
        }
    }
}

impl<C: LevelCheck> Classifier<C> {
    /// Classifier using a specific check
    pub const fn with_check(check: C) -> Self {
        Self { check }
    }

    /// Evaluate `profile`, writing matched names into `matched`.
    ///
    /// `matched` is cleared first. Returns the support decision and the tally.
    pub fn evaluate_into(
        &self,
        profile: &LevelProfile,
        snapshot: &CpuidSnapshot,
        matched: &mut MatchedFeatures,
    ) -> (bool, Tally) {
        matched.clear();
        let mut tally = Tally::default();

        for &feature in profile.features {
            if has(feature, snapshot) {
                let info = feature.info();
                log::trace!("{}: {} present at {}", profile.level, info.name, info.location);
                tally.record(info.location.bit);
                matched.push(info.name);
            }
        }

        let supported = self.check.is_supported(profile, &tally);
        log::debug!(
            "{}: checksum {} of {}, {} of {} features, supported={}",
            profile.level,
            tally.checksum,
            profile.expected_checksum,
            tally.matched,
            profile.features.len(),
            supported
        );
        (supported, tally)
    }

    /// Evaluate one profile
    pub fn evaluate(&self, profile: &LevelProfile, snapshot: &CpuidSnapshot) -> LevelEvaluation {
        let mut matched = MatchedFeatures::with_capacity(profile.features.len());
        self.finish(profile, snapshot, &mut matched)
    }

    /// Evaluate every level, reusing one name list across levels
    pub fn classify(&self, snapshot: &CpuidSnapshot) -> Classification {
        let capacity = LevelProfile::ALL
            .iter()
            .map(|profile| profile.features.len())
            .max()
            .unwrap_or(0);
        let mut scratch = MatchedFeatures::with_capacity(capacity);
        let evaluations =
            Level::ALL.map(|level| self.finish(level.profile(), snapshot, &mut scratch));
        Classification { evaluations }
    }

    fn finish(
        &self,
        profile: &LevelProfile,
        snapshot: &CpuidSnapshot,
        scratch: &mut MatchedFeatures,
    ) -> LevelEvaluation {
        let (supported, tally) = self.evaluate_into(profile, snapshot, scratch);
        let matched = if supported {
            scratch.clone()
        } else {
            MatchedFeatures::new()
        };
        LevelEvaluation {
            level: profile.level,
            supported,
            checksum: tally.checksum,
            matched,
        }
    }
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Evaluations of all four levels, lowest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    evaluations: [LevelEvaluation; 4],
}

impl Classification {
    /// Every evaluation, lowest level first
    pub fn evaluations(&self) -> &[LevelEvaluation] {
        &self.evaluations
    }

    /// Evaluation of `level`
    pub fn get(&self, level: Level) -> &LevelEvaluation {
        &self.evaluations[usize::from(level.number() - 1)]
    }

    /// Supported levels as a set
    pub fn supported(&self) -> SupportedLevels {
        self.iter_supported()
            .fold(SupportedLevels::empty(), |set, eval| set | SupportedLevels::from(eval.level))
    }

    /// Highest supported level, if any
    pub fn highest(&self) -> Option<Level> {
        self.iter_supported().map(|eval| eval.level).last()
    }

    /// Supported evaluations, lowest level first
    pub fn iter_supported(&self) -> impl Iterator<Item = &LevelEvaluation> + '_ {
        self.evaluations.iter().filter(|eval| eval.supported)
    }
}

// =============================================================================
// TESTS
// =============================================================================
