//! Support decisions over an evaluation tally.

use super::LevelProfile;

/// Running totals of one profile evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Tally {
    /// Sum of the bit indices of present required features
    pub checksum: u32,
    /// Number of present required features
    pub matched: usize,
}

impl Tally {
    /// Account for one present feature at `bit`
    #[inline]
    pub fn record(&mut self, bit: u8) {
        self.checksum += u32::from(bit);
        self.matched += 1;
    }
}

/// Decides whether a level is supported from its tally
pub trait LevelCheck {
    /// Whether `tally` satisfies `profile`
    fn is_supported(&self, profile: &LevelProfile, tally: &Tally) -> bool;
}

/// Supported iff the checksum equals the profile's expected checksum.
///
/// Bit-0 features contribute nothing to the sum, so their absence cannot be
/// seen by this check. [`ExactSetCheck`] has no such blind spot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChecksumCheck;

impl LevelCheck for ChecksumCheck {
    #[inline]
    fn is_supported(&self, profile: &LevelProfile, tally: &Tally) -> bool {
        tally.checksum == profile.expected_checksum
    }
}

/// Supported iff every required feature is present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExactSetCheck;

impl LevelCheck for ExactSetCheck {
    #[inline]
    fn is_supported(&self, profile: &LevelProfile, tally: &Tally) -> bool {
        tally.matched == profile.features.len()
    }
}

impl<C: LevelCheck + ?Sized> LevelCheck for &C {
    fn is_supported(&self, profile: &LevelProfile, tally: &Tally) -> bool {
        (**self).is_supported(profile, tally)
    }
}

#[cfg(not(feature = "exact-match"))]
/// Check used by [`Classifier::new`](super::Classifier::new)
pub type DefaultCheck = ChecksumCheck;

#[cfg(feature = "exact-match")]
/// Check used by [`Classifier::new`](super::Classifier::new)
pub type DefaultCheck = ExactSetCheck;
