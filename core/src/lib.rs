//! # x86v Core
//!
//! Feature decoding and x86-64 microarchitecture level classification on top
//! of the [`x86v_hal`] query layer.
//!
//! ## Components
//!
//! - **Feature table**: maps every named feature to the CPUID bit reporting it
//! - **Level classifier**: evaluates the v1, v2, v3 and v4 profiles
//! - **Report**: renders the supported levels as text
//!
//! ## Levels
//!
//! The four levels are evaluated independently. A processor exposing the
//! v4 bits but lacking a v2 bit reports v4 and not v2; nothing here infers
//! one level from another.
//!
//! ## Usage
//!
//! ```rust,no_run
//! let classification = x86v_core::classify();
//! print!("{}", x86v_core::Report::new(&classification));
//! ```

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod error;
pub mod feature;
pub mod level;
pub mod report;

use x86v_hal::{CpuidSnapshot, NativeCpuid};

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use error::{Error, Result};
pub use feature::{has, CpuFeatures, Feature, FeatureInfo, FeatureLocation, VendorGate};
pub use level::{
    checksum_of, ChecksumCheck, Classification, Classifier, DefaultCheck, ExactSetCheck, Level,
    LevelCheck, LevelEvaluation, LevelProfile, MatchedFeatures, SupportedLevels, Tally,
};
pub use report::Report;

/// Evaluate one level against the executing processor
pub fn evaluate_level(profile: &LevelProfile) -> LevelEvaluation {
    let snapshot = CpuidSnapshot::capture(&NativeCpuid);
    Classifier::new().evaluate(profile, &snapshot)
}

/// Classify the executing processor against every level
pub fn classify() -> Classification {
    let snapshot = CpuidSnapshot::capture(&NativeCpuid);
    log::debug!("Classifying {:?} processor", snapshot.vendor());
    Classifier::new().classify(&snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_baseline() {
        let classification = classify();
        #[cfg(target_arch = "x86_64")]
        {
            // Every x86_64 processor executing this test has SSE2 and SCE.
            let v1 = evaluate_level(Level::V1.profile());
            assert!(v1.checksum >= 26);
            assert_eq!(classification.get(Level::V1).checksum, v1.checksum);
        }
        assert_eq!(classification.evaluations().len(), Level::ALL.len());
    }
}
