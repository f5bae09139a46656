//! # x86v Hardware Query Layer
//!
//! Issues the CPUID instruction and hands the raw register values to the
//! rest of the detector as immutable snapshots.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                      HARDWARE QUERY LAYER                     │
//! ├───────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐   ┌──────────────┐   ┌───────────────────┐  │
//! │  │ CpuidSource  │──▶│ CpuidSnapshot│──▶│ Vendor (leaf 0)   │  │
//! │  │ native/static│   │ one per leaf │   │ Intel / Other     │  │
//! │  └──────────────┘   └──────────────┘   └───────────────────┘  │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cpuid`]: leaves, registers, snapshots and the instruction wrapper
//! - [`vendor`]: vendor string classification
//! - [`snapshot`]: per-leaf capture used by the feature table
//!
//! ## Usage
//!
//! ```rust,no_run
//! use x86v_hal::{CpuidSnapshot, Leaf, NativeCpuid, Register};
//!
//! let snapshot = CpuidSnapshot::capture(&NativeCpuid);
//! let sse2 = snapshot.leaf(Leaf::Features).bit(Register::Edx, 26);
//! println!("{:?} sse2={}", snapshot.vendor(), sse2);
//! ```

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

cfg_if::cfg_if! {
    if #[cfg(any(target_arch = "x86", target_arch = "x86_64"))] {
        pub mod cpuid;
        pub mod snapshot;
        pub mod vendor;
    } else {
        compile_error!("x86v only supports x86 and x86_64 targets: CPUID is unavailable");
    }
}

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use cpuid::{cpuid, CpuidSource, Leaf, NativeCpuid, Register, RegisterSnapshot};
pub use snapshot::{CpuidSnapshot, StaticCpuid};
pub use vendor::Vendor;
