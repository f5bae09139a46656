//! # Error Types

use alloc::string::String;
use core::fmt;

/// Result type for classifier operations
pub type Result<T> = core::result::Result<T, Error>;

/// Main error type for the feature table and classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No feature has this display name
    UnknownFeature(String),
    /// Not a level name
    UnknownLevel(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFeature(name) => write!(f, "Unknown feature: {name}"),
            Self::UnknownLevel(name) => write!(f, "Unknown x86-64 level: {name}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::UnknownFeature("avx1024".into()).to_string(),
            "Unknown feature: avx1024"
        );
        assert_eq!(Error::UnknownLevel("v5".into()).to_string(), "Unknown x86-64 level: v5");
    }
}
