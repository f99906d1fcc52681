//! Recall quality reported by the reviewer after seeing the answer.
use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Closed set of grades. Anything outside it is rejected by `TryFrom<u8>`
/// before it can reach the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewQuality {
    Fail,
    Good,
    Easy,
}

impl ReviewQuality {
    pub const ALL: [ReviewQuality; 3] = [Self::Fail, Self::Good, Self::Easy];

    pub fn ordinal(self) -> u8 {
        match self {
            Self::Fail => 0,
            Self::Good => 1,
            Self::Easy => 2,
        }
    }

    pub fn is_success(self) -> bool {
        self != Self::Fail
    }

    /// Button text shown in the review view.
    pub fn label(self) -> &'static str {
        match self {
            Self::Fail => "Again",
            Self::Good => "Good",
            Self::Easy => "Easy",
        }
    }
}

impl TryFrom<u8> for ReviewQuality {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Fail),
            1 => Ok(Self::Good),
            2 => Ok(Self::Easy),
            other => Err(Error::InvalidQuality(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_accepts_ordinals() {
        for quality in ReviewQuality::ALL {
            assert_eq!(ReviewQuality::try_from(quality.ordinal()).unwrap(), quality);
        }
    }

    #[test]
    fn test_try_from_rejects_out_of_range() {
        let err = ReviewQuality::try_from(3).unwrap_err();
        assert!(matches!(err, Error::InvalidQuality(3)));
        assert!(ReviewQuality::try_from(255).is_err());
    }

    #[test]
    fn test_only_fail_is_unsuccessful() {
        assert!(!ReviewQuality::Fail.is_success());
        assert!(ReviewQuality::Good.is_success());
        assert!(ReviewQuality::Easy.is_success());
        assert_eq!(ReviewQuality::Fail.label(), "Again");
    }
}
