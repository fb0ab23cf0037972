//! Errors that may occur when interacting with the RTC.

use core::{
    fmt,
    fmt::{
        Display,
        Formatter,
    },
};
#[cfg(feature = "serde")]
use serde::{
    Deserialize,
    Serialize,
};

/// Errors that may occur when interacting with the RTC.
///
/// Neither chip provides an acknowledgement signal beyond what its bus
/// offers, so these variants only cover failures of the underlying pin and
/// bus primitives. Data corrupted by violated wiring or timing is not
/// detectable and is returned as-is.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum Error {
    /// A chip-select, clock, or data pin transition could not be performed.
    Pin,
    /// A two-wire bus transaction was not acknowledged.
    Bus,
}

impl Display for Error {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match self {
            Self::Pin => formatter.write_str("an RTC pin transition failed"),
            Self::Bus => formatter.write_str("an RTC bus transaction was not acknowledged"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display_pin() {
        assert_eq!(format!("{}", Error::Pin), "an RTC pin transition failed");
    }

    #[test]
    fn display_bus() {
        assert_eq!(
            format!("{}", Error::Bus),
            "an RTC bus transaction was not acknowledged"
        );
    }
}
