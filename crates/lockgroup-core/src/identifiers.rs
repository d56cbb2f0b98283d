//! Integer identifiers used by the registries
//!
//! The registry files store every identifier as a plain signed integer. Each
//! gets its own newtype so a GUI identifier can never be passed where a
//! terminal identifier is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Create from a raw integer
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Get the raw integer
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

integer_id! {
    /// Identifier a terminal's front-end supplies with every request
    GuiId
}

integer_id! {
    /// Primary identity of a physical terminal
    TerminalId
}

integer_id! {
    /// Lock group whose physical lock is controlled together
    GroupId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signed_and_padded_integers() {
        assert_eq!("5".parse::<GuiId>().unwrap(), GuiId(5));
        assert_eq!(" 7 ".parse::<GuiId>().unwrap(), GuiId(7));
        assert_eq!("+12".parse::<TerminalId>().unwrap(), TerminalId(12));
        assert_eq!("-3".parse::<GroupId>().unwrap(), GroupId(-3));
    }

    #[test]
    fn rejects_non_integers() {
        assert!("abc".parse::<GuiId>().is_err());
        assert!("1.5".parse::<GuiId>().is_err());
        assert!("".parse::<GuiId>().is_err());
    }

    #[test]
    fn displays_bare_value() {
        assert_eq!(TerminalId(101).to_string(), "101");
        assert_eq!(i64::from(GroupId::new(2)), 2);
    }
}
