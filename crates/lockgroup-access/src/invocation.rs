//! Request parsing at the process boundary
//!
//! Terminal software shells out with positional arguments. A request is
//! malformed when the argument count is wrong or the GUI identifier is not an
//! integer; malformed requests never reach a registry.

use lockgroup_core::GuiId;
use std::ffi::OsString;

/// Why positional arguments could not be turned into a request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedRequest {
    /// Wrong number of positional arguments
    #[error("expected {expected} argument(s), got {found}")]
    Arity {
        /// Arguments the operation takes
        expected: usize,
        /// Arguments received
        found: usize,
    },
    /// GUI identifier is not an integer
    #[error("GUI identifier is not an integer: {value:?}")]
    GuiId {
        /// Raw argument
        value: String,
    },
    /// An argument holds bytes that are not UTF-8
    #[error("argument {position} is not valid UTF-8")]
    NotUtf8 {
        /// Zero-based index among the operation arguments
        position: usize,
    },
    /// The command line itself was rejected before any operation ran
    #[error("unparsable command line: {message}")]
    Unparsable {
        /// Parser diagnostic
        message: String,
    },
}

/// Decode raw process arguments
///
/// Undecodable bytes are replaced so the arguments can still be audited; the
/// first argument that needed replacing is reported as the reason the request
/// is malformed.
pub fn decode_arguments(raw: &[OsString]) -> (Vec<String>, Option<MalformedRequest>) {
    let undecodable = raw
        .iter()
        .position(|arg| arg.to_str().is_none())
        .map(|position| MalformedRequest::NotUtf8 { position });
    let args = raw
        .iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    (args, undecodable)
}

fn parse_gui_id(raw: &str) -> Result<GuiId, MalformedRequest> {
    raw.parse().map_err(|_| MalformedRequest::GuiId {
        value: raw.to_string(),
    })
}

/// `verify <guiId> <credential>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyRequest {
    /// Terminal front-end identifier
    pub gui_id: GuiId,
    /// Credential as typed, before normalization
    pub credential: String,
}

impl VerifyRequest {
    /// Parse from positional arguments
    pub fn from_args(args: &[String]) -> Result<Self, MalformedRequest> {
        match args {
            [gui_id, credential] => Ok(Self {
                gui_id: parse_gui_id(gui_id)?,
                credential: credential.clone(),
            }),
            _ => Err(MalformedRequest::Arity {
                expected: 2,
                found: args.len(),
            }),
        }
    }
}

/// `status <guiId>` and `close <guiId>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRequest {
    /// Terminal front-end identifier
    pub gui_id: GuiId,
}

impl GroupRequest {
    /// Parse from positional arguments
    pub fn from_args(args: &[String]) -> Result<Self, MalformedRequest> {
        match args {
            [gui_id] => Ok(Self {
                gui_id: parse_gui_id(gui_id)?,
            }),
            _ => Err(MalformedRequest::Arity {
                expected: 1,
                found: args.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn verify_needs_exactly_two_arguments() {
        assert_eq!(
            VerifyRequest::from_args(&args(&["5"])),
            Err(MalformedRequest::Arity {
                expected: 2,
                found: 1
            })
        );
        assert!(VerifyRequest::from_args(&args(&["5", "1", "2"])).is_err());
        assert!(VerifyRequest::from_args(&[]).is_err());

        let request = VerifyRequest::from_args(&args(&["5", "1234 "])).unwrap();
        assert_eq!(request.gui_id, GuiId(5));
        assert_eq!(request.credential, "1234 ");
    }

    #[test]
    fn gui_id_must_be_integer() {
        assert_eq!(
            VerifyRequest::from_args(&args(&["five", "1234"])),
            Err(MalformedRequest::GuiId {
                value: "five".to_string()
            })
        );
        assert!(GroupRequest::from_args(&args(&["5.0"])).is_err());
    }

    #[test]
    fn utf8_arguments_decode_unchanged() {
        let raw = vec![OsString::from("5"), OsString::from("1234")];
        assert_eq!(decode_arguments(&raw), (args(&["5", "1234"]), None));
    }

    #[cfg(unix)]
    #[test]
    fn undecodable_argument_is_reported_by_position() {
        use std::os::unix::ffi::OsStringExt;

        let raw = vec![OsString::from("5"), OsString::from_vec(vec![b'1', 0xff])];
        let (decoded, reason) = decode_arguments(&raw);
        assert_eq!(decoded, vec!["5".to_string(), "1\u{fffd}".to_string()]);
        assert_eq!(reason, Some(MalformedRequest::NotUtf8 { position: 1 }));
    }

    #[test]
    fn group_request_needs_exactly_one_argument() {
        assert_eq!(
            GroupRequest::from_args(&args(&[" 7"])),
            Ok(GroupRequest { gui_id: GuiId(7) })
        );
        assert!(GroupRequest::from_args(&args(&["7", "8"])).is_err());
    }
}
