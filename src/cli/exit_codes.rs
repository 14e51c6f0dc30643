//! Exit codes for the CLI
//!
//! Standard exit codes used by resc-rules so scripts can tell a rejected
//! request from an unreachable backend.
//!
//! # Exit Code Reference
//!
//! | Code | Constant | Meaning | Example |
//! |------|----------|---------|---------|
//! | 0 | `SUCCESS` | Success | Rule packs listed |
//! | 1 | `API_ERROR` | Backend rejected the request | 404 unknown rule pack version |
//! | 2 | `NETWORK_ERROR` | Backend unreachable | Connection refused, timeout |
//! | 3 | `ERROR` | Runtime error | Invalid config file, unreadable rule file |
//! | 4 | `INVALID_ARGS` | Invalid arguments | Refusing to overwrite a config file |

use crate::error::{RulesClientError, TransportError};

/// Success - command completed normally.
pub const SUCCESS: i32 = 0;

/// The backend answered with a non-2xx status.
pub const API_ERROR: i32 = 1;

/// The backend could not be reached (connection failure or timeout).
pub const NETWORK_ERROR: i32 = 2;

/// Runtime error (configuration, file system, unparsable response).
pub const ERROR: i32 = 3;

/// Invalid arguments.
pub const INVALID_ARGS: i32 = 4;

/// Exit code for a failed command
pub fn for_error(error: &anyhow::Error) -> i32 {
    let transport = error.downcast_ref::<TransportError>().or_else(|| {
        match error.downcast_ref::<RulesClientError>() {
            Some(RulesClientError::Transport(inner)) => Some(inner),
            _ => None,
        }
    });

    match transport {
        Some(TransportError::Status { .. }) => API_ERROR,
        Some(TransportError::Network { .. }) | Some(TransportError::Timeout { .. }) => {
            NETWORK_ERROR
        }
        _ => ERROR,
    }
}
