//! Error types for ClearPath-SC parameter operations.

use crate::types::NodeId;
use thiserror::Error;

/// Result type alias for parameter operations.
pub type Result<T> = std::result::Result<T, ParamError>;

/// Error types for node parameter access.
#[derive(Error, Debug)]
pub enum ParamError {
    /// Failure reported by the transport collaborator
    #[error("Transport error: {0}")]
    Transport(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Communication timeout (no response from node)
    #[error("Communication timeout")]
    Timeout,

    /// Node is not a ClearPath-SC class device
    #[error("Wrong node type: device type {device_type:#04x}")]
    WrongNodeType {
        /// Device type code reported by the node
        device_type: u8,
    },

    /// Invalid mode, channel or value shape
    #[error("Bad argument: {0}")]
    BadArgument(String),

    /// Parameter id is not present in any bank
    #[error("Unknown parameter: {id}")]
    UnknownParameter {
        /// Requested parameter id
        id: u16,
    },

    /// Node has not been set up (or was removed)
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    /// Response didn't match expected format
    #[error("Invalid response: expected {expected}, got {actual}")]
    ResponseFormat {
        /// Expected response format
        expected: String,
        /// Actual response received
        actual: String,
    },

    /// Placeholder descriptor or parameter gated by firmware version
    #[error("Parameter {id} not supported by this node")]
    NotSupported {
        /// Parameter id
        id: u16,
    },

    /// Write attempted on a read-only storage class
    #[error("Parameter {id} is read-only")]
    ReadOnly {
        /// Parameter id
        id: u16,
    },

    /// Write attempted on a factory parameter without factory access
    #[error("Parameter {id} requires factory access")]
    FactoryOnly {
        /// Parameter id
        id: u16,
    },

    /// Operation has been retired
    #[error("Deprecated operation: {0}")]
    Deprecated(&'static str),
}

impl ParamError {
    pub(crate) fn response_len(expected: impl Into<String>, actual: usize) -> Self {
        ParamError::ResponseFormat {
            expected: expected.into(),
            actual: format!("{} bytes", actual),
        }
    }
}
