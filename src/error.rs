// ABOUTME: Error types for the wire codec, session engine, and segmenter
// ABOUTME: Mirrors the split between low-level decode failures and client-facing session failures

use crate::pdu::CommandStatus;
use std::io;

/// Failures that occur while decoding or encoding a single PDU's primitive
/// fields or body. These never leave the framing/parsing layer without being
/// wrapped by a higher-level error: a codec error on an inbound PDU means the
/// byte stream can no longer be trusted to stay aligned.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("short read: needed {needed} bytes, had {available}")]
    ShortRead { needed: usize, available: usize },

    #[error("c-octet string exceeded max length {max} without a terminator")]
    MissingTerminator { max: usize },

    #[error("header too short: {len} bytes, need at least 16")]
    HeaderTooShort { len: usize },

    #[error("pdu length {length} out of bounds [{min}, {max}]")]
    InvalidPduLength { length: u32, min: u32, max: u32 },

    #[error("body truncated while reading field `{field}`")]
    TruncatedBody { field: &'static str },

    #[error("invalid utf-8 in field `{field}`")]
    Utf8Error { field: &'static str },

    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Client-facing session and protocol failures.
#[derive(Debug, thiserror::Error)]
pub enum SmppError {
    #[error("transport error: {0}")]
    Transport(#[from] io::Error),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("operation timed out")]
    Timeout,

    #[error("bind failed: {0:?}")]
    BindFailed(CommandStatus),

    #[error("submit failed: {0:?}")]
    SubmitFailed(CommandStatus),

    #[error("query failed: {0:?}")]
    QueryFailed(CommandStatus),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("session is not in the required state: {0}")]
    InvalidState(String),

    #[error("transport is closed")]
    TransportClosed,

    #[error("unsupported coding for message split")]
    UnsupportedCodingForSplit,
}

pub type SmppResult<T> = std::result::Result<T, SmppError>;

/// Segmentation policy failures, surfaced by the segmenter and wrapped into
/// `SmppError::UnsupportedCodingForSplit` at the façade boundary.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum SegmentError {
    #[error("data coding does not support splitting into multiple segments")]
    UnsupportedCodingForSplit,

    #[error("message requires more than 255 segments")]
    TooManySegments,
}
