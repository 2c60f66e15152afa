//! Error types for the stack simulation.
//!
//! All operations return structured errors rather than panicking.
//! Three failure domains exist, mirroring where things can go wrong:
//! - Construction: an address of the wrong width for its layer
//! - Per-call validation: an SDU outside a layer's size window
//! - Decoding: a structurally malformed line code
//!
//! An address mismatch during `indication` is deliberately NOT an error:
//! a frame addressed to somebody else is a routine outcome in a
//! broadcast-style receive loop, and stages signal it with `Ok(None)`.

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Address: wrong width at stage or endpoint construction
/// - Decode: structural problems in a 4B5B line code
/// - Link / Network / Transport: per-layer size and shape violations
/// - Assembly: fragmentation and reassembly state violations
#[derive(Debug, Error)]
pub enum Error {
    /// Address construction failed (wrong width for the layer)
    #[error("address error: {0}")]
    Address(#[from] AddressError),

    /// Line code could not be decoded
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Data-link layer validation failed
    #[error("data-link error: {0}")]
    Link(#[from] LinkError),

    /// Network layer validation failed
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// Transport layer validation failed
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Fragmentation or reassembly failed
    #[error("assembly error: {0}")]
    Assembly(#[from] AssemblyError),
}

/// Address width errors, raised when a stage or endpoint is built.
#[derive(Debug, Error)]
pub enum AddressError {
    /// Data-link addresses are exactly 6 bytes
    #[error("link address must be 6 bytes, got {0}")]
    LinkWidth(usize),

    /// Network addresses are exactly 4 bytes
    #[error("network address must be 4 bytes, got {0}")]
    NetWidth(usize),

    /// Transport ports are exactly 2 bytes
    #[error("port must be 2 bytes, got {0}")]
    PortWidth(usize),
}

/// Structural errors in a received 4B5B line code.
///
/// Each variant names the exact malformation so independently built
/// sender/receiver pairs can be debugged against each other.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Code does not begin with the J+K start marker
    #[error("start delimiter missing")]
    MissingStartDelimiter,

    /// Code does not end with the T+R end marker
    #[error("end delimiter missing")]
    MissingEndDelimiter,

    /// Body between the delimiters is not a whole number of 5-bit groups
    #[error("code body length {0} is not a multiple of 5")]
    MisalignedLength(usize),

    /// Body holds an odd number of groups; nibbles cannot pair into bytes
    #[error("code body holds {0} nibble groups, expected an even count")]
    OddNibbleCount(usize),

    /// A 5-bit group matches neither a data nibble nor a control symbol
    #[error("undefined 5-bit group {group:?} at symbol {index}")]
    UndefinedGroup { group: String, index: usize },

    /// A reserved control symbol appeared inside the payload
    #[error("control symbol {symbol} inside payload at symbol {index}")]
    ControlInPayload { symbol: char, index: usize },
}

/// Data-link layer errors.
#[derive(Debug, Error)]
pub enum LinkError {
    /// SDU exceeds the 1500-byte frame payload ceiling
    #[error("link SDU of {len} bytes exceeds maximum {max}")]
    SduTooLarge { len: usize, max: usize },

    /// Received frame is shorter than the 14-byte header
    #[error("frame too short: need at least {required} bytes, got {actual}")]
    FrameTooShort { required: usize, actual: usize },
}

/// Network layer errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// SDU is outside the 8..=1480 byte window
    #[error("network SDU of {len} bytes outside window {min}..={max}")]
    SduOutOfWindow { len: usize, min: usize, max: usize },

    /// Received PDU is shorter than the 9-byte header
    #[error("network PDU too short: need at least {required} bytes, got {actual}")]
    PduTooShort { required: usize, actual: usize },
}

/// Transport layer errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// SDU exceeds the 1472-byte datagram ceiling
    #[error("transport SDU of {len} bytes exceeds maximum {max}")]
    SduTooLarge { len: usize, max: usize },

    /// Received PDU is shorter than the 6-byte header
    #[error("transport PDU too short: need at least {required} bytes, got {actual}")]
    PduTooShort { required: usize, actual: usize },
}

/// Fragmentation and reassembly errors.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// Payload needs more fragments than a one-byte sequence number can tag
    #[error("payload needs {needed} fragments, sequence numbers allow at most {max}")]
    TooManyFragments { needed: usize, max: usize },

    /// Received frame SDU is empty; the sequence byte is mandatory
    #[error("fragment is missing its sequence byte")]
    MissingSequence,

    /// A completed message is still pending; take or reset it first
    #[error("completed message still pending; take or reset it before accepting new fragments")]
    CompletedPending,

    /// No completed message is available to take
    #[error("no completed message available")]
    NotComplete,
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
