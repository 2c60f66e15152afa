//! Transport stage: 6-byte datagram header with ports and a length field.
//!
//! # Datagram Format
//!
//! ```text
//! +-------------------+
//! | source port (2)   |
//! +-------------------+
//! | dest port (2)     |
//! +-------------------+
//! | length (2)        |  big-endian u16, SDU length in bytes
//! +-------------------+
//! | SDU (0..=1472)    |
//! +-------------------+
//! ```
//!
//! The length field is written on send but not consulted on receive;
//! `indication` strips the fixed header and forwards whatever follows.
//! Trailing-byte recovery is the data link's trim contract, not ours.

use crate::address::{Port, PORT_LEN};
use crate::error::{Result, TransportError};

/// Length field width in bytes
pub const LENGTH_LEN: usize = 2;

/// Datagram header width in bytes
pub const HEADER_LEN: usize = 2 * PORT_LEN + LENGTH_LEN;

/// Largest SDU a datagram can carry
pub const MAX_SDU: usize = 1472;

/// Network protocol tag identifying this transport protocol.
pub const PROTOCOL_TAG: u8 = 17;

/// Everything the transport stage needs for one send.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// Destination port
    pub dest: Port,

    /// Service data unit handed down from the application stage
    pub sdu: Vec<u8>,
}

/// The transport stage, bound to one source port for its lifetime.
#[derive(Debug, Clone)]
pub struct Transport {
    source: Port,
}

impl Transport {
    pub fn new(source: Port) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Port {
        &self.source
    }

    /// Build a datagram from a request.
    ///
    /// # Errors
    /// `TransportError::SduTooLarge` if the SDU exceeds [`MAX_SDU`].
    pub fn request(&self, req: TransportRequest) -> Result<Vec<u8>> {
        if req.sdu.len() > MAX_SDU {
            return Err(TransportError::SduTooLarge {
                len: req.sdu.len(),
                max: MAX_SDU,
            }
            .into());
        }

        let length = req.sdu.len() as u16;
        let mut pdu = Vec::with_capacity(HEADER_LEN + req.sdu.len());
        pdu.extend_from_slice(self.source.as_bytes());
        pdu.extend_from_slice(req.dest.as_bytes());
        pdu.extend_from_slice(&length.to_be_bytes());
        pdu.extend_from_slice(&req.sdu);
        Ok(pdu)
    }

    /// Process a received datagram.
    ///
    /// Returns `Ok(None)` when the destination port is not ours,
    /// otherwise the SDU with the 6-byte header stripped.
    ///
    /// # Errors
    /// `TransportError::PduTooShort` if the datagram cannot hold a header.
    pub fn indication(&self, pdu: &[u8]) -> Result<Option<Vec<u8>>> {
        if pdu.len() < HEADER_LEN {
            return Err(TransportError::PduTooShort {
                required: HEADER_LEN,
                actual: pdu.len(),
            }
            .into());
        }

        let dest = &pdu[PORT_LEN..2 * PORT_LEN];
        if dest != self.source.as_bytes() {
            return Ok(None);
        }
        Ok(Some(pdu[HEADER_LEN..].to_vec()))
    }
}
