//! Network stage: 9-byte packet header, hard 8..=1480 payload window.
//!
//! # Packet Format
//!
//! ```text
//! +-------------------+
//! | source (4)        |
//! +-------------------+
//! | destination (4)   |
//! +-------------------+
//! | protocol (1)      |  upper-layer protocol tag, e.g. 17
//! +-------------------+
//! | SDU (8..=1480)    |
//! +-------------------+
//! ```
//!
//! Unlike the data link, this stage never pads: an SDU outside the
//! window is a hard error, not silently adjusted.

use crate::address::{NetAddr, NET_ADDR_LEN};
use crate::error::{NetworkError, Result};

/// Protocol tag width in bytes
pub const PROTOCOL_LEN: usize = 1;

/// Packet header width in bytes
pub const HEADER_LEN: usize = 2 * NET_ADDR_LEN + PROTOCOL_LEN;

/// Largest SDU a packet can carry
pub const MAX_SDU: usize = 1480;

/// Smallest SDU a packet can carry
pub const MIN_SDU: usize = 8;

/// Two-byte data-link type tag identifying this network protocol.
pub const LINK_TYPE_TAG: [u8; 2] = [0x08, 0x00];

/// Everything the network stage needs for one send.
#[derive(Debug, Clone)]
pub struct NetworkRequest {
    /// Destination network address
    pub dest: NetAddr,

    /// Upper-layer protocol tag
    pub protocol: u8,

    /// Service data unit handed down from the transport stage
    pub sdu: Vec<u8>,
}

/// The network stage, bound to one source address for its lifetime.
#[derive(Debug, Clone)]
pub struct Network {
    source: NetAddr,
}

impl Network {
    pub fn new(source: NetAddr) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &NetAddr {
        &self.source
    }

    /// Build a packet from a request.
    ///
    /// # Errors
    /// `NetworkError::SduOutOfWindow` if the SDU is outside 8..=1480.
    pub fn request(&self, req: NetworkRequest) -> Result<Vec<u8>> {
        if req.sdu.len() < MIN_SDU || req.sdu.len() > MAX_SDU {
            return Err(NetworkError::SduOutOfWindow {
                len: req.sdu.len(),
                min: MIN_SDU,
                max: MAX_SDU,
            }
            .into());
        }

        let mut pdu = Vec::with_capacity(HEADER_LEN + req.sdu.len());
        pdu.extend_from_slice(self.source.as_bytes());
        pdu.extend_from_slice(req.dest.as_bytes());
        pdu.push(req.protocol);
        pdu.extend_from_slice(&req.sdu);
        Ok(pdu)
    }

    /// Process a received packet.
    ///
    /// Returns `Ok(None)` when the destination address is not ours,
    /// otherwise the SDU with the 9-byte header stripped.
    ///
    /// # Errors
    /// `NetworkError::PduTooShort` if the packet cannot hold a header.
    pub fn indication(&self, pdu: &[u8]) -> Result<Option<Vec<u8>>> {
        if pdu.len() < HEADER_LEN {
            return Err(NetworkError::PduTooShort {
                required: HEADER_LEN,
                actual: pdu.len(),
            }
            .into());
        }

        let dest = &pdu[NET_ADDR_LEN..2 * NET_ADDR_LEN];
        if dest != self.source.as_bytes() {
            return Ok(None);
        }
        Ok(Some(pdu[HEADER_LEN..].to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn stage() -> Network {
        Network::new(NetAddr::from_bytes(b"srcn").unwrap())
    }

    fn request_to_self(sdu: Vec<u8>) -> NetworkRequest {
        NetworkRequest {
            dest: NetAddr::from_bytes(b"srcn").unwrap(),
            protocol: 17,
            sdu,
        }
    }

    #[test]
    fn test_round_trip() {
        let net = stage();
        let sdu = vec![3u8; 100];
        let pdu = net.request(request_to_self(sdu.clone())).unwrap();
        assert_eq!(pdu.len(), HEADER_LEN + 100);
        assert_eq!(net.indication(&pdu).unwrap().unwrap(), sdu);
    }

    #[test]
    fn test_header_layout() {
        let net = stage();
        let pdu = net
            .request(NetworkRequest {
                dest: NetAddr::from_bytes(b"dstn").unwrap(),
                protocol: 17,
                sdu: vec![0xaa; 8],
            })
            .unwrap();
        assert_eq!(&pdu[0..4], b"srcn");
        assert_eq!(&pdu[4..8], b"dstn");
        assert_eq!(pdu[8], 17);
        assert_eq!(&pdu[9..], &[0xaa; 8][..]);
    }

    #[test]
    fn test_window_boundaries() {
        let net = stage();
        assert!(net.request(request_to_self(vec![1u8; MIN_SDU])).is_ok());
        assert!(net.request(request_to_self(vec![1u8; MAX_SDU])).is_ok());

        assert!(matches!(
            net.request(request_to_self(vec![1u8; MIN_SDU - 1])),
            Err(Error::Network(NetworkError::SduOutOfWindow { len: 7, .. }))
        ));
        assert!(matches!(
            net.request(request_to_self(vec![1u8; MAX_SDU + 1])),
            Err(Error::Network(NetworkError::SduOutOfWindow { len: 1481, .. }))
        ));
    }

    #[test]
    fn test_address_mismatch_is_no_match() {
        let net = stage();
        let other = Network::new(NetAddr::from_bytes(b"else").unwrap());
        let pdu = net.request(request_to_self(vec![2u8; 20])).unwrap();
        assert!(other.indication(&pdu).unwrap().is_none());
    }

    #[test]
    fn test_pdu_too_short() {
        let net = stage();
        assert!(matches!(
            net.indication(&[0u8; HEADER_LEN - 1]),
            Err(Error::Network(NetworkError::PduTooShort { .. }))
        ));
    }
}
