//! Data-link stage: 14-byte frame header and minimum-frame padding.
//!
//! # Frame Format
//!
//! ```text
//! +-------------------+
//! | source (6)        |  this stage's own address
//! +-------------------+
//! | destination (6)   |  receiving stage's address
//! +-------------------+
//! | type tag (2)      |  upper-layer protocol, e.g. 0x08 0x00
//! +-------------------+
//! | SDU               |  46..=1500 bytes; shorter SDUs are zero-padded
//! | (variable)        |  up to the 46-byte minimum
//! +-------------------+
//! ```
//!
//! # Padding and Trim
//!
//! SDUs shorter than 46 bytes are right-padded with zero bytes on send.
//! On receipt the padding is removed by scanning from the end for the
//! last non-zero byte. The frame carries no explicit length field, so
//! this trim is lossy for SDUs that legitimately end in zero bytes; that
//! is a documented contract of this stack, not an accident. Upper layers
//! that care must avoid zero-valued trailing bytes.

use crate::address::{LinkAddr, LINK_ADDR_LEN};
use crate::error::{LinkError, Result};

/// Type tag width in bytes
pub const TYPE_TAG_LEN: usize = 2;

/// Frame header width in bytes: two addresses plus the type tag
pub const HEADER_LEN: usize = 2 * LINK_ADDR_LEN + TYPE_TAG_LEN;

/// Maximum SDU the frame payload can carry
pub const MAX_SDU: usize = 1500;

/// Minimum frame payload; shorter SDUs are padded up to this
pub const MIN_SDU: usize = 46;

/// Everything the data-link stage needs for one send.
#[derive(Debug, Clone)]
pub struct LinkRequest {
    /// Destination data-link address
    pub dest: LinkAddr,

    /// Upper-layer protocol tag
    pub type_tag: [u8; TYPE_TAG_LEN],

    /// Service data unit handed down from the network stage
    pub sdu: Vec<u8>,
}

/// The data-link stage, bound to one source address for its lifetime.
#[derive(Debug, Clone)]
pub struct DataLink {
    source: LinkAddr,
}

impl DataLink {
    pub fn new(source: LinkAddr) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &LinkAddr {
        &self.source
    }

    /// Build a frame from a request: validate, pad, prepend the header.
    ///
    /// # Errors
    /// `LinkError::SduTooLarge` if the SDU exceeds [`MAX_SDU`].
    pub fn request(&self, req: LinkRequest) -> Result<Vec<u8>> {
        if req.sdu.len() > MAX_SDU {
            return Err(LinkError::SduTooLarge {
                len: req.sdu.len(),
                max: MAX_SDU,
            }
            .into());
        }

        let payload_len = req.sdu.len().max(MIN_SDU);
        let mut frame = Vec::with_capacity(HEADER_LEN + payload_len);
        frame.extend_from_slice(self.source.as_bytes());
        frame.extend_from_slice(req.dest.as_bytes());
        frame.extend_from_slice(&req.type_tag);
        frame.extend_from_slice(&req.sdu);
        // Minimum-frame padding
        frame.resize(HEADER_LEN + payload_len, 0);
        Ok(frame)
    }

    /// Process a received frame.
    ///
    /// Returns `Ok(None)` when the destination address is not ours (the
    /// no-match sentinel), otherwise the SDU with header stripped and
    /// trailing zero padding trimmed.
    ///
    /// # Errors
    /// `LinkError::FrameTooShort` if the frame cannot hold a header.
    pub fn indication(&self, frame: &[u8]) -> Result<Option<Vec<u8>>> {
        if frame.len() < HEADER_LEN {
            return Err(LinkError::FrameTooShort {
                required: HEADER_LEN,
                actual: frame.len(),
            }
            .into());
        }

        let dest = &frame[LINK_ADDR_LEN..2 * LINK_ADDR_LEN];
        if dest != self.source.as_bytes() {
            return Ok(None);
        }

        let padded = &frame[HEADER_LEN..];
        // Recover the SDU length by scanning for the last non-zero byte
        let sdu_len = padded
            .iter()
            .rposition(|&byte| byte != 0)
            .map_or(0, |pos| pos + 1);
        Ok(Some(padded[..sdu_len].to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn stage() -> DataLink {
        DataLink::new(LinkAddr::from_bytes(b"src-la").unwrap())
    }

    fn request_to_self(sdu: Vec<u8>) -> LinkRequest {
        LinkRequest {
            dest: LinkAddr::from_bytes(b"src-la").unwrap(),
            type_tag: [0x08, 0x00],
            sdu,
        }
    }

    #[test]
    fn test_round_trip_with_padding() {
        let link = stage();
        let sdu = vec![7u8; 40];
        let frame = link.request(request_to_self(sdu.clone())).unwrap();
        // Padded to the 46-byte minimum
        assert_eq!(frame.len(), HEADER_LEN + MIN_SDU);

        let recovered = link.indication(&frame).unwrap().unwrap();
        assert_eq!(recovered, sdu);
    }

    #[test]
    fn test_round_trip_without_padding() {
        let link = stage();
        let sdu: Vec<u8> = (0..200).map(|i| (i % 251 + 1) as u8).collect();
        let frame = link.request(request_to_self(sdu.clone())).unwrap();
        assert_eq!(frame.len(), HEADER_LEN + sdu.len());

        let recovered = link.indication(&frame).unwrap().unwrap();
        assert_eq!(recovered, sdu);
    }

    #[test]
    fn test_header_layout() {
        let link = stage();
        let dest = LinkAddr::from_bytes(b"dst-la").unwrap();
        let frame = link
            .request(LinkRequest {
                dest,
                type_tag: [0x08, 0x00],
                sdu: vec![1u8; 46],
            })
            .unwrap();
        assert_eq!(&frame[0..6], b"src-la");
        assert_eq!(&frame[6..12], b"dst-la");
        assert_eq!(&frame[12..14], &[0x08, 0x00]);
        assert_eq!(&frame[14..], &[1u8; 46][..]);
    }

    #[test]
    fn test_sdu_too_large() {
        let link = stage();
        let result = link.request(request_to_self(vec![0u8; MAX_SDU + 1]));
        assert!(matches!(
            result,
            Err(Error::Link(LinkError::SduTooLarge { len: 1501, .. }))
        ));
    }

    #[test]
    fn test_max_sdu_accepted() {
        let link = stage();
        let sdu = vec![9u8; MAX_SDU];
        let frame = link.request(request_to_self(sdu.clone())).unwrap();
        assert_eq!(link.indication(&frame).unwrap().unwrap(), sdu);
    }

    #[test]
    fn test_address_mismatch_is_no_match() {
        let link = stage();
        let other = DataLink::new(LinkAddr::from_bytes(b"other!").unwrap());
        let frame = link.request(request_to_self(vec![5u8; 50])).unwrap();
        assert!(other.indication(&frame).unwrap().is_none());
    }

    #[test]
    fn test_frame_too_short() {
        let link = stage();
        let result = link.indication(&[0u8; HEADER_LEN - 1]);
        assert!(matches!(
            result,
            Err(Error::Link(LinkError::FrameTooShort { .. }))
        ));
    }

    #[test]
    fn test_trim_removes_payload_trailing_zeros() {
        // Documented lossy contract: an SDU that legitimately ends in
        // zero bytes comes back shorter, padding or not.
        let link = stage();
        let sdu = vec![1, 2, 3, 0, 0];
        let frame = link.request(request_to_self(sdu)).unwrap();
        let recovered = link.indication(&frame).unwrap().unwrap();
        assert_eq!(recovered, vec![1, 2, 3]);
    }

    #[test]
    fn test_all_zero_sdu_trims_to_empty() {
        let link = stage();
        let frame = link.request(request_to_self(vec![0u8; 30])).unwrap();
        let recovered = link.indication(&frame).unwrap().unwrap();
        assert!(recovered.is_empty());
    }
}
