//! Payload fragmentation and stateful reassembly.
//!
//! Payloads larger than 1464 bytes are split into fragments, each tagged
//! with a one-byte sequence number counting DOWN to zero; the seq-0
//! fragment is terminal and carries the (possibly smaller) tail.
//!
//! # Fragment Wire Form
//!
//! ```text
//! +-------------------+
//! | sequence (1)      |  count, count-1, ..., 1, 0
//! +-------------------+
//! | payload           |  <= 1464 bytes
//! | (variable)        |
//! +-------------------+
//! ```
//!
//! # Byte-Order Contract
//!
//! Fragments carry consecutive FORWARD slices of the payload: the first
//! fragment emitted (highest sequence number) carries bytes [0, 1464),
//! the next [1464, 2928), and the terminal fragment the tail remainder.
//! The receiver appends fragment payloads in arrival order, so feeding
//! frames back in transmission order reproduces the original bytes.
//! This contract is locked down by the round-trip tests below; do not
//! change one side without the other.
//!
//! # Reassembly State Machine
//!
//! ```text
//! Idle -> Accumulating   on the first fragment
//!      -> Complete       on the seq-0 fragment
//!      -> Idle           on reset (or take_completed, which subsumes it)
//! ```
//!
//! Accepting a fragment while a completed message is still pending is an
//! error: two independent messages must never merge silently.

use crate::error::{AssemblyError, Result};

/// Largest payload slice one fragment can carry
pub const MAX_FRAGMENT: usize = 1464;

/// Sequence number width in bytes
pub const SEQ_LEN: usize = 1;

/// Highest sequence number a single byte can tag
pub const MAX_SEQ: usize = u8::MAX as usize;

/// One slice of a payload, tagged for reassembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Descending sequence number; 0 marks the terminal fragment
    pub seq: u8,

    /// Payload slice, at most [`MAX_FRAGMENT`] bytes
    pub payload: Vec<u8>,
}

impl Fragment {
    /// Serialize into the wire form handed down to the transport stage.
    pub fn into_sdu(self) -> Vec<u8> {
        let mut sdu = Vec::with_capacity(SEQ_LEN + self.payload.len());
        sdu.push(self.seq);
        sdu.extend_from_slice(&self.payload);
        sdu
    }
}

/// Split a payload into fragments in transmission order.
///
/// A payload of at most [`MAX_FRAGMENT`] bytes yields a single seq-0
/// fragment. Larger payloads yield `len / 1464` full fragments with
/// sequence numbers counting down from that quotient, followed by the
/// terminal seq-0 fragment carrying `len % 1464` tail bytes. The
/// terminal fragment may be empty when the payload length is an exact
/// multiple of 1464; the stack rejects such sends further down (the
/// network window needs at least 8 bytes), matching the behavior this
/// simulation was built to demonstrate.
///
/// # Errors
/// `AssemblyError::TooManyFragments` when the quotient exceeds 255 and
/// cannot be tagged in one byte.
pub fn split(payload: &[u8]) -> Result<Vec<Fragment>> {
    if payload.len() <= MAX_FRAGMENT {
        return Ok(vec![Fragment {
            seq: 0,
            payload: payload.to_vec(),
        }]);
    }

    let count = payload.len() / MAX_FRAGMENT;
    if count > MAX_SEQ {
        return Err(AssemblyError::TooManyFragments {
            needed: count + 1,
            max: MAX_SEQ + 1,
        }
        .into());
    }

    let mut fragments = Vec::with_capacity(count + 1);
    for slot in 0..count {
        fragments.push(Fragment {
            seq: (count - slot) as u8,
            payload: payload[slot * MAX_FRAGMENT..(slot + 1) * MAX_FRAGMENT].to_vec(),
        });
    }
    fragments.push(Fragment {
        seq: 0,
        payload: payload[count * MAX_FRAGMENT..].to_vec(),
    });
    Ok(fragments)
}

/// Outcome of accepting one fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// More fragments are expected before the message completes
    MoreExpected,

    /// The terminal fragment arrived; the assembled buffer is retrievable
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Accumulating,
    Complete,
}

/// Per-receiver reassembly accumulator.
///
/// The only state in the whole stack that persists across calls. Owned
/// by exactly one receiver pipeline; the design assumes one in-flight
/// message per sender/receiver pair at a time.
#[derive(Debug, Clone)]
pub struct Reassembly {
    state: State,
    buffer: Vec<u8>,
}

impl Default for Reassembly {
    fn default() -> Self {
        Self::new()
    }
}

impl Reassembly {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            buffer: Vec::new(),
        }
    }

    /// Accept one fragment in wire form (sequence byte plus payload).
    ///
    /// # Errors
    /// - `AssemblyError::MissingSequence` for an empty frame SDU
    /// - `AssemblyError::CompletedPending` when a completed message has
    ///   not been taken or reset yet
    pub fn accept(&mut self, frame_sdu: &[u8]) -> Result<Status> {
        if self.state == State::Complete {
            return Err(AssemblyError::CompletedPending.into());
        }
        let (&seq, payload) = frame_sdu
            .split_first()
            .ok_or(AssemblyError::MissingSequence)?;

        self.buffer.extend_from_slice(payload);
        if seq == 0 {
            self.state = State::Complete;
            Ok(Status::Complete)
        } else {
            self.state = State::Accumulating;
            Ok(Status::MoreExpected)
        }
    }

    /// View of the assembled buffer, available once complete.
    pub fn assembled(&self) -> Option<&[u8]> {
        match self.state {
            State::Complete => Some(&self.buffer),
            _ => None,
        }
    }

    /// Move the completed message out, returning to `Idle`.
    ///
    /// Retrieval subsumes the reset: after this call the accumulator is
    /// ready for the next message, and stale bytes cannot leak into it.
    ///
    /// # Errors
    /// `AssemblyError::NotComplete` unless a terminal fragment arrived.
    pub fn take_completed(&mut self) -> Result<Vec<u8>> {
        if self.state != State::Complete {
            return Err(AssemblyError::NotComplete.into());
        }
        self.state = State::Idle;
        Ok(std::mem::take(&mut self.buffer))
    }

    /// Discard any accumulated state, from any state back to `Idle`.
    pub fn reset(&mut self) {
        self.state = State::Idle;
        self.buffer.clear();
    }

    /// True when nothing has been accumulated.
    pub fn is_idle(&self) -> bool {
        self.state == State::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_split_small_payload_single_terminal_fragment() {
        let fragments = split(&[5u8; 10]).unwrap();
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].seq, 0);
        assert_eq!(fragments[0].payload.len(), 10);
    }

    #[test]
    fn test_split_exact_limit_is_single_fragment() {
        let fragments = split(&[1u8; MAX_FRAGMENT]).unwrap();
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].seq, 0);
    }

    #[test]
    fn test_split_2000_bytes() {
        let payload: Vec<u8> = (0..2000).map(|i| (i % 256) as u8).collect();
        let fragments = split(&payload).unwrap();

        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].seq, 1);
        assert_eq!(fragments[0].payload, &payload[0..1464]);
        assert_eq!(fragments[1].seq, 0);
        assert_eq!(fragments[1].payload, &payload[1464..2000]);
    }

    #[test]
    fn test_split_forward_slices_descending_seq() {
        let payload: Vec<u8> = (0..4000).map(|i| (i % 256) as u8).collect();
        let fragments = split(&payload).unwrap();

        // 4000 = 2 * 1464 + 1072
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[0].seq, 2);
        assert_eq!(fragments[1].seq, 1);
        assert_eq!(fragments[2].seq, 0);
        assert_eq!(fragments[0].payload, &payload[0..1464]);
        assert_eq!(fragments[1].payload, &payload[1464..2928]);
        assert_eq!(fragments[2].payload, &payload[2928..4000]);
    }

    #[test]
    fn test_split_exact_multiple_has_empty_terminal() {
        let fragments = split(&[3u8; 2 * MAX_FRAGMENT]).unwrap();
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[2].seq, 0);
        assert!(fragments[2].payload.is_empty());
    }

    #[test]
    fn test_split_too_many_fragments() {
        let payload = vec![0u8; (MAX_SEQ + 1) * MAX_FRAGMENT];
        assert!(matches!(
            split(&payload),
            Err(Error::Assembly(AssemblyError::TooManyFragments { .. }))
        ));
    }

    #[test]
    fn test_fragment_wire_form() {
        let sdu = Fragment {
            seq: 3,
            payload: vec![0xaa, 0xbb],
        }
        .into_sdu();
        assert_eq!(sdu, vec![3, 0xaa, 0xbb]);
    }

    #[test]
    fn test_reassembly_round_trip() {
        let payload: Vec<u8> = (0..2000).map(|i| (i % 255 + 1) as u8).collect();
        let mut reassembly = Reassembly::new();

        let mut last = Status::MoreExpected;
        for fragment in split(&payload).unwrap() {
            last = reassembly.accept(&fragment.into_sdu()).unwrap();
        }
        assert_eq!(last, Status::Complete);
        assert_eq!(reassembly.take_completed().unwrap(), payload);
        assert!(reassembly.is_idle());
    }

    #[test]
    fn test_accept_after_complete_is_error() {
        let mut reassembly = Reassembly::new();
        assert_eq!(reassembly.accept(&[0, 1, 2]).unwrap(), Status::Complete);

        assert!(matches!(
            reassembly.accept(&[0, 3, 4]),
            Err(Error::Assembly(AssemblyError::CompletedPending))
        ));
        // The pending message is untouched by the failed accept
        assert_eq!(reassembly.take_completed().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_back_to_back_messages_do_not_merge() {
        let mut reassembly = Reassembly::new();
        reassembly.accept(&[0, 10, 11]).unwrap();
        assert_eq!(reassembly.take_completed().unwrap(), vec![10, 11]);

        reassembly.accept(&[0, 20]).unwrap();
        assert_eq!(reassembly.take_completed().unwrap(), vec![20]);
    }

    #[test]
    fn test_take_before_complete_is_error() {
        let mut reassembly = Reassembly::new();
        assert!(matches!(
            reassembly.take_completed(),
            Err(Error::Assembly(AssemblyError::NotComplete))
        ));

        reassembly.accept(&[2, 1]).unwrap();
        assert!(matches!(
            reassembly.take_completed(),
            Err(Error::Assembly(AssemblyError::NotComplete))
        ));
    }

    #[test]
    fn test_reset_discards_partial_state() {
        let mut reassembly = Reassembly::new();
        reassembly.accept(&[1, 9, 9, 9]).unwrap();
        reassembly.reset();
        assert!(reassembly.is_idle());

        reassembly.accept(&[0, 5]).unwrap();
        assert_eq!(reassembly.take_completed().unwrap(), vec![5]);
    }

    #[test]
    fn test_missing_sequence_byte() {
        let mut reassembly = Reassembly::new();
        assert!(matches!(
            reassembly.accept(&[]),
            Err(Error::Assembly(AssemblyError::MissingSequence))
        ));
    }

    #[test]
    fn test_assembled_view() {
        let mut reassembly = Reassembly::new();
        assert!(reassembly.assembled().is_none());
        reassembly.accept(&[1, 1]).unwrap();
        assert!(reassembly.assembled().is_none());
        reassembly.accept(&[0, 2]).unwrap();
        assert_eq!(reassembly.assembled().unwrap(), &[1, 2]);
    }
}
