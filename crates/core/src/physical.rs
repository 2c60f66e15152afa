//! Physical stage: the boundary between frames and line codes.
//!
//! Owns a line codec and does nothing else; "transmission" in this
//! simulation is handing the resulting string to whoever drives the
//! receiving pipeline. Upward routing after a decode is the stack
//! driver's job, keeping the stage free of back-references.

use crate::codec::{Codec4b5b, LineCodec};
use crate::error::Result;

/// The physical stage, generic over its codec.
#[derive(Debug, Clone, Default)]
pub struct Physical<C: LineCodec = Codec4b5b> {
    codec: C,
}

impl Physical<Codec4b5b> {
    /// A physical stage using the standard 4B5B codec.
    pub fn new_4b5b() -> Self {
        Self::new(Codec4b5b::new())
    }
}

impl<C: LineCodec> Physical<C> {
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    /// Encode a frame for transmission.
    pub fn transmit(&self, frame: &[u8]) -> String {
        self.codec.encode(frame)
    }

    /// Decode a received line code back into frame bytes.
    pub fn receive(&self, code: &str) -> Result<Vec<u8>> {
        self.codec.decode(code)
    }
}
