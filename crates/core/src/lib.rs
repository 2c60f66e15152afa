//! stacksim-core: Educational four-layer protocol stack simulation
//!
//! This library provides the core components for a learning-focused system
//! that:
//! - Encapsulates a byte payload into nested protocol data units
//!   (application, transport, network, data-link)
//! - Serializes each frame into a self-delimited 4B5B line code
//! - Reverses the process on the receiving side: decode, strip headers
//!   layer by layer, match addresses, reassemble fragments
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `codec`: 4B5B line coding (bytes <-> delimited binary-symbol string)
//! - `address`: fixed-width addresses for each layer
//! - `physical`: physical stage owning a line codec
//! - `datalink`: 14-byte frame header, minimum-frame padding
//! - `network`: 9-byte packet header, 8..=1480 payload window
//! - `transport`: 6-byte datagram header with a length field
//! - `assembler`: payload fragmentation and stateful reassembly
//! - `stack`: acyclic sender/receiver pipelines composed of the stages
//! - `stats`: observable per-pipeline counters
//!
//! # Design Principles
//!
//! - **No panics**: all errors are structured and recoverable
//! - **No back-references**: stages never point at each other; the
//!   `stack` module owns them and drives calls in a fixed order
//! - **Bit-exact layouts**: header widths and the 4B5B symbol table are
//!   reproduced exactly so independently built peers interoperate
//! - **Sentinel, not error**: a frame addressed elsewhere is a routine
//!   no-match, distinguishable from every real failure

pub mod address;
pub mod assembler;
pub mod codec;
pub mod datalink;
pub mod error;
pub mod network;
pub mod physical;
pub mod stack;
pub mod stats;
pub mod transport;

// Re-export commonly used types
pub use error::{Error, Result};
