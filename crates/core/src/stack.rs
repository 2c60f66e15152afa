//! Acyclic sender and receiver pipelines.
//!
//! Stages never hold references to each other. A [`Sender`] or
//! [`Receiver`] owns its stages by value and drives every call in a
//! fixed order, so there are no ownership cycles, no downcasts, and no
//! way to invoke the layers out of sequence.
//!
//! # Data Flow
//!
//! ```text
//! send:    payload -> split -> transport -> network -> data link -> physical -> line codes
//! receive: line code -> physical -> data link -> network -> transport -> reassembly
//! ```
//!
//! On the receive path every stage may decline the PDU ("not for me");
//! the pipeline maps that to [`Delivery::NotForMe`], which is a routine
//! outcome, never an error.

use crate::address::Endpoint;
use crate::assembler::{self, Reassembly, Status};
use crate::datalink::{DataLink, LinkRequest};
use crate::error::Result;
use crate::network::{Network, NetworkRequest, LINK_TYPE_TAG};
use crate::physical::Physical;
use crate::stats::{ReceiverStats, SenderStats};
use crate::transport::{Transport, TransportRequest, PROTOCOL_TAG};

/// Outcome of offering one line code to a receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Some stage declined the PDU; the frame was addressed elsewhere
    NotForMe,

    /// A fragment was accepted; more are expected
    MoreExpected,

    /// The terminal fragment arrived; the message is retrievable
    Complete,
}

/// A sender pipeline bound to one source endpoint.
#[derive(Debug, Clone)]
pub struct Sender {
    transport: Transport,
    network: Network,
    link: DataLink,
    phy: Physical,
    stats: SenderStats,
}

impl Sender {
    /// Wire up a sender stack, one stage per layer, top to bottom.
    pub fn new(source: Endpoint) -> Self {
        Self {
            transport: Transport::new(source.port),
            network: Network::new(source.net),
            link: DataLink::new(source.link),
            phy: Physical::new_4b5b(),
            stats: SenderStats::default(),
        }
    }

    /// Encapsulate a payload for `dest`, one line code per fragment,
    /// in transmission order.
    ///
    /// # Errors
    /// Any per-layer validation failure aborts the whole send; callers
    /// should not retry with the same arguments.
    pub fn send(&mut self, payload: &[u8], dest: &Endpoint) -> Result<Vec<String>> {
        let fragments = assembler::split(payload)?;
        let mut codes = Vec::with_capacity(fragments.len());

        for fragment in fragments {
            let datagram = self.transport.request(TransportRequest {
                dest: dest.port,
                sdu: fragment.into_sdu(),
            })?;
            let packet = self.network.request(NetworkRequest {
                dest: dest.net,
                protocol: PROTOCOL_TAG,
                sdu: datagram,
            })?;
            let frame = self.link.request(LinkRequest {
                dest: dest.link,
                type_tag: LINK_TYPE_TAG,
                sdu: packet,
            })?;
            let code = self.phy.transmit(&frame);

            self.stats.fragments_sent += 1;
            self.stats.code_chars_emitted += code.len() as u64;
            codes.push(code);
        }

        self.stats.payloads_sent += 1;
        self.stats.payload_bytes += payload.len() as u64;
        Ok(codes)
    }

    pub fn stats(&self) -> &SenderStats {
        &self.stats
    }
}

/// A receiver pipeline bound to one source endpoint, owning the only
/// piece of cross-call state: the reassembly buffer.
#[derive(Debug, Clone)]
pub struct Receiver {
    phy: Physical,
    link: DataLink,
    network: Network,
    transport: Transport,
    reassembly: Reassembly,
    stats: ReceiverStats,
}

impl Receiver {
    /// Wire up a receiver stack, one stage per layer, bottom to top.
    pub fn new(source: Endpoint) -> Self {
        Self {
            phy: Physical::new_4b5b(),
            link: DataLink::new(source.link),
            network: Network::new(source.net),
            transport: Transport::new(source.port),
            reassembly: Reassembly::new(),
            stats: ReceiverStats::default(),
        }
    }

    /// Decode one line code and pass it up the stack.
    ///
    /// Returns [`Delivery::NotForMe`] the moment any stage declines the
    /// PDU; fragments that reach the top are fed to the reassembler.
    pub fn receive(&mut self, code: &str) -> Result<Delivery> {
        self.stats.codes_received += 1;

        let frame = self.phy.receive(code)?;
        let packet = match self.link.indication(&frame)? {
            Some(sdu) => sdu,
            None => {
                self.stats.no_match += 1;
                return Ok(Delivery::NotForMe);
            }
        };
        let datagram = match self.network.indication(&packet)? {
            Some(sdu) => sdu,
            None => {
                self.stats.no_match += 1;
                return Ok(Delivery::NotForMe);
            }
        };
        let frame_sdu = match self.transport.indication(&datagram)? {
            Some(sdu) => sdu,
            None => {
                self.stats.no_match += 1;
                return Ok(Delivery::NotForMe);
            }
        };

        let status = self.reassembly.accept(&frame_sdu)?;
        self.stats.fragments_accepted += 1;
        match status {
            Status::MoreExpected => Ok(Delivery::MoreExpected),
            Status::Complete => {
                self.stats.messages_completed += 1;
                Ok(Delivery::Complete)
            }
        }
    }

    /// View of the assembled message, available once complete.
    pub fn assembled(&self) -> Option<&[u8]> {
        self.reassembly.assembled()
    }

    /// Move the completed message out; the reassembler returns to idle.
    pub fn take_completed(&mut self) -> Result<Vec<u8>> {
        let message = self.reassembly.take_completed()?;
        self.stats.bytes_delivered += message.len() as u64;
        Ok(message)
    }

    /// Discard any partially assembled message.
    pub fn reset(&mut self) {
        self.reassembly.reset();
    }

    pub fn stats(&self) -> &ReceiverStats {
        &self.stats
    }
}
