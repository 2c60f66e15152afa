//! Fixed-width addresses for each layer of the stack.
//!
//! Widths are layer-specific: 6 bytes on the data link, 4 bytes on the
//! network, 2-byte ports on the transport. Construction fails unless the
//! input matches the layer's width exactly, so a stage can never be built
//! with a malformed address.

use crate::error::{AddressError, Result};

/// Data-link address width in bytes
pub const LINK_ADDR_LEN: usize = 6;

/// Network address width in bytes
pub const NET_ADDR_LEN: usize = 4;

/// Transport port width in bytes
pub const PORT_LEN: usize = 2;

/// A 6-byte data-link address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkAddr([u8; LINK_ADDR_LEN]);

/// A 4-byte network address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetAddr([u8; NET_ADDR_LEN]);

/// A 2-byte transport port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Port([u8; PORT_LEN]);

impl LinkAddr {
    /// Build an address from raw bytes, validating the width.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; LINK_ADDR_LEN] = bytes
            .try_into()
            .map_err(|_| AddressError::LinkWidth(bytes.len()))?;
        Ok(Self(raw))
    }

    pub fn as_bytes(&self) -> &[u8; LINK_ADDR_LEN] {
        &self.0
    }
}

impl NetAddr {
    /// Build an address from raw bytes, validating the width.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; NET_ADDR_LEN] = bytes
            .try_into()
            .map_err(|_| AddressError::NetWidth(bytes.len()))?;
        Ok(Self(raw))
    }

    pub fn as_bytes(&self) -> &[u8; NET_ADDR_LEN] {
        &self.0
    }
}

impl Port {
    /// Build a port from raw bytes, validating the width.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; PORT_LEN] = bytes
            .try_into()
            .map_err(|_| AddressError::PortWidth(bytes.len()))?;
        Ok(Self(raw))
    }

    pub fn as_bytes(&self) -> &[u8; PORT_LEN] {
        &self.0
    }
}

/// The full address triple of one logical peer.
///
/// The pipeline builder threads one `Endpoint` through a sender or
/// receiver stack; `send` takes a second one naming the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub link: LinkAddr,
    pub net: NetAddr,
    pub port: Port,
}

impl Endpoint {
    pub fn new(link: LinkAddr, net: NetAddr, port: Port) -> Self {
        Self { link, net, port }
    }

    /// Build an endpoint from raw byte slices, validating every width.
    pub fn from_bytes(link: &[u8], net: &[u8], port: &[u8]) -> Result<Self> {
        Ok(Self {
            link: LinkAddr::from_bytes(link)?,
            net: NetAddr::from_bytes(net)?,
            port: Port::from_bytes(port)?,
        })
    }
}
