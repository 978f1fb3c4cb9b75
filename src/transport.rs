//! Abstract node transport.
//!
//! The parameter core never talks to a port itself. Everything goes through
//! this synchronous request/response interface, which a network layer (or
//! [`crate::sim::SimulatedDrive`] in tests) implements.

use crate::error::Result;
use crate::types::NodeId;

/// Synchronous access to the nodes on a controller
pub trait Transport {
    /// Read the little-endian image of parameter `param`
    fn read_raw(&mut self, node: NodeId, param: u16) -> Result<Vec<u8>>;

    /// Write the little-endian image of parameter `param`
    fn write_raw(&mut self, node: NodeId, param: u16, data: &[u8]) -> Result<()>;

    /// Run a non-parameter command. The packet sent is `code` followed by
    /// `payload`; the returned bytes are the response payload.
    fn run_command(&mut self, node: NodeId, code: u8, payload: &[u8]) -> Result<Vec<u8>>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn read_raw(&mut self, node: NodeId, param: u16) -> Result<Vec<u8>> {
        (**self).read_raw(node, param)
    }

    fn write_raw(&mut self, node: NodeId, param: u16, data: &[u8]) -> Result<()> {
        (**self).write_raw(node, param, data)
    }

    fn run_command(&mut self, node: NodeId, code: u8, payload: &[u8]) -> Result<Vec<u8>> {
        (**self).run_command(node, code, payload)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn read_raw(&mut self, node: NodeId, param: u16) -> Result<Vec<u8>> {
        (**self).read_raw(node, param)
    }

    fn write_raw(&mut self, node: NodeId, param: u16, data: &[u8]) -> Result<()> {
        (**self).write_raw(node, param, data)
    }

    fn run_command(&mut self, node: NodeId, code: u8, payload: &[u8]) -> Result<Vec<u8>> {
        (**self).run_command(node, code, payload)
    }
}
