//! Illustrates the TCP three-way handshake by printing simulated header
//! snapshots on top of a real loopback connection.

pub mod endpoint;
pub mod tcp;
