use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, TcpListener, TcpStream};
use std::os::fd::{AsRawFd, OwnedFd};
use log::info;
use nix::sys::socket::sockopt::ReuseAddr;
use nix::sys::socket::{
    bind, connect, getsockname, listen, setsockopt, socket, AddressFamily, Backlog, SockFlag, SockProtocol,
    SockType, SockaddrIn,
};
use crate::tcp::errors::HandshakeError;

/// A fresh IPv4 stream socket, not yet bound or connected.
#[derive(Debug)]
pub struct StreamSocket {
    fd: OwnedFd,
}

impl StreamSocket {
    pub fn new() -> Result<Self, HandshakeError> {
        let fd = socket(AddressFamily::Inet, SockType::Stream, SockFlag::empty(), SockProtocol::Tcp)
            .map_err(|e| HandshakeError::context("Error creating socket", e))?;
        Ok(StreamSocket { fd })
    }

    /// Connect to `addr` and hand back the stream with its local ephemeral port.
    pub fn connect(self, addr: SocketAddrV4) -> Result<(TcpStream, u16), HandshakeError> {
        connect(self.fd.as_raw_fd(), &SockaddrIn::from(addr))
            .map_err(|e| HandshakeError::context("Error connecting to server", e))?;
        let local: SockaddrIn = getsockname(self.fd.as_raw_fd())?;
        info!("connected {} -> {}", local, addr);
        Ok((TcpStream::from(self.fd), local.port()))
    }

    /// Bind to `0.0.0.0:port` and listen with the given backlog.
    pub fn listen(self, port: u16, backlog: i32) -> Result<TcpListener, HandshakeError> {
        setsockopt(&self.fd, ReuseAddr, &true)?;

        let addr = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, port);
        bind(self.fd.as_raw_fd(), &SockaddrIn::from(addr))
            .map_err(|e| HandshakeError::context("Error binding socket", e))?;

        listen(&self.fd, Backlog::new(backlog)?)
            .map_err(|e| HandshakeError::context("Error listening for connections", e))?;
        info!("listening on {addr} (backlog {backlog})");

        Ok(TcpListener::from(self.fd))
    }
}

/// Block until one peer connects.
pub fn accept_one(listener: &TcpListener) -> Result<(TcpStream, SocketAddr), HandshakeError> {
    let (stream, peer) = listener
        .accept()
        .map_err(|e| HandshakeError::context("Error accepting connection", e))?;
    info!("accepted {peer}");
    Ok((stream, peer))
}

// -- Unit tests --
