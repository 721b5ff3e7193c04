//! Endpoint bootstrap: the real sockets behind the simulation.
//!
//! The OS performs the actual handshake during `connect`/`accept`; these
//! functions only use the resulting connection to learn the port pair, then
//! run the simulated handshake and close.

pub mod args;
pub mod socket;

use std::io::Write;
use std::net::{Ipv4Addr, SocketAddrV4};
use log::{debug, info};
use rand::Rng;
use crate::tcp::{simulate, HandshakeError, HeaderDefaults, HeaderRecord, Role};

pub use args::{parse_args, parse_port};
pub use socket::{accept_one, StreamSocket};

/// The server accepts exactly one peer.
pub const SERVER_BACKLOG: i32 = 1;

/// Exit status for a finished run. Errors are reported on `stderr` and are
/// always fatal.
pub fn exit_status<W: Write>(result: Result<(), HandshakeError>, stderr: &mut W) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            debug!("run failed: {e:?}");
            // Nothing left to report to if stderr itself is gone
            let _ = writeln!(stderr, "{e}");
            1
        }
    }
}

fn initial_seq_no() -> u32 {
    rand::thread_rng().gen()
}

/// Connect to `127.0.0.1:port` and print the client's side of the handshake.
pub fn run_client<W: Write>(port: u16, out: &mut W) -> Result<(), HandshakeError> {
    let socket = StreamSocket::new()?;
    writeln!(out, "Client Socket has been created")?;

    let (stream, local_port) = socket.connect(SocketAddrV4::new(Ipv4Addr::LOCALHOST, port))?;
    writeln!(out, "Connected to server")?;

    let mut header = HeaderRecord::with_defaults(local_port, port, initial_seq_no(), HeaderDefaults::default());
    simulate(Role::Client, &mut header, out)?;

    drop(stream);
    info!("client socket closed");
    Ok(())
}

/// Listen on `0.0.0.0:port`, accept one peer and print the server's side of the handshake.
pub fn run_server<W: Write>(port: u16, out: &mut W) -> Result<(), HandshakeError> {
    let socket = StreamSocket::new()?;
    writeln!(out, "Server Socket has been created")?;

    let listener = socket.listen(port, SERVER_BACKLOG)?;
    writeln!(out, "Server is listening on port {port}...")?;
    out.flush()?;

    let (stream, peer) = accept_one(&listener)?;
    writeln!(out, "Accepted connection from {}:{}", peer.ip(), peer.port())?;

    let mut header = HeaderRecord::with_defaults(port, peer.port(), initial_seq_no(), HeaderDefaults::default());
    simulate(Role::Server, &mut header, out)?;

    drop(stream);
    drop(listener);
    info!("server sockets closed");
    Ok(())
}

// -- Unit tests --

#[cfg(test)]
mod tests {
    use std::thread;
    use super::*;

    #[test]
    fn test_exit_status_success() {
        let mut stderr = Vec::new();
        assert_eq!(exit_status(Ok(()), &mut stderr), 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn test_exit_status_invalid_state() {
        let mut header = HeaderRecord::with_defaults(5000, 80, 100, HeaderDefaults::default());
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        let result = header.apply_raw_state(99).and_then(|()| simulate(Role::Client, &mut header, &mut stdout));
        assert_eq!(exit_status(result, &mut stderr), 1);
        assert_eq!(String::from_utf8(stderr).unwrap(), "Invalid state\n");
        assert!(stdout.is_empty());
    }

    #[test]
    fn test_exit_status_usage() {
        let mut stderr = Vec::new();
        let result = parse_args(vec!["./server".to_string()]).map(|_| ());
        assert_eq!(exit_status(result, &mut stderr), 1);
        assert_eq!(String::from_utf8(stderr).unwrap(), "Usage: ./server <port>\n");
    }

    #[test]
    fn test_client_against_plain_listener() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let acceptor = thread::spawn(move || listener.accept().map(|(_, peer)| peer.port()));

        let mut out = Vec::new();
        run_client(port, &mut out).unwrap();
        let client_port = acceptor.join().unwrap().unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Client Socket has been created");
        assert_eq!(lines[1], "Connected to server");
        assert_eq!(lines[2], "-------- Step 1: SYN sent --------");
        // Two swaps by the time SYN is printed
        assert_eq!(lines[3], format!("Source Port: {client_port}"));
        assert_eq!(lines[4], format!("Destination Port: {port}"));
        assert_eq!(lines.len(), 2 + 4 * 9);
    }

    #[test]
    fn test_client_without_server_fails() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let mut out = Vec::new();
        assert!(run_client(port, &mut out).is_err());
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("--------"));
    }
}
