//! Scripted walk through the simulated three-way handshake.
//!
//! Both endpoints start from a freshly initialized [`HeaderRecord`], apply a
//! silent `Listen` step and then print the header after each remaining step.

use std::io::Write;
use log::{debug, info};
use crate::tcp::errors::HandshakeError;
use crate::tcp::presenter::format_header;
use crate::tcp::state::HandshakeState;
use crate::tcp::tcp_header::HeaderRecord;

/// Which side of the connection is simulating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Client,
    Server,
}

/// A step is a target state plus the label printed after it, if any.
pub type Step = (HandshakeState, Option<&'static str>);

const CLIENT_STEPS: [Step; 5] = [
    (HandshakeState::Listen, None),
    (HandshakeState::Syn, Some("Step 1: SYN sent")),
    (HandshakeState::SynAck, Some("Step 2: SYN ACK received")),
    (HandshakeState::Ack, Some("Step 3: ACK sent")),
    (HandshakeState::FinalAck, Some("Step 3: FINAL ACK received")),
];

const SERVER_STEPS: [Step; 4] = [
    (HandshakeState::Listen, None),
    (HandshakeState::Syn, Some("SYN State")),
    (HandshakeState::SynAck, Some("SYN_ACK State")),
    (HandshakeState::Ack, Some("ACK State")),
];

impl Role {
    pub fn steps(self) -> &'static [Step] {
        match self {
            Role::Client => &CLIENT_STEPS,
            Role::Server => &SERVER_STEPS,
        }
    }
}

/// Apply every step for `role` to `header`, writing each labelled snapshot to `out`.
pub fn simulate<W: Write>(role: Role, header: &mut HeaderRecord, out: &mut W) -> Result<(), HandshakeError> {
    info!("simulating {role:?} handshake from seq={}", header.seq_no);

    for &(state, label) in role.steps() {
        header.apply_state(state);
        debug!("wire view: {}", hex::encode(header.to_bytes()));

        if let Some(label) = label {
            out.write_all(format_header(header, label).as_bytes())?;
        }
    }

    out.flush()?;
    Ok(())
}

// -- Unit tests --

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tcp::tcp_flags::TcpFlags;
    use crate::tcp::tcp_header::HeaderDefaults;

    fn run(role: Role, src: u16, dst: u16, seq: u32) -> (HeaderRecord, String) {
        let mut header = HeaderRecord::with_defaults(src, dst, seq, HeaderDefaults::default());
        let mut out = Vec::new();
        simulate(role, &mut header, &mut out).unwrap();
        (header, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_client_script() {
        let (header, text) = run(Role::Client, 5000, 80, 100);

        let labels: Vec<_> = text.lines().filter(|l| l.starts_with("--------")).collect();
        assert_eq!(
            labels,
            vec![
                "-------- Step 1: SYN sent --------",
                "-------- Step 2: SYN ACK received --------",
                "-------- Step 3: ACK sent --------",
                "-------- Step 3: FINAL ACK received --------",
            ]
        );

        // Five swaps leave the ports reversed
        assert_eq!((header.src_port, header.dst_port), (80, 5000));
        assert_eq!((header.seq_no.value(), header.ack_no.value()), (105, 106));
        assert_eq!(header.flags, TcpFlags::ACK);
    }

    #[test]
    fn test_client_first_block() {
        let (_, text) = run(Role::Client, 5000, 80, 100);
        let first: Vec<_> = text.lines().take(9).collect();
        assert_eq!(
            first,
            vec![
                "-------- Step 1: SYN sent --------",
                "Source Port: 5000",
                "Destination Port: 80",
                "Sequence Number: 102",
                "Acknowledgment Number: 103",
                "Flags: SYN ",
                "Window Size: 17520",
                "Checksum: 0xffff",
                "Urgent Pointer: 0",
            ]
        );
    }

    #[test]
    fn test_server_script() {
        let (header, text) = run(Role::Server, 9000, 40000, 0);

        let labels: Vec<_> = text.lines().filter(|l| l.starts_with("--------")).collect();
        assert_eq!(
            labels,
            vec!["-------- SYN State --------", "-------- SYN_ACK State --------", "-------- ACK State --------"]
        );
        assert_eq!(text.lines().count(), 27);

        // Four swaps restore the ports
        assert_eq!((header.src_port, header.dst_port), (9000, 40000));
        assert_eq!((header.seq_no.value(), header.ack_no.value()), (4, 5));
    }

    #[test]
    fn test_server_never_reaches_terminal_state() {
        assert!(Role::Server.steps().iter().all(|(state, _)| !state.is_terminal()));
        assert!(Role::Client.steps().last().unwrap().0.is_terminal());
    }

    #[test]
    fn test_listen_step_is_silent() {
        for role in [Role::Client, Role::Server] {
            assert_eq!(role.steps()[0], (HandshakeState::Listen, None));
        }
    }
}
