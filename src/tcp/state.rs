use std::fmt;
use crate::tcp::errors::HandshakeError;
use crate::tcp::tcp_flags::TcpFlags;

/// Simulated handshake states shared by both endpoints.
///
/// The client walks all five; the server stops at `Ack`.
/// Older client/server naming maps onto these as:
///
/// | client            | server         | variant    |
/// |-------------------|----------------|------------|
/// | `LISTEN`          | `LISTEN_STATE` | `Listen`   |
/// | `SYN_STATE`       | `SYN`          | `Syn`      |
/// | `SYN_ACK_STATE`   | `SYN_ACK_STATE`| `SynAck`   |
/// | `ACK_STATE`       | `ACK_STATE`    | `Ack`      |
/// | `FINAL_ACK_STATE` | (none)         | `FinalAck` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HandshakeState {
    Listen = 0,   // No flags
    Syn = 1,      // SYN
    SynAck = 2,   // SYN + ACK
    Ack = 3,      // ACK
    FinalAck = 4, // ACK, client-only terminal marker
}

impl HandshakeState {
    pub const ALL: [HandshakeState; 5] = [
        HandshakeState::Listen,
        HandshakeState::Syn,
        HandshakeState::SynAck,
        HandshakeState::Ack,
        HandshakeState::FinalAck,
    ];

    /// Flag bits a header carries once it has entered this state.
    pub fn flags(self) -> TcpFlags {
        match self {
            HandshakeState::Listen => TcpFlags::empty(),
            HandshakeState::Syn => TcpFlags::SYN,
            HandshakeState::SynAck => TcpFlags::SYN | TcpFlags::ACK,
            HandshakeState::Ack => TcpFlags::ACK,
            HandshakeState::FinalAck => TcpFlags::ACK,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == HandshakeState::FinalAck
    }
}

impl TryFrom<u8> for HandshakeState {
    type Error = HandshakeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        HandshakeState::ALL
            .into_iter()
            .find(|state| *state as u8 == value)
            .ok_or(HandshakeError::InvalidState(value))
    }
}

impl fmt::Display for HandshakeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandshakeState::Listen => "LISTEN",
            HandshakeState::Syn => "SYN",
            HandshakeState::SynAck => "SYN_ACK",
            HandshakeState::Ack => "ACK",
            HandshakeState::FinalAck => "FINAL_ACK",
        };
        f.write_str(name)
    }
}

// -- Unit tests --

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_roundtrips_every_variant() {
        for state in HandshakeState::ALL {
            assert_eq!(HandshakeState::try_from(state as u8).unwrap(), state);
        }
    }

    #[test]
    fn test_try_from_rejects_out_of_range() {
        let err = HandshakeState::try_from(99).unwrap_err();
        assert!(matches!(err, HandshakeError::InvalidState(99)));
        assert!(HandshakeState::try_from(5).is_err());
    }

    #[test]
    fn test_flags_per_state() {
        assert!(HandshakeState::Listen.flags().is_empty());
        assert_eq!(HandshakeState::Syn.flags(), TcpFlags::SYN);
        assert_eq!(HandshakeState::SynAck.flags(), TcpFlags::SYN | TcpFlags::ACK);
        assert_eq!(HandshakeState::Ack.flags(), TcpFlags::ACK);
        assert_eq!(HandshakeState::FinalAck.flags(), HandshakeState::Ack.flags());
    }

    #[test]
    fn test_only_final_ack_is_terminal() {
        let terminal: Vec<_> = HandshakeState::ALL.into_iter().filter(|s| s.is_terminal()).collect();
        assert_eq!(terminal, vec![HandshakeState::FinalAck]);
    }
}
