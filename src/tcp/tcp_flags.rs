use bitflags::bitflags;

bitflags! {
    // Bit positions [ URG, ACK, PSH, RST, SYN, FIN ]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TcpFlags: u8 {
        const URG = 1 << 5;
        const ACK = 1 << 4;
        const PSH = 1 << 3;
        const RST = 1 << 2;
        const SYN = 1 << 1;
        const FIN = 1 << 0;
    }
}

impl TcpFlags {
    /// Flags the presenter knows how to name, in print order.
    pub const PRINTABLE: [(TcpFlags, &'static str); 2] =
        [(TcpFlags::SYN, "SYN"), (TcpFlags::ACK, "ACK")];
}

// -- Unit tests --
