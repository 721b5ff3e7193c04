use log::debug;
use crate::tcp::errors::HandshakeError;
use crate::tcp::state::HandshakeState;
use crate::tcp::tcp_flags::TcpFlags;
use crate::tcp::wrap32::Wrap32;

/// Length of the wire view produced by [`HeaderRecord::to_bytes`].
pub const HEADER_LEN: usize = 20;

/// Constants carried in every simulated header. Never computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderDefaults {
    pub window_size: u16,
    pub checksum: u16,
    pub urgent_pointer: u16,
}

impl Default for HeaderDefaults {
    fn default() -> Self {
        HeaderDefaults {
            window_size: 17520,
            checksum: 0xffff,
            urgent_pointer: 0,
        }
    }
}

/// One snapshot of the simulated TCP header. Fields are host order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRecord {
    pub src_port: u16,
    pub dst_port: u16,
    pub seq_no: Wrap32,
    pub ack_no: Wrap32,
    pub flags: TcpFlags,
    pub window: u16,
    pub checksum: u16,
    pub urgent: u16,
}

impl HeaderRecord {
    /// Populate every field. `ack_no` always starts at `seq_no + 1`.
    ///
    /// `flags` is stored as given, but the first [`apply_state`](Self::apply_state)
    /// clears it.
    pub fn initialize(
        src_port: u16,
        dst_port: u16,
        seq_no: u32,
        flags: TcpFlags,
        window: u16,
        checksum: u16,
        urgent: u16,
    ) -> Self {
        let seq_no = Wrap32::new(seq_no);
        HeaderRecord {
            src_port,
            dst_port,
            seq_no,
            ack_no: seq_no + 1,
            flags,
            window,
            checksum,
            urgent,
        }
    }

    /// Shorthand for [`initialize`](Self::initialize) with no flags and `defaults`.
    pub fn with_defaults(src_port: u16, dst_port: u16, seq_no: u32, defaults: HeaderDefaults) -> Self {
        Self::initialize(
            src_port,
            dst_port,
            seq_no,
            TcpFlags::empty(),
            defaults.window_size,
            defaults.checksum,
            defaults.urgent_pointer,
        )
    }

    /// Move the header into `state`.
    ///
    /// Every call, `Listen` included, clears the flags, swaps the ports and
    /// advances `seq_no <- ack_no`, `ack_no <- ack_no + 1` before the
    /// state's own flags are set.
    pub fn apply_state(&mut self, state: HandshakeState) {
        self.flags = TcpFlags::empty();
        std::mem::swap(&mut self.src_port, &mut self.dst_port);
        self.seq_no = self.ack_no;
        self.ack_no = self.ack_no + 1;
        self.flags |= state.flags();

        debug!(
            "{state}: {} -> {} seq={} ack={} flags={:?}",
            self.src_port, self.dst_port, self.seq_no, self.ack_no, self.flags
        );
    }

    /// Entry point for callers holding a raw state number (`0..=4`, in
    /// [`HandshakeState`] order) rather than the typed enum.
    ///
    /// An unknown number fails with [`HandshakeError::InvalidState`] and
    /// leaves the header untouched; the binaries turn that into exit status 1.
    pub fn apply_raw_state(&mut self, state: u8) -> Result<(), HandshakeError> {
        let state = HandshakeState::try_from(state)?;
        self.apply_state(state);
        Ok(())
    }

    /// Network byte order view of the header: a plain 20-byte TCP header with
    /// data offset 5 and no options.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];

        buf[0..2].copy_from_slice(&self.src_port.to_be_bytes());
        buf[2..4].copy_from_slice(&self.dst_port.to_be_bytes());
        buf[4..8].copy_from_slice(&self.seq_no.value().to_be_bytes());
        buf[8..12].copy_from_slice(&self.ack_no.value().to_be_bytes());
        buf[12] = 5 << 4;
        buf[13] = self.flags.bits();
        buf[14..16].copy_from_slice(&self.window.to_be_bytes());
        buf[16..18].copy_from_slice(&self.checksum.to_be_bytes());
        buf[18..20].copy_from_slice(&self.urgent.to_be_bytes());

        buf
    }
}

// -- Unit tests --
