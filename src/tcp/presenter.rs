use std::fmt;
use crate::tcp::tcp_flags::TcpFlags;
use crate::tcp::tcp_header::HeaderRecord;

/// A header paired with the step label it is printed under.
#[derive(Debug, Clone, Copy)]
pub struct HeaderBlock<'a> {
    pub header: &'a HeaderRecord,
    pub step: &'a str,
}

impl fmt::Display for HeaderBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = self.header;

        writeln!(f, "-------- {} --------", self.step)?;
        writeln!(f, "Source Port: {}", header.src_port)?;
        writeln!(f, "Destination Port: {}", header.dst_port)?;
        writeln!(f, "Sequence Number: {}", header.seq_no)?;
        writeln!(f, "Acknowledgment Number: {}", header.ack_no)?;

        f.write_str("Flags: ")?;
        for (flag, name) in TcpFlags::PRINTABLE {
            if header.flags.contains(flag) {
                write!(f, "{name} ")?;
            }
        }
        writeln!(f)?;

        writeln!(f, "Window Size: {}", header.window)?;
        writeln!(f, "Checksum: 0x{:04x}", header.checksum)?;
        writeln!(f, "Urgent Pointer: {}", header.urgent)
    }
}

/// Render `header` as the labelled block printed after each handshake step.
pub fn format_header(header: &HeaderRecord, step: &str) -> String {
    HeaderBlock { header, step }.to_string()
}

// -- Unit tests --
