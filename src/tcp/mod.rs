pub mod errors;
pub mod handshake;
pub mod presenter;
pub mod state;
pub mod tcp_flags;
pub mod tcp_header;
pub mod wrap32;

// -- Re-export structs for more concise usage

pub use errors::HandshakeError;
pub use handshake::{simulate, Role};
pub use presenter::format_header;
pub use state::HandshakeState;
pub use tcp_flags::TcpFlags;
pub use tcp_header::{HeaderDefaults, HeaderRecord};
pub use wrap32::Wrap32;
