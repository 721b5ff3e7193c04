use clap::Parser;
use log::debug;
use crate::tcp::errors::HandshakeError;

/// Simulated TCP three-way handshake over a real loopback connection.
#[derive(Parser, Debug)]
#[command(about, disable_help_flag = true, disable_version_flag = true)]
pub struct PortArgs {
    /// TCP port; anything after the leading digits is ignored.
    #[arg(value_parser = parse_port_arg, allow_hyphen_values = true)]
    pub port: u16,
}

fn parse_port_arg(arg: &str) -> Result<u16, String> {
    Ok(parse_port(arg))
}

/// Read a port number the way `atoi` would: optional whitespace and sign,
/// then as many decimal digits as are present. No digits yields 0; values
/// past 16 bits are truncated.
pub fn parse_port(arg: &str) -> u16 {
    let s = arg.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u32, |acc, d| acc.wrapping_mul(10).wrapping_add(u32::from(d - b'0')));
    let value = if negative { value.wrapping_neg() } else { value };

    value as u16
}

/// Parse `args` (program name first) into a port.
///
/// Exactly one argument is accepted, whatever it looks like; `-x` or
/// `--help` is just a port that reads as 0. A missing or extra argument
/// becomes [`HandshakeError::Usage`].
pub fn parse_args<I>(args: I) -> Result<u16, HandshakeError>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    let program = args.first().cloned().unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

    match PortArgs::try_parse_from(&args) {
        Ok(parsed) => Ok(parsed.port),
        Err(e) => {
            debug!("rejected arguments: {}", e.kind());
            Err(HandshakeError::Usage { program })
        }
    }
}

// -- Unit tests --
