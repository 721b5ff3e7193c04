use std::io;
use std::process;
use handshake_sim::endpoint::{exit_status, parse_args, run_server};

fn main() {
    env_logger::init();

    let result = parse_args(std::env::args()).and_then(|port| run_server(port, &mut io::stdout()));
    process::exit(exit_status(result, &mut io::stderr()));
}
