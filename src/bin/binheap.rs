//! Interactive driver for a binomial heap of string priorities
//!
//! Reads commands from stdin (see [`binomial_queue::script`]). Passing any
//! command-line argument echoes each command back, which keeps transcripts
//! readable when input is piped in.

use binomial_queue::script::Session;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let echo = std::env::args().len() > 1;
    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut session = Session::new().echo(echo).prompt(true);
    match session.run(stdin.lock(), stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("binheap: {err}");
            ExitCode::FAILURE
        }
    }
}
