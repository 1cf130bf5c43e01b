//! Terminal client for userinfo. See the library docs for the architecture and
//! [`cli`] for the intent grammar.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
