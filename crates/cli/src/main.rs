//! WMT score board CLI entry point.

fn main() {
    if let Err(e) = wmt_scoreboard_cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
