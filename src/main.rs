use bitmap_rle::Mode;
use clap::Parser;
use std::io::{self, BufReader, BufWriter};
use std::process::ExitCode;
use std::str::FromStr;

/// Compress or expand a bitmap with run-length encoding.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// `-` compresses standard input, `+` expands it
    #[arg(value_name = "MODE", value_parser = Mode::from_str, allow_hyphen_values = true)]
    mode: Mode,
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let reader = BufReader::new(stdin.lock());
    let writer = BufWriter::new(stdout.lock());

    match bitmap_rle::run(cli.mode, reader, writer) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
