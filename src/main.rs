use std::process;

use clap::Parser;

use packtrie::cli::Args;

fn main() {
    let args = Args::parse();
    match packtrie::run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(2);
        }
    }
}
