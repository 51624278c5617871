use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "packtrie",
    version,
    about = "Compile digit patterns into a packed, pointer-free trie"
)]
pub struct Args {
    /// Rule file: one "<pattern> <result-char>" per line
    pub rule_file: PathBuf,

    /// Print the compiled trie as an indented tree instead of packing
    #[arg(short = 's', long)]
    pub show_trie: bool,

    /// Output format for the packed bytes
    #[arg(short, long, default_value = "c", value_parser = ["c", "rust", "json"])]
    pub format: String,

    /// Identifier for the emitted array
    #[arg(short, long, default_value = "trie_data")]
    pub name: String,

    /// Write the emitted array to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Run a digit sequence through both lookup engines and print the result
    #[arg(long, value_name = "DIGITS")]
    pub lookup: Option<String>,

    /// Print decoded "symbol-count-result" records to stderr after packing
    #[arg(long)]
    pub dump_packed: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}
