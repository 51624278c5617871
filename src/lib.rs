pub mod cli;
pub mod compiler;
pub mod diagnostic;
pub mod emit;
pub mod lookup;
pub mod pack;
pub mod rulefile;
pub mod trie;

use std::fs::File;

use anyhow::{Context, Result, bail};

use cli::Args;
use compiler::Compiler;
use emit::create_emitter;
use lookup::{PackedCursor, TreeCursor, lookup_sequence};
use rulefile::load_rules;
use trie::Symbol;

/// Run the compiler front end. Returns the process exit code: 0 = success.
pub fn run(args: Args) -> Result<i32> {
    let rules = load_rules(&args.rule_file)?;
    if args.debug {
        eprintln!("debug: {} rules loaded", rules.len());
    }

    let mut compiler = Compiler::new();
    let mut compile_error = None;
    for rule in &rules {
        if let Err(e) = compiler.add_pattern(&rule.pattern, rule.result) {
            compile_error = Some(anyhow::Error::new(e).context(format!(
                "bad pattern \"{}\" at line {} of {}",
                rule.pattern,
                rule.line,
                args.rule_file.display()
            )));
            break;
        }
    }
    // Warnings surface even when a later pattern failed.
    for diagnostic in compiler.take_diagnostics() {
        eprintln!("warning: {diagnostic}");
    }
    if let Some(e) = compile_error {
        return Err(e);
    }
    if args.debug {
        eprintln!("debug: {} trie nodes", compiler.trie().node_count());
    }

    if args.show_trie {
        print!("{}", compiler.trie());
        return Ok(0);
    }

    let packed = pack::pack(compiler.trie())?;
    if args.debug {
        eprintln!("debug: packed into {} bytes", packed.len());
    }
    if args.dump_packed {
        eprintln!("{}", pack::decode_records(&packed));
    }

    if let Some(ref digits) = args.lookup {
        let sequence = parse_lookup_sequence(digits)?;
        let from_tree = lookup_sequence(&mut TreeCursor::new(compiler.trie()), &sequence);
        let from_packed = lookup_sequence(&mut PackedCursor::new(&packed), &sequence);
        if from_tree != from_packed {
            bail!(
                "lookup engines disagree on {digits}: tree {from_tree:?}, packed {from_packed:?}"
            );
        }
        match from_packed {
            Some(result) => println!("result: {}", result.get() as char),
            None => println!("no match"),
        }
        return Ok(0);
    }

    let emitter = create_emitter(&args.format);
    match args.output {
        Some(ref path) => {
            let mut file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            emitter.emit_to(&args.name, &packed, &mut file)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            emitter.emit_to(&args.name, &packed, &mut lock)?;
        }
    }
    Ok(0)
}

fn parse_lookup_sequence(digits: &str) -> Result<Vec<Symbol>> {
    digits
        .chars()
        .map(|ch| {
            Symbol::from_digit(ch)
                .with_context(|| format!("invalid lookup character '{ch}' (digits only)"))
        })
        .collect()
}
