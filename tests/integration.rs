//! Integration tests for the packtrie pipeline.
//!
//! These exercise the full chain: rule-file reading, pattern compilation,
//! packing, emission, and the lookup engines. They write real rule files to
//! a temp directory and drive both the library layers and `run` directly.

use std::fmt::Write as _;
use std::fs;
use std::num::NonZeroU8;
use std::path::{Path, PathBuf};

use packtrie::cli::Args;
use packtrie::compiler::Compiler;
use packtrie::emit::create_emitter;
use packtrie::lookup::{PackedCursor, TreeCursor, lookup_sequence};
use packtrie::pack::{CapacityError, pack};
use packtrie::rulefile::load_rules;
use packtrie::trie::Symbol;

fn write_rules(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn default_args(rule_file: PathBuf) -> Args {
    Args {
        rule_file,
        show_trie: false,
        format: "c".to_string(),
        name: "trie_data".to_string(),
        output: None,
        lookup: None,
        dump_packed: false,
        debug: false,
    }
}

fn compile_file(path: &Path) -> Compiler {
    let mut compiler = Compiler::new();
    for rule in load_rules(path).unwrap() {
        compiler.add_pattern(&rule.pattern, rule.result).unwrap();
    }
    compiler
}

fn symbols(digits: &str) -> Vec<Symbol> {
    digits.chars().map(|c| Symbol::from_digit(c).unwrap()).collect()
}

// ---------- Full pipeline ----------

#[test]
fn compile_pack_emit_matches_reference_layout() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_rules(dir.path(), "rules.txt", "123 a\n124 b\n");
    let compiler = compile_file(&file);
    let packed = pack(compiler.trie()).unwrap();

    let mut out = Vec::new();
    create_emitter("c")
        .emit_to("trie_data", &packed, &mut out)
        .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "static uint8_t trie_data[] = {\n\
         \x20 0x00, 0x04, 0x00, 0x10, 0x03, 0x00, 0x20, 0x02,\n\
         \x20 0x00, 0x30, 0x00, 0x61, 0x40, 0x00, 0x62,\n\
         };  // 15 bytes\n"
    );
}

#[test]
fn mixed_rule_file_agrees_across_engines() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_rules(
        dir.path(),
        "rules.txt",
        "123 a\n12?3 c\n1(2|3|4)5 E\n(1|2|3)?4 H\n1(23|45?6)?7 h\n9876543210 B\n",
    );
    let compiler = compile_file(&file);
    let packed = pack(compiler.trie()).unwrap();

    let probes = [
        "", "1", "12", "123", "13", "125", "135", "145", "15", "1245", "4", "14", "24", "34",
        "17", "1237", "1467", "14567", "1457", "9876543210", "987", "99", "0",
    ];
    for probe in probes {
        let sequence = symbols(probe);
        let from_tree = lookup_sequence(&mut TreeCursor::new(compiler.trie()), &sequence);
        let from_packed = lookup_sequence(&mut PackedCursor::new(&packed), &sequence);
        assert_eq!(from_tree, from_packed, "engines disagree on {probe:?}");
    }
}

#[test]
fn every_rule_round_trips_through_the_packed_engine() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_rules(dir.path(), "rules.txt", "123 a\n456 b\n78 c\n");
    let compiler = compile_file(&file);
    let packed = pack(compiler.trie()).unwrap();

    for (pattern, expected) in [("123", b'a'), ("456", b'b'), ("78", b'c')] {
        let found = lookup_sequence(&mut PackedCursor::new(&packed), &symbols(pattern));
        assert_eq!(found, NonZeroU8::new(expected), "pattern {pattern}");
    }
}

#[test]
fn overfull_trie_fails_packing_instead_of_truncating() {
    // 8^4 four-digit chains plus their prefixes put well over 4095 nodes
    // under the root.
    let mut compiler = Compiler::new();
    let mut content = String::new();
    for a in 0..8 {
        for b in 0..8 {
            for c in 0..8 {
                for d in 0..8 {
                    let _ = writeln!(content, "{a}{b}{c}{d}");
                }
            }
        }
    }
    for (index, pattern) in content.lines().enumerate() {
        let result = NonZeroU8::new((index % 250 + 1) as u8).unwrap();
        compiler.add_pattern(pattern, result).unwrap();
    }
    assert_eq!(
        pack(compiler.trie()),
        Err(CapacityError { descendants: 4680 })
    );
}

// ---------- run() ----------

#[test]
fn run_writes_c_array_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_rules(dir.path(), "rules.txt", "123 a\n124 b\n");
    let out_path = dir.path().join("trie.inc");
    let mut args = default_args(file);
    args.output = Some(out_path.clone());

    assert_eq!(packtrie::run(args).unwrap(), 0);
    let emitted = fs::read_to_string(out_path).unwrap();
    assert!(emitted.starts_with("static uint8_t trie_data[] = {\n"));
    assert!(emitted.ends_with("};  // 15 bytes\n"));
}

#[test]
fn run_honors_format_and_name() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_rules(dir.path(), "rules.txt", "1 x\n");
    let out_path = dir.path().join("trie.rs");
    let mut args = default_args(file);
    args.format = "rust".to_string();
    args.name = "digit_map".to_string();
    args.output = Some(out_path.clone());

    assert_eq!(packtrie::run(args).unwrap(), 0);
    let emitted = fs::read_to_string(out_path).unwrap();
    assert!(emitted.starts_with("static DIGIT_MAP: [u8; 6] = [\n"));
}

#[test]
fn run_show_trie_succeeds_without_emitting() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_rules(dir.path(), "rules.txt", "12 a\n");
    let mut args = default_args(file);
    args.show_trie = true;
    assert_eq!(packtrie::run(args).unwrap(), 0);
}

#[test]
fn run_lookup_checks_both_engines() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_rules(dir.path(), "rules.txt", "1(2|3)4 m\n");
    let mut args = default_args(file);
    args.lookup = Some("134".to_string());
    assert_eq!(packtrie::run(args).unwrap(), 0);

    let file = write_rules(dir.path(), "rules2.txt", "1(2|3)4 m\n");
    let mut args = default_args(file);
    args.lookup = Some("15".to_string());
    assert_eq!(packtrie::run(args).unwrap(), 0);
}

#[test]
fn run_rejects_bad_lookup_characters() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_rules(dir.path(), "rules.txt", "12 a\n");
    let mut args = default_args(file);
    args.lookup = Some("1x".to_string());
    let err = packtrie::run(args).unwrap_err();
    assert!(err.to_string().contains("invalid lookup character"), "got: {err}");
}

#[test]
fn run_debug_and_dump_flags() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_rules(dir.path(), "rules.txt", "12 a\n");
    let out_path = dir.path().join("out.inc");
    let mut args = default_args(file);
    args.debug = true;
    args.dump_packed = true;
    args.output = Some(out_path);
    assert_eq!(packtrie::run(args).unwrap(), 0);
}

// ---------- error reporting ----------

#[test]
fn run_reports_rule_file_syntax_errors_with_line_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_rules(dir.path(), "rules.txt", "123 a\n456\n");
    let err = packtrie::run(default_args(file)).unwrap_err();
    assert!(err.to_string().contains("line 2"), "got: {err}");
}

#[test]
fn run_reports_bad_patterns_with_line_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_rules(dir.path(), "rules.txt", "123 a\n1x2 b\n");
    let err = packtrie::run(default_args(file)).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("line 2"), "got: {message}");
    assert!(message.contains("invalid character 'x'"), "got: {message}");
}

#[test]
fn run_reports_missing_rule_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = packtrie::run(default_args(dir.path().join("absent.txt"))).unwrap_err();
    assert!(err.to_string().contains("cannot read rule file"), "got: {err}");
}

#[test]
fn duplicate_results_warn_but_do_not_fail() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_rules(dir.path(), "rules.txt", "12 a\n12 b\n");
    let out_path = dir.path().join("out.inc");
    let mut args = default_args(file);
    args.output = Some(out_path);
    assert_eq!(packtrie::run(args).unwrap(), 0);

    // The second result wins at lookup time.
    let dir2 = tempfile::tempdir().unwrap();
    let file = write_rules(dir2.path(), "rules.txt", "12 a\n12 b\n");
    let compiler = compile_file(&file);
    let packed = pack(compiler.trie()).unwrap();
    let found = lookup_sequence(&mut PackedCursor::new(&packed), &symbols("12"));
    assert_eq!(found, NonZeroU8::new(b'b'));
}
