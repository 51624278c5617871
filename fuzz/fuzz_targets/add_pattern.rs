#![no_main]

use std::num::NonZeroU8;

use libfuzzer_sys::fuzz_target;

use packtrie::compiler::Compiler;
use packtrie::pack::pack;

// Arbitrary pattern text must never panic the compiler or the packer;
// errors are fine. Input is bounded to keep pack recursion shallow.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let mut compiler = Compiler::new();
    for (index, line) in text.lines().take(32).enumerate() {
        if line.len() > 256 {
            continue;
        }
        let result = NonZeroU8::new((index % 255 + 1) as u8).unwrap();
        let _ = compiler.add_pattern(line, result);
    }
    let _ = compiler.take_diagnostics();
    let _ = pack(compiler.trie());
});
