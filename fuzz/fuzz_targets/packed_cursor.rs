#![no_main]

use libfuzzer_sys::fuzz_target;

use packtrie::lookup::{Lookup, PackedCursor};
use packtrie::trie::Symbol;

// Walking an arbitrary (malformed, truncated, hostile) buffer must never
// panic or read out of bounds; every probe just fails to match.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let (probe, buffer) = data.split_at(data.len() / 2);
    let mut cursor = PackedCursor::new(buffer);
    for &byte in probe {
        if let Some(symbol) = Symbol::new(byte & 0x0f) {
            let _ = cursor.advance(symbol);
            let _ = cursor.result();
        }
        if byte & 0x80 != 0 {
            cursor.reset();
        }
    }
});
