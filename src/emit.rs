//! Renderers for embedding a packed buffer at the deployment target.

use std::io::{self, Write};

use serde::Serialize;

pub trait Emitter {
    fn emit_to(&self, name: &str, bytes: &[u8], out: &mut dyn Write) -> io::Result<()>;
}

pub fn create_emitter(format: &str) -> Box<dyn Emitter> {
    match format {
        "rust" => Box::new(RustArrayEmitter),
        "json" => Box::new(JsonEmitter),
        // "c" and any unknown value
        _ => Box::new(CArrayEmitter),
    }
}

/// `static uint8_t <name>[] = {...};`, eight bytes per row, with the byte
/// count in a trailing comment.
pub struct CArrayEmitter;

impl Emitter for CArrayEmitter {
    fn emit_to(&self, name: &str, bytes: &[u8], out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "static uint8_t {name}[] = {{")?;
        write_rows(bytes, out)?;
        writeln!(out, "}};  // {} bytes", bytes.len())
    }
}

/// `static <NAME>: [u8; <len>] = [...];` with the same row shape.
pub struct RustArrayEmitter;

impl Emitter for RustArrayEmitter {
    fn emit_to(&self, name: &str, bytes: &[u8], out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "static {}: [u8; {}] = [",
            name.to_uppercase(),
            bytes.len()
        )?;
        write_rows(bytes, out)?;
        writeln!(out, "];")
    }
}

fn write_rows(bytes: &[u8], out: &mut dyn Write) -> io::Result<()> {
    for (index, byte) in bytes.iter().enumerate() {
        if index % 8 == 0 {
            if index != 0 {
                writeln!(out)?;
            }
            write!(out, "  ")?;
        } else {
            write!(out, " ")?;
        }
        write!(out, "0x{byte:02x},")?;
    }
    if !bytes.is_empty() {
        writeln!(out)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    name: &'a str,
    len: usize,
    bytes: &'a [u8],
}

pub struct JsonEmitter;

impl Emitter for JsonEmitter {
    fn emit_to(&self, name: &str, bytes: &[u8], out: &mut dyn Write) -> io::Result<()> {
        let payload = JsonOutput {
            name,
            len: bytes.len(),
            bytes,
        };
        serde_json::to_writer_pretty(&mut *out, &payload).map_err(io::Error::other)?;
        writeln!(out)
    }
}
