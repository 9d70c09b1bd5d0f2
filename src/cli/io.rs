//! Stdin/stdout handling for `exec`
//!
//! Input: one JSON template read to end of stdin.
//! Output: one envelope as a single JSON line on stdout.

use std::io::{self, Read, Write};

use super::errors::CliResult;
use crate::control::Envelope;
use crate::record::Codec;

/// Read the whole request body from stdin
pub fn read_body() -> CliResult<Vec<u8>> {
    let mut body = Vec::new();
    io::stdin().lock().read_to_end(&mut body)?;
    Ok(body)
}

/// Write an envelope to stdout
pub fn write_envelope(envelope: &Envelope) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(&Codec::encode(envelope))?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
