//! Console input
//!
//! Turns interactive lines into records.

use std::io::{BufRead, Write};

use crate::error::Result;
use crate::protocol::RecordSet;

/// Prompt printed before each line
pub const PROMPT: &str = "> ";

/// Read lines into a record set until an empty line or end of input
///
/// Lines are taken as raw bytes. Each one is logged and stored without its
/// line ending, followed by a NUL terminator.
pub fn read_records<R: BufRead, W: Write>(input: &mut R, prompt: &mut W) -> Result<RecordSet> {
    let mut records = RecordSet::new();
    let mut line = Vec::new();

    loop {
        prompt.write_all(PROMPT.as_bytes())?;
        prompt.flush()?;

        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }

        let text = trim_line_ending(&line);
        if text.is_empty() {
            break;
        }

        tracing::info!("{}", String::from_utf8_lossy(text));
        let mut record = Vec::with_capacity(text.len() + 1);
        record.extend_from_slice(text);
        record.push(0);
        records.append(&record);
    }

    Ok(records)
}

/// Strip a trailing `\n` or `\r\n`
fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
