use crate::parser::Parser;

use std::io::{self, BufRead, Seek, SeekFrom, Write};

use anyhow::{Context, Result};

/// Converts an SRT stream into a timeline and patches the real total into
/// the first line. The header is first written with a zero total, then
/// rewritten in place once the body has been streamed. Placeholder and
/// final header have the same byte length: a fixed six-digit seconds field
/// and the same destination name.
pub fn serialise<R: BufRead, W: Write + Seek>(
    destination_name: &str,
    source: R,
    sink: &mut W,
) -> Result<()> {
    let total = convert(destination_name, source, sink)?;

    sink.seek(SeekFrom::Start(0))
        .context("Failed to rewind the output stream")?;
    write_record(sink, total, destination_name).context("Failed to rewrite the header")?;

    Ok(())
}

/// Writes the placeholder header plus one record per subtitle block. Each
/// record carries the elapsed seconds accumulated *before* its block, so
/// the first block is always at 000000. Returns the total elapsed seconds.
pub fn convert<R: BufRead, W: Write>(
    destination_name: &str,
    source: R,
    sink: &mut W,
) -> Result<i64> {
    let blocks = Parser::new().parse(source)?;

    write_record(sink, 0, destination_name)?;

    let mut elapsed: i64 = 0;
    for block in &blocks {
        write_record(sink, elapsed, &block.flattened_text())?;
        elapsed += block.elapsed_seconds();
    }

    Ok(elapsed)
}

// Tabs or newlines inside the payload are written through unescaped and
// will corrupt the line boundary.
fn write_record<W: Write>(buf: &mut W, seconds: i64, text: &str) -> io::Result<()> {
    writeln!(buf, "{:06}\t{}", seconds, text)
}
