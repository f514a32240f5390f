use crate::error::SubtimeError;
use crate::srt::SubtitleBlock;

use std::io::BufRead;
use std::time::Duration;

use anyhow::{Context, Result};
use nom::bytes::complete::tag;
use nom::character::complete::digit1;
use nom::combinator::{all_consuming, map_res};
use nom::error::{convert_error, VerboseError};
use nom::{Err, IResult};

pub struct Parser;
impl Parser {
    pub fn new() -> Self {
        Self {}
    }

    /// Reads the stream to the end, grouping consecutive non-empty lines
    /// into subtitle blocks. An empty group (two blank lines in a row, or a
    /// blank line at the end of the stream) terminates parsing.
    pub fn parse<R: BufRead>(&mut self, source: R) -> Result<Vec<SubtitleBlock>> {
        let mut blocks = Vec::new();
        let mut lines = source.lines();
        let mut first = true;

        loop {
            let mut group: Vec<String> = Vec::new();

            for line in lines.by_ref() {
                let mut line = line.context("Failed to read from subtitle stream")?;
                if first {
                    // Subtitle files exported on Windows often lead with a BOM.
                    if let Some(stripped) = line.strip_prefix('\u{FEFF}') {
                        line = stripped.to_string();
                    }
                    first = false;
                }
                if line.is_empty() {
                    break;
                }
                group.push(line);
            }

            if group.is_empty() {
                break;
            }

            blocks.push(parse_block(&group)?);
        }

        Ok(blocks)
    }
}

pub fn parse_block(lines: &[String]) -> Result<SubtitleBlock, SubtimeError> {
    if lines.len() < 3 {
        return Err(SubtimeError::MalformedBlock(format!(
            "a block must have an index, a time range and at least one text line, got {} line(s)",
            lines.len()
        )));
    }

    // The index is never used downstream, so unparsable values collapse to 0.
    let index = lines[0].parse().unwrap_or(0);

    let timestamps: Vec<&str> = lines[1].split(" --> ").collect();
    if timestamps.len() != 2 {
        return Err(SubtimeError::MalformedBlock(format!(
            "expected exactly one ' --> ' separator in '{}'",
            lines[1]
        )));
    }

    let start = parse_timestamp(timestamps[0])?;
    let end = parse_timestamp(timestamps[1])?;

    Ok(SubtitleBlock {
        index,
        start,
        end,
        lines: lines[2..].to_vec(),
    })
}

pub fn parse_timestamp(input: &str) -> Result<Duration, SubtimeError> {
    match all_consuming(timestamp)(input) {
        Ok((_, duration)) => Ok(duration),
        Err(Err::Error(err)) | Err(Err::Failure(err)) => {
            Err(SubtimeError::Format(convert_error(input, err)))
        }
        Err(Err::Incomplete(_)) => {
            unreachable!("Incomplete data received by non-streaming parser.")
        }
    }
}

fn timestamp(input: &str) -> IResult<&str, Duration, VerboseError<&str>> {
    // Fields are not required to be zero-padded; `0:0:0,100` is accepted.
    let (input, hours) = number(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, minutes) = number(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, seconds) = number(input)?;
    let (input, _) = tag(",")(input)?;
    let (input, millis) = number(input)?;

    Ok((
        input,
        Duration::from_millis(
            millis + seconds * 1000 + minutes * 60 * 1000 + hours * 60 * 60 * 1000,
        ),
    ))
}

fn number(input: &str) -> IResult<&str, u64, VerboseError<&str>> {
    map_res(digit1, |s: &str| s.parse())(input)
}
