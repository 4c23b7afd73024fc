//! Operation scripts for `fakeboard exec`.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use fakeboard_core::{Board, DeviceError, Offset, Word};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Name(u32),
    Size(u32),
    Get(u32, Offset),
    Put(u32, Offset, Word),
    Dump(u32),
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Name(id) => write!(f, "name {}", id),
            Op::Size(id) => write!(f, "size {}", id),
            Op::Get(id, offset) => write!(f, "get {} {}", id, offset),
            Op::Put(id, offset, value) => write!(f, "put {} {} {:#x}", id, offset, value),
            Op::Dump(id) => write!(f, "dump {}", id),
        }
    }
}

/// Parses decimal or `0x` hex.
fn parse_number(text: &str) -> Result<u64> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.with_context(|| format!("'{}' is not a number", text))
}

fn parse_u32(text: &str) -> Result<u32> {
    let value = parse_number(text)?;
    u32::try_from(value).map_err(|_| anyhow!("'{}' does not fit in 32 bits", text))
}

impl FromStr for Op {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let op = match words.as_slice() {
            ["name", id] => Op::Name(parse_u32(id)?),
            ["size", id] => Op::Size(parse_u32(id)?),
            ["get", id, offset] => Op::Get(parse_u32(id)?, parse_u32(offset)?),
            ["put", id, offset, value] => Op::Put(parse_u32(id)?, parse_u32(offset)?, parse_number(value)?),
            ["dump", id] => Op::Dump(parse_u32(id)?),
            [] => bail!("empty operation"),
            _ => bail!("unrecognized operation '{}'", line),
        };
        Ok(op)
    }
}

pub fn parse_script(lines: &[String]) -> Result<Vec<Op>> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| line.parse::<Op>().with_context(|| format!("operation {}", i + 1)))
        .collect()
}

/// Runs one operation and returns the lines it prints.
pub fn execute(board: &mut Board, op: Op) -> Result<Vec<String>, DeviceError> {
    let lines = match op {
        Op::Name(id) => vec![board.device_name(id)?.to_string()],
        Op::Size(id) => vec![board.device_size(id)?.to_string()],
        Op::Get(id, offset) => vec![format!("{:#x}", board.device_get(id, offset)?)],
        Op::Put(id, offset, value) => {
            board.device_put(id, offset, value)?;
            vec!["ok".to_string()]
        }
        Op::Dump(id) => {
            let size = board.device_size(id)?;
            let mut lines = Vec::with_capacity(size);
            for offset in 0..size as Offset {
                lines.push(format!("[{}] {:#018x}", offset, board.device_get(id, offset)?));
            }
            lines
        }
    };
    Ok(lines)
}
