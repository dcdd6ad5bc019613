//! Dialect front ends.
//!
//! One module per source benchmark set. Each parser replicates its
//! dialect's positional line contract (fixed-order sections detected by
//! line position, not by a self-describing schema) and produces the same
//! [`RawInstance`](crate::instance::RawInstance) intermediate shape.
//!
//! Fields are split on whitespace and checked against an exact per-line
//! arity; a count or type mismatch is a `MalformedInstance` error.

mod hosny;
pub use hosny::parse_hosny;

mod wan_rong_jih;
pub use wan_rong_jih::parse_wan_rong_jih;

use crate::error::{ConvertError, Result};
use crate::instance::RawInstance;

/// A supported source dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Hosny PDPTW files: pickup and delivery records split across two
    /// halves of the file, paired by a row stride equal to the task count.
    Hosny,
    /// Wan-Rong-Jih CTSPPDTW files: `#`-comment lines, a node table, a
    /// designated start node, then explicit task records.
    WanRongJih,
}

impl Dialect {
    /// Guess the dialect from raw content: only the Wan-Rong-Jih corpus
    /// carries `#` comment lines.
    pub fn sniff(content: &str) -> Dialect {
        if content.lines().any(|l| l.starts_with('#')) {
            Dialect::WanRongJih
        } else {
            Dialect::Hosny
        }
    }

    /// Run this dialect's parser.
    pub fn parse(self, name: &str, content: &str) -> Result<RawInstance> {
        match self {
            Dialect::Hosny => parse_hosny(name, content),
            Dialect::WanRongJih => parse_wan_rong_jih(name, content),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Hosny => write!(f, "hosny"),
            Dialect::WanRongJih => write!(f, "wan-rong-jih"),
        }
    }
}

/// Split `text` on whitespace and parse exactly `arity` non-negative
/// integer fields. The corpora never carry signed or fractional numbers;
/// anything else on a data line is a malformed instance, not input to
/// recover from.
pub(crate) fn numeric_fields(line: usize, text: &str, arity: usize) -> Result<Vec<i64>> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != arity {
        return Err(ConvertError::malformed(
            line,
            format!("expected {} fields, found {}", arity, tokens.len()),
        ));
    }
    tokens
        .iter()
        .map(|tok| {
            tok.parse::<u64>().map(|v| v as i64).map_err(|_| {
                ConvertError::malformed(line, format!("invalid numeric field '{}'", tok))
            })
        })
        .collect()
}
