//! Reading item lists and writing round manifests.
//!
//! Input is delimited text with a header line followed by one
//! `id,latitude,longitude,weight` record per line. Output is one line per
//! round, either `number, id, id, ...` or a JSON object per line.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::item::{Item, ItemId, validate_items};
use crate::planner::Round;

/// Parse a full item list. The first line is a header and is skipped;
/// blank lines are ignored.
pub fn read_items<R: BufRead>(reader: R) -> Result<Vec<Item>> {
    let mut items = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if idx == 0 {
            continue;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        items.try_reserve(1)?;
        items.push(parse_record(trimmed, idx + 1)?);
    }

    validate_items(&items)?;
    Ok(items)
}

/// Parse a single `id,latitude,longitude,weight` record.
pub fn parse_record(record: &str, line: usize) -> Result<Item> {
    let fields: Vec<&str> = record.split(',').map(str::trim).collect();
    if fields.len() != 4 {
        return Err(Error::Parse {
            line,
            msg: format!("expected 4 fields, got {}", fields.len()),
        });
    }

    let id = fields[0].parse::<ItemId>().map_err(|e| Error::Parse {
        line,
        msg: format!("invalid id {:?}: {}", fields[0], e),
    })?;
    let lat = parse_f64(fields[1], "latitude", line)?;
    let lon = parse_f64(fields[2], "longitude", line)?;
    let weight = parse_f64(fields[3], "weight", line)?;

    Ok(Item::new(id, lat, lon, weight))
}

fn parse_f64(field: &str, name: &str, line: usize) -> Result<f64> {
    field.parse::<f64>().map_err(|e| Error::Parse {
        line,
        msg: format!("invalid {} {:?}: {}", name, field, e),
    })
}

/// Write `round` as `number, id, id, ...` followed by a newline.
pub fn write_round<W: Write>(writer: &mut W, round: &Round) -> Result<()> {
    write!(writer, "{}", round.number)?;
    for id in &round.ids {
        write!(writer, ", {}", id)?;
    }
    writeln!(writer)?;
    Ok(())
}

/// JSON form of a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: usize,
    pub ids: Vec<ItemId>,
    pub total_weight: f64,
}

impl From<&Round> for RoundRecord {
    fn from(round: &Round) -> Self {
        Self {
            round: round.number,
            ids: round.ids.clone(),
            total_weight: round.total_weight,
        }
    }
}

/// Write `round` as a single JSON object followed by a newline.
pub fn write_round_json<W: Write>(writer: &mut W, round: &Round) -> Result<()> {
    serde_json::to_writer(&mut *writer, &RoundRecord::from(round))?;
    writeln!(writer)?;
    Ok(())
}
