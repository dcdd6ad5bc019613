//! Parser for the Wan-Rong-Jih CTSPPDTW benchmark dialect.
//!
//! Layout, by non-comment line position:
//!
//! ```text
//! # free-form comments
//! <task_count> <capacity>
//! # locations <L>
//! <id> <x> <y>              node table, L lines
//! <start_id>                designated start node
//! <task_id> <pickup_id> <delivery_id> <pw_start> <pw_end> <dw_start> <dw_end> <demand>
//! ...                       one record per task
//! ```
//!
//! Lines starting with `#` are comments and do not occupy a positional
//! slot, with one corpus quirk: the node-table length is carried in the
//! `# locations <L>` comment and must be seen before the table starts.
//! Task records reference node-table ids; a reference to an id the table
//! never defined is fatal.

use super::numeric_fields;
use crate::error::{ConvertError, Result};
use crate::instance::{Point, RawInstance, RawTask, TimeWindow};
use std::collections::HashMap;

/// Parse one Wan-Rong-Jih-dialect file into pre-normalization ingredients.
pub fn parse_wan_rong_jih(name: &str, content: &str) -> Result<RawInstance> {
    let mut locations: Option<usize> = None;
    let mut data: Vec<(usize, &str)> = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let line_no = i + 1;
        if line.starts_with('#') {
            if line.contains("locations") {
                let tokens: Vec<&str> = line.split_whitespace().collect();
                let payload = tokens.last().and_then(|t| t.parse::<usize>().ok());
                locations = Some(payload.ok_or_else(|| {
                    ConvertError::malformed(line_no, "unreadable '# locations' comment")
                })?);
            }
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        data.push((line_no, line));
    }

    let last_line = content.lines().count().max(1);
    let mut cursor = data.into_iter();
    let mut next = |what: &str| {
        cursor
            .next()
            .ok_or_else(|| ConvertError::malformed(last_line, format!("file ends before {}", what)))
    };

    let (header_no, header) = next("header")?;
    let fields = numeric_fields(header_no, header, 2)?;
    let (task_count, capacity) = (fields[0] as usize, fields[1]);
    if capacity <= 0 {
        return Err(ConvertError::malformed(header_no, "capacity must be positive"));
    }

    // The table bound comes from the locations comment, before the count
    // of remaining records is known.
    let table_len = locations.ok_or_else(|| {
        ConvertError::malformed(header_no, "no '# locations' comment before node table")
    })?;

    let mut points = HashMap::with_capacity(table_len);
    for _ in 0..table_len {
        let (line_no, text) = next("end of node table")?;
        let f = numeric_fields(line_no, text, 3)?;
        points.insert(f[0] as u64, Point::new(f[1], f[2]));
    }

    let (start_no, start_text) = next("start node line")?;
    let start = numeric_fields(start_no, start_text, 1)?[0] as u64;

    let mut tasks = Vec::with_capacity(task_count);
    for (line_no, text) in cursor {
        let f = numeric_fields(line_no, text, 8)?;
        // f[0] is the task's own id, positional noise in this dialect.
        tasks.push(RawTask {
            pickup: f[1] as u64,
            delivery: f[2] as u64,
            demand: f[7],
            pickup_window: TimeWindow::checked(f[3], f[4], line_no)?,
            delivery_window: TimeWindow::checked(f[5], f[6], line_no)?,
        });
    }

    if tasks.len() != task_count {
        return Err(ConvertError::malformed(
            header_no,
            format!(
                "header declares {} tasks but file contains {} task records",
                task_count,
                tasks.len()
            ),
        ));
    }

    Ok(RawInstance {
        name: name.to_string(),
        capacity,
        start,
        points,
        tasks,
    })
}
