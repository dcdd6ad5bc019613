//! Parser for the Hosny PDPTW benchmark dialect.
//!
//! Layout, by line position:
//!
//! ```text
//! <capacity> <task_count>
//! <id> <x> <y> <demand> <tw_start> <tw_end>     depot record
//! <id> <x> <y> <demand> <tw_start> <tw_end>     pickup record, task 0
//! ...                                           task_count pickup records
//! <id> <x> <y> <demand> <tw_start> <tw_end>     delivery record, task 0
//! ...                                           task_count delivery records
//! ```
//!
//! A pickup record and its paired delivery record are related purely by
//! position: the delivery sits exactly `task_count` lines below its
//! pickup. The pairing uses that computed stride, never an id lookup.
//! The task demand is the pickup record's demand; the delivery record
//! contributes its time window only. Comment (`#`) and blank lines
//! occupy no positional slot.

use super::numeric_fields;
use crate::error::{ConvertError, Result};
use crate::instance::{Point, RawInstance, RawTask, TimeWindow};
use std::collections::HashMap;

struct Record {
    id: u64,
    point: Point,
    demand: i64,
    window: TimeWindow,
}

/// Parse one Hosny-dialect file into pre-normalization ingredients.
pub fn parse_hosny(name: &str, content: &str) -> Result<RawInstance> {
    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.starts_with('#') && !l.trim().is_empty())
        .collect();

    let (header_no, header) = *lines
        .first()
        .ok_or_else(|| ConvertError::malformed(1, "empty instance file"))?;
    let fields = numeric_fields(header_no, header, 2)?;
    let (capacity, task_count) = (fields[0], fields[1] as usize);
    if capacity <= 0 {
        return Err(ConvertError::malformed(header_no, "capacity must be positive"));
    }

    // The file must hold the depot plus two records per task; the table
    // bound comes from the header, before the remaining lines are counted.
    let record = |index: usize| -> Result<Record> {
        let (line_no, text) = *lines.get(index).ok_or_else(|| {
            ConvertError::malformed(
                lines.last().map(|(n, _)| *n).unwrap_or(1),
                format!(
                    "file holds {} records but {} are required (depot plus two per task)",
                    lines.len().saturating_sub(1),
                    1 + 2 * task_count
                ),
            )
        })?;
        let f = numeric_fields(line_no, text, 6)?;
        Ok(Record {
            id: f[0] as u64,
            point: Point::new(f[1], f[2]),
            demand: f[3],
            window: TimeWindow::checked(f[4], f[5], line_no)?,
        })
    };

    let mut points = HashMap::new();
    let depot = record(1)?;
    points.insert(depot.id, depot.point);

    let mut tasks = Vec::with_capacity(task_count);
    for k in 0..task_count {
        let pickup = record(2 + k)?;
        let delivery = record(2 + k + task_count)?;
        points.insert(pickup.id, pickup.point);
        points.insert(delivery.id, delivery.point);
        tasks.push(RawTask {
            pickup: pickup.id,
            delivery: delivery.id,
            demand: pickup.demand,
            pickup_window: pickup.window,
            delivery_window: delivery.window,
        });
    }

    Ok(RawInstance {
        name: name.to_string(),
        capacity,
        start: depot.id,
        points,
        tasks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // capacity 10, 2 tasks; depot, two pickups, then the two deliveries
    // at stride 2 below their pickups.
    const SAMPLE: &str = "\
10 2
0 40 179 0 0 100000
1 3 0 2 0 100
2 7 7 4 10 200
3 3 4 0 0 100
4 9 9 0 20 300
";

    #[test]
    fn test_parse_sample() {
        let raw = parse_hosny("sample", SAMPLE).unwrap();

        assert_eq!(raw.capacity, 10);
        assert_eq!(raw.tasks.len(), 2);
        assert_eq!(raw.start, 0);
        assert_eq!(raw.points[&0], Point::new(40, 179));

        let t0 = &raw.tasks[0];
        assert_eq!((t0.pickup, t0.delivery), (1, 3));
        assert_eq!(t0.demand, 2);
        assert_eq!(t0.pickup_window, TimeWindow { start: 0, end: 100 });
        assert_eq!(t0.delivery_window, TimeWindow { start: 0, end: 100 });

        // Delivery found by stride, not id: task 1 pairs line 4 with line 6.
        let t1 = &raw.tasks[1];
        assert_eq!((t1.pickup, t1.delivery), (2, 4));
        assert_eq!(t1.demand, 4);
        assert_eq!(t1.delivery_window, TimeWindow { start: 20, end: 300 });
    }

    #[test]
    fn test_header_arity_is_fatal() {
        let bad = "10 2 99\n0 40 179 0 0 100000\n";
        match parse_hosny("bad", bad) {
            Err(ConvertError::MalformedInstance { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected MalformedInstance, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_delivery_half() {
        // Declares 2 tasks but the second delivery record is missing.
        let truncated = "\
10 2
0 40 179 0 0 100000
1 3 0 2 0 100
2 7 7 4 10 200
3 3 4 0 0 100
";
        assert!(matches!(
            parse_hosny("trunc", truncated),
            Err(ConvertError::MalformedInstance { .. })
        ));
    }

    #[test]
    fn test_record_arity_is_fatal() {
        let bad = "\
10 1
0 40 179 0 0 100000
1 3 0 2 0
3 3 4 0 0 100
";
        assert!(matches!(
            parse_hosny("bad", bad),
            Err(ConvertError::MalformedInstance { line: 3, .. })
        ));
    }

    #[test]
    fn test_empty_file() {
        assert!(parse_hosny("empty", "").is_err());
    }
}
