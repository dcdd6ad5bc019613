//! The canonical PSA text format.
//!
//! ```text
//! <N> <capacity> <start_node_index>
//! <row 0 of the distance matrix, space-separated integers>
//! ...
//! <row N-1>
//! <task 0: pickup delivery demand pickup_start pickup_end delivery_start delivery_end>
//! ...
//! ```
//!
//! Serialization is deterministic: identical instance data yields
//! byte-identical output. The last constraint line carries no trailing
//! newline, matching the emitters this format originates from; consumers
//! tolerate one.

use crate::error::{ConvertError, Result};
use crate::instance::Instance;
use crate::matrix::DistanceMatrix;

/// Serialize a normalized instance and its distance matrix to PSA text.
pub fn serialize(instance: &Instance, matrix: &DistanceMatrix) -> String {
    debug_assert_eq!(instance.num_nodes(), matrix.len());

    let mut out = String::new();
    out.push_str(&format!(
        "{} {} {}\n",
        instance.num_nodes(),
        instance.capacity,
        instance.start_node
    ));

    for row in matrix.rows() {
        let cells: Vec<String> = row.iter().map(|d| d.to_string()).collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }

    let constraints: Vec<String> = instance
        .tasks
        .iter()
        .map(|t| {
            format!(
                "{} {} {} {} {} {} {}",
                t.pickup,
                t.delivery,
                t.demand,
                t.pickup_window.start,
                t.pickup_window.end,
                t.delivery_window.start,
                t.delivery_window.end
            )
        })
        .collect();
    out.push_str(&constraints.join("\n"));

    out
}

/// The scalar header of a PSA file, as downstream consumers read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PsaHeader {
    pub num_nodes: usize,
    pub capacity: i64,
    pub start_node: usize,
}

impl PsaHeader {
    /// Parse the first line of PSA content.
    pub fn parse(content: &str) -> Result<Self> {
        let first = content
            .lines()
            .next()
            .ok_or_else(|| ConvertError::malformed(1, "empty PSA file"))?;
        let fields: Vec<&str> = first.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(ConvertError::malformed(
                1,
                format!("PSA header expects 3 fields, found {}", fields.len()),
            ));
        }
        let parse = |tok: &str| -> Result<i64> {
            tok.parse::<i64>()
                .map_err(|_| ConvertError::malformed(1, format!("invalid header field '{}'", tok)))
        };
        Ok(PsaHeader {
            num_nodes: parse(fields[0])? as usize,
            capacity: parse(fields[1])?,
            start_node: parse(fields[2])? as usize,
        })
    }
}

/// Read a solution/tour file: a whitespace-separated ordered sequence of
/// normalized node indices.
pub fn read_tour(content: &str) -> Result<Vec<usize>> {
    content
        .split_whitespace()
        .map(|tok| {
            tok.parse::<usize>()
                .map_err(|_| ConvertError::malformed(1, format!("invalid tour entry '{}'", tok)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{Point, RawInstance, RawTask, TimeWindow};
    use crate::matrix::{DistanceMatrix, DistanceMetric};
    use std::collections::HashMap;

    /// Depot (0,0), pickup (3,0), delivery (3,4), capacity 10, demand 2,
    /// both windows [0, 100].
    fn single_task_instance() -> Instance {
        let mut points = HashMap::new();
        points.insert(0, Point::new(0, 0));
        points.insert(1, Point::new(3, 0));
        points.insert(2, Point::new(3, 4));
        let window = TimeWindow { start: 0, end: 100 };

        RawInstance {
            name: "single".to_string(),
            capacity: 10,
            start: 0,
            points,
            tasks: vec![RawTask {
                pickup: 1,
                delivery: 2,
                demand: 2,
                pickup_window: window,
                delivery_window: window,
            }],
        }
        .normalize()
        .unwrap()
    }

    #[test]
    fn test_single_task_byte_layout() {
        let instance = single_task_instance();
        let matrix = DistanceMatrix::build(&instance.nodes, DistanceMetric::Euclidean);
        let text = serialize(&instance, &matrix);

        assert_eq!(text, "3 10 0\n0 3 5\n3 0 4\n5 4 0\n1 2 2 0 100 0 100");
    }

    #[test]
    fn test_determinism() {
        let instance = single_task_instance();
        let matrix = DistanceMatrix::build(&instance.nodes, DistanceMetric::Euclidean);

        assert_eq!(serialize(&instance, &matrix), serialize(&instance, &matrix));
    }

    #[test]
    fn test_header_round_trip() {
        let instance = single_task_instance();
        let matrix = DistanceMatrix::build(&instance.nodes, DistanceMetric::Euclidean);
        let header = PsaHeader::parse(&serialize(&instance, &matrix)).unwrap();

        assert_eq!(header.num_nodes, instance.num_nodes());
        assert_eq!(header.capacity, instance.capacity);
        assert_eq!(header.start_node, instance.start_node);
    }

    #[test]
    fn test_header_rejects_wrong_arity() {
        assert!(PsaHeader::parse("3 10\n").is_err());
        assert!(PsaHeader::parse("").is_err());
    }

    #[test]
    fn test_read_tour() {
        assert_eq!(read_tour("0 1 2\n0").unwrap(), vec![0, 1, 2, 0]);
        assert!(read_tour("0 x 2").is_err());
    }
}
