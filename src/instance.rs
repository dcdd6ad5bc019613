//! Intermediate and normalized instance representations.
//!
//! A dialect parser produces a [`RawInstance`] keyed by the original file
//! identifiers. Normalization re-indexes every task's pickup/delivery pair
//! onto the sequential scheme used by the PSA format and by downstream
//! tour files: depot at 0, task k's pickup at 2k+1 and delivery at 2k+2.

use crate::error::{ConvertError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An (x, y) integer coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Point { x, y }
    }
}

/// A closed service interval with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    /// Build a window, rejecting reversed bounds as a parse error on `line`.
    pub fn checked(start: i64, end: i64, line: usize) -> Result<Self> {
        if start > end {
            return Err(ConvertError::malformed(
                line,
                format!("time window [{}, {}] has start > end", start, end),
            ));
        }
        Ok(TimeWindow { start, end })
    }
}

/// One demand unit as parsed, still referencing original node identifiers.
#[derive(Debug, Clone)]
pub struct RawTask {
    pub pickup: u64,
    pub delivery: u64,
    pub demand: i64,
    pub pickup_window: TimeWindow,
    pub delivery_window: TimeWindow,
}

/// Pre-normalization ingredients of an instance, as produced by a dialect
/// parser: point map keyed by original id, ordered task list, header scalars.
#[derive(Debug, Clone)]
pub struct RawInstance {
    pub name: String,
    pub capacity: i64,
    /// Original identifier of the depot/start node.
    pub start: u64,
    /// Original node identifier -> coordinates.
    pub points: HashMap<u64, Point>,
    /// Tasks in source-file order; this order fixes the normalized indices.
    pub tasks: Vec<RawTask>,
}

impl RawInstance {
    /// Resolve original identifiers and assign normalized node indices.
    ///
    /// Node 0 is the start/depot point; task k occupies nodes 2k+1 (pickup)
    /// and 2k+2 (delivery). Any identifier missing from the point map is an
    /// [`ConvertError::UnresolvedNodeReference`].
    pub fn normalize(self) -> Result<Instance> {
        let resolve = |id: u64| -> Result<Point> {
            self.points
                .get(&id)
                .copied()
                .ok_or(ConvertError::UnresolvedNodeReference { id })
        };

        let mut nodes = Vec::with_capacity(2 * self.tasks.len() + 1);
        nodes.push(resolve(self.start)?);

        let mut tasks = Vec::with_capacity(self.tasks.len());
        for (k, raw) in self.tasks.iter().enumerate() {
            nodes.push(resolve(raw.pickup)?);
            nodes.push(resolve(raw.delivery)?);
            tasks.push(Task {
                pickup: 2 * k + 1,
                delivery: 2 * k + 2,
                demand: raw.demand,
                pickup_window: raw.pickup_window,
                delivery_window: raw.delivery_window,
            });
        }

        Ok(Instance {
            name: self.name,
            capacity: self.capacity,
            start_node: 0,
            nodes,
            tasks,
        })
    }
}

/// A demand unit in normalized indexing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Normalized pickup node index (2k+1 for task k).
    pub pickup: usize,
    /// Normalized delivery node index (2k+2 for task k).
    pub delivery: usize,
    pub demand: i64,
    pub pickup_window: TimeWindow,
    pub delivery_window: TimeWindow,
}

/// The normalized whole: 2T+1 nodes (depot plus one pickup/delivery pair
/// per task), vehicle capacity, and the ordered task list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub name: String,
    pub capacity: i64,
    /// Start node index in normalized numbering; always 0.
    pub start_node: usize,
    pub nodes: Vec<Point>,
    pub tasks: Vec<Task>,
}

impl Instance {
    /// Total node count N = 2T + 1.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Summary figures for the analyze command.
    pub fn statistics(&self) -> InstanceStatistics {
        let total_demand: i64 = self.tasks.iter().map(|t| t.demand).sum();
        let max_demand = self.tasks.iter().map(|t| t.demand).max().unwrap_or(0);

        let min_x = self.nodes.iter().map(|p| p.x).min().unwrap_or(0);
        let max_x = self.nodes.iter().map(|p| p.x).max().unwrap_or(0);
        let min_y = self.nodes.iter().map(|p| p.y).min().unwrap_or(0);
        let max_y = self.nodes.iter().map(|p| p.y).max().unwrap_or(0);

        InstanceStatistics {
            name: self.name.clone(),
            num_nodes: self.num_nodes(),
            num_tasks: self.num_tasks(),
            capacity: self.capacity,
            total_demand,
            max_demand,
            extent: (max_x - min_x, max_y - min_y),
        }
    }
}

/// Statistics about a normalized instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceStatistics {
    pub name: String,
    pub num_nodes: usize,
    pub num_tasks: usize,
    pub capacity: i64,
    pub total_demand: i64,
    pub max_demand: i64,
    /// Width and height of the coordinate bounding box.
    pub extent: (i64, i64),
}

impl std::fmt::Display for InstanceStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Instance: {}", self.name)?;
        writeln!(
            f,
            "  Nodes: {} (1 depot + {} pickup/delivery pairs)",
            self.num_nodes, self.num_tasks
        )?;
        writeln!(f, "  Capacity: {}", self.capacity)?;
        writeln!(f, "  Total demand: {}", self.total_demand)?;
        writeln!(f, "  Max task demand: {}", self.max_demand)?;
        writeln!(f, "  Coordinate extent: {} x {}", self.extent.0, self.extent.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_two_tasks() -> RawInstance {
        let mut points = HashMap::new();
        points.insert(0, Point::new(0, 0));
        points.insert(1, Point::new(10, 0));
        points.insert(2, Point::new(10, 10));
        points.insert(3, Point::new(0, 10));
        points.insert(4, Point::new(5, 5));

        let window = TimeWindow { start: 0, end: 1000 };
        RawInstance {
            name: "two-tasks".to_string(),
            capacity: 20,
            start: 0,
            points,
            tasks: vec![
                RawTask {
                    pickup: 1,
                    delivery: 2,
                    demand: 3,
                    pickup_window: window,
                    delivery_window: window,
                },
                RawTask {
                    pickup: 3,
                    delivery: 4,
                    demand: 7,
                    pickup_window: window,
                    delivery_window: window,
                },
            ],
        }
    }

    #[test]
    fn test_normalized_indices() {
        let instance = raw_two_tasks().normalize().unwrap();

        assert_eq!(instance.num_nodes(), 5);
        assert_eq!(instance.start_node, 0);
        for (k, task) in instance.tasks.iter().enumerate() {
            assert_eq!(task.pickup, 2 * k + 1);
            assert_eq!(task.delivery, 2 * k + 2);
        }
    }

    #[test]
    fn test_node_order_follows_tasks() {
        let instance = raw_two_tasks().normalize().unwrap();

        assert_eq!(instance.nodes[0], Point::new(0, 0));
        assert_eq!(instance.nodes[1], Point::new(10, 0));
        assert_eq!(instance.nodes[2], Point::new(10, 10));
        assert_eq!(instance.nodes[3], Point::new(0, 10));
        assert_eq!(instance.nodes[4], Point::new(5, 5));
    }

    #[test]
    fn test_missing_reference_is_fatal() {
        let mut raw = raw_two_tasks();
        raw.tasks[1].delivery = 99;

        match raw.normalize() {
            Err(ConvertError::UnresolvedNodeReference { id }) => assert_eq!(id, 99),
            other => panic!("expected UnresolvedNodeReference, got {:?}", other),
        }
    }

    #[test]
    fn test_reversed_window_rejected() {
        assert!(TimeWindow::checked(10, 5, 3).is_err());
        assert!(TimeWindow::checked(5, 5, 3).is_ok());
    }

    #[test]
    fn test_statistics() {
        let stats = raw_two_tasks().normalize().unwrap().statistics();
        assert_eq!(stats.num_nodes, 5);
        assert_eq!(stats.num_tasks, 2);
        assert_eq!(stats.total_demand, 10);
        assert_eq!(stats.extent, (10, 10));
    }
}
