//! SVG rendering of a converted instance and a solver tour.
//!
//! A pure downstream reader: it consumes the normalized node list and a
//! tour file (whitespace-separated normalized node indices) and draws
//! points plus the connecting route. It never feeds anything back into
//! the conversion pipeline.

use crate::error::{ConvertError, Result};
use crate::instance::Instance;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// SVG viewer with explicit canvas geometry.
pub struct Visualizer {
    /// Canvas width
    pub width: f64,
    /// Canvas height
    pub height: f64,
    /// Margin around the drawing area
    pub margin: f64,
    /// Node radius
    pub node_radius: f64,
}

impl Default for Visualizer {
    fn default() -> Self {
        Visualizer {
            width: 600.0,
            height: 600.0,
            margin: 50.0,
            node_radius: 5.0,
        }
    }
}

impl Visualizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the instance's normalized points and, when given, a tour
    /// over them. Tour entries must be valid normalized node indices.
    pub fn render(&self, instance: &Instance, tour: Option<&[usize]>) -> Result<String> {
        if let Some(tour) = tour {
            if let Some(&bad) = tour.iter().find(|&&i| i >= instance.num_nodes()) {
                return Err(ConvertError::malformed(
                    1,
                    format!(
                        "tour references node {} but the instance has {} nodes",
                        bad,
                        instance.num_nodes()
                    ),
                ));
            }
        }

        let mut svg = String::new();

        let (min_x, max_x, min_y, max_y) = self.bounds(instance);
        let scale_x = (self.width - 2.0 * self.margin) / ((max_x - min_x) as f64).max(1.0);
        let scale_y = (self.height - 2.0 * self.margin) / ((max_y - min_y) as f64).max(1.0);
        let scale = scale_x.min(scale_y);

        let transform = |x: i64, y: i64| -> (f64, f64) {
            let tx = self.margin + (x - min_x) as f64 * scale;
            let ty = self.height - self.margin - (y - min_y) as f64 * scale;
            (tx, ty)
        };

        svg.push_str(&format!(
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
<style>
    .depot {{ fill: #e74c3c; stroke: #c0392b; stroke-width: 2; }}
    .pickup {{ fill: #2ecc71; stroke: #27ae60; stroke-width: 2; }}
    .delivery {{ fill: #f39c12; stroke: #d68910; stroke-width: 2; }}
    .edge {{ stroke: #34495e; stroke-width: 2; fill: none; }}
    .label {{ font-family: Arial; font-size: 10px; fill: #2c3e50; }}
    .title {{ font-family: Arial; font-size: 14px; fill: #2c3e50; font-weight: bold; }}
</style>
<rect width="100%" height="100%" fill="#ecf0f1"/>
"##,
            self.width, self.height, self.width, self.height
        ));

        svg.push_str(&format!(
            r#"<text x="{}" y="25" class="title">Instance: {} | {} nodes | capacity {}</text>
"#,
            self.margin,
            instance.name,
            instance.num_nodes(),
            instance.capacity
        ));

        if let Some(tour) = tour {
            for pair in tour.windows(2) {
                let (x1, y1) = transform(instance.nodes[pair[0]].x, instance.nodes[pair[0]].y);
                let (x2, y2) = transform(instance.nodes[pair[1]].x, instance.nodes[pair[1]].y);
                svg.push_str(&format!(
                    r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" class="edge"/>
"#,
                    x1, y1, x2, y2
                ));
            }
        }

        // Depot at 0; task k's pickup at 2k+1, its delivery at 2k+2.
        for (index, point) in instance.nodes.iter().enumerate() {
            let class = if index == 0 {
                "depot"
            } else if index % 2 == 1 {
                "pickup"
            } else {
                "delivery"
            };

            let (x, y) = transform(point.x, point.y);
            svg.push_str(&format!(
                r##"<circle cx="{:.2}" cy="{:.2}" r="{}" class="{}"/>
"##,
                x, y, self.node_radius, class
            ));
            svg.push_str(&format!(
                r##"<text x="{:.2}" y="{:.2}" class="label" text-anchor="middle">{}</text>
"##,
                x,
                y - self.node_radius - 3.0,
                index
            ));
        }

        let legend_y = self.height - 30.0;
        svg.push_str(&format!(
            r##"<rect x="{}" y="{}" width="15" height="15" class="depot"/>
<text x="{}" y="{}" class="label">Depot</text>
<rect x="{}" y="{}" width="15" height="15" class="pickup"/>
<text x="{}" y="{}" class="label">Pickup</text>
<rect x="{}" y="{}" width="15" height="15" class="delivery"/>
<text x="{}" y="{}" class="label">Delivery</text>
"##,
            self.margin,
            legend_y,
            self.margin + 20.0,
            legend_y + 12.0,
            self.margin + 80.0,
            legend_y,
            self.margin + 100.0,
            legend_y + 12.0,
            self.margin + 160.0,
            legend_y,
            self.margin + 180.0,
            legend_y + 12.0
        ));

        svg.push_str("</svg>");

        Ok(svg)
    }

    /// Save SVG to file
    pub fn save_svg<P: AsRef<Path>>(&self, svg: &str, path: P) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(svg.as_bytes())?;
        Ok(())
    }

    fn bounds(&self, instance: &Instance) -> (i64, i64, i64, i64) {
        let mut min_x = i64::MAX;
        let mut max_x = i64::MIN;
        let mut min_y = i64::MAX;
        let mut max_y = i64::MIN;

        for point in &instance.nodes {
            min_x = min_x.min(point.x);
            max_x = max_x.max(point.x);
            min_y = min_y.min(point.y);
            max_y = max_y.max(point.y);
        }

        (min_x, max_x, min_y, max_y)
    }
}
