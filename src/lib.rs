//! PSA Converter Library
//!
//! Converts pickup-and-delivery benchmark instances from their source
//! dialects into the canonical PSA matrix format consumed by solvers and
//! visualizers.
//!
//! # Features
//!
//! - Dialect parsers for Hosny PDPTW (split pickup/delivery halves) and
//!   Wan-Rong-Jih CTSPPDTW (comment-marked node table) files
//! - Node normalization: depot at 0, task k's pair at 2k+1 / 2k+2
//! - Dense integer distance matrix (Euclidean, plus a legacy
//!   compatibility metric)
//! - Deterministic PSA serialization
//! - Batch conversion over instance directories with CSV summaries
//! - SVG rendering of converted instances and solver tours
//!
//! # Example
//!
//! ```no_run
//! use psa_converter::convert::{convert_file, default_output_path, ConvertOptions};
//! use std::path::Path;
//!
//! let input = Path::new("instances/test40");
//! let output = default_output_path(input);
//! let conversion = convert_file(input, &output, &ConvertOptions::default()).unwrap();
//!
//! println!("{} tasks converted", conversion.instance.num_tasks());
//! ```

pub mod batch;
pub mod convert;
pub mod error;
pub mod instance;
pub mod matrix;
pub mod parsers;
pub mod psa;
pub mod visualization;

pub use error::{ConvertError, Result};
pub use instance::Instance;
pub use parsers::Dialect;
