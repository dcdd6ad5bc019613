//! The per-file conversion pipeline.
//!
//! Raw file -> intermediate representation -> normalized nodes ->
//! distance matrix -> serialized text. Each conversion is a pure function
//! of one input file; nothing is shared across files and nothing reads
//! back its own output.

use crate::error::Result;
use crate::instance::Instance;
use crate::matrix::{DistanceMatrix, DistanceMetric};
use crate::parsers::Dialect;
use crate::psa;
use std::fs;
use std::path::{Path, PathBuf};

/// Knobs for one conversion run.
#[derive(Debug, Clone, Copy)]
pub struct ConvertOptions {
    /// Source dialect; `None` sniffs the content.
    pub dialect: Option<Dialect>,
    pub metric: DistanceMetric,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            dialect: None,
            metric: DistanceMetric::Euclidean,
        }
    }
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Dialect the source was parsed as.
    pub dialect: Dialect,
    /// The normalized instance, kept for statistics and rendering.
    pub instance: Instance,
    /// The serialized PSA text.
    pub psa: String,
}

/// Convert raw source text to PSA text.
pub fn convert_source(name: &str, content: &str, options: &ConvertOptions) -> Result<Conversion> {
    let dialect = options.dialect.unwrap_or_else(|| Dialect::sniff(content));
    log::debug!("parsing '{}' as {} dialect", name, dialect);

    let instance = dialect.parse(name, content)?.normalize()?;
    log::info!(
        "'{}': {} tasks, {} nodes, capacity {}",
        name,
        instance.num_tasks(),
        instance.num_nodes(),
        instance.capacity
    );

    let matrix = DistanceMatrix::build(&instance.nodes, options.metric);
    let psa = psa::serialize(&instance, &matrix);

    Ok(Conversion {
        dialect,
        instance,
        psa,
    })
}

/// The conventional output name: the original file name with `.psa`
/// appended (`test40` -> `test40.psa`).
pub fn default_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}.psa", name))
}

/// Convert one file on disk. Serialization happens fully in memory before
/// any write; a failed write removes the partial output so a failed
/// conversion never leaves a truncated `.psa` in place.
pub fn convert_file(input: &Path, output: &Path, options: &ConvertOptions) -> Result<Conversion> {
    let content = fs::read_to_string(input)?;
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());

    let conversion = convert_source(&name, &content, options)?;

    if let Err(e) = fs::write(output, &conversion.psa) {
        let _ = fs::remove_file(output);
        return Err(e.into());
    }
    Ok(conversion)
}
