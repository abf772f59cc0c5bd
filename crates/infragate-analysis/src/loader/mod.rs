//! Report loader — reads JSON reports into generic trees.
//!
//! In lenient mode a missing file or malformed JSON never fails the run: the
//! loader substitutes the empty default document for the report kind and
//! records why on the returned `LoadedReport`. Strict mode returns the
//! failure as a `LoadError` instead.

pub mod types;

pub use types::*;

use infragate_core::config::AcquisitionMode;
use infragate_core::errors::LoadError;
use serde_json::Value;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Load one report.
pub fn load(
    source: &ReportSource,
    kind: ReportKind,
    mode: AcquisitionMode,
) -> Result<LoadedReport, LoadError> {
    let name = source.name();
    match read_tree(source) {
        Ok(tree) => {
            tracing::debug!(source = %name, ?kind, "report loaded");
            Ok(LoadedReport {
                source_name: name,
                kind,
                tree,
                substituted: None,
            })
        }
        Err(error) => match mode {
            AcquisitionMode::Strict => Err(error),
            AcquisitionMode::Lenient => {
                let cause = SubstitutionCause::from(&error);
                tracing::debug!(source = %name, ?kind, %error, "substituting empty default report");
                Ok(LoadedReport {
                    source_name: name,
                    kind,
                    tree: kind.empty_default(),
                    substituted: Some(cause),
                })
            }
        },
    }
}

fn read_tree(source: &ReportSource) -> Result<Value, LoadError> {
    match source {
        ReportSource::Path(path) => {
            let bytes = std::fs::read(path).map_err(|e| LoadError::Read {
                source_name: path.display().to_string(),
                message: e.to_string(),
            })?;
            parse_bytes(&path.display().to_string(), &bytes)
        }
        ReportSource::Bytes { name, bytes } => parse_bytes(name, bytes),
    }
}

/// Parse raw bytes into a tree. A leading UTF-8 BOM is skipped.
pub fn parse_bytes(name: &str, bytes: &[u8]) -> Result<Value, LoadError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    serde_json::from_slice(bytes).map_err(|e| LoadError::Parse {
        source_name: name.to_string(),
        message: e.to_string(),
    })
}
