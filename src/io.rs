// File-level helpers for feeding the classifier.
//
// Loads raw frame dumps, parses changed-range lists produced by an external
// change detector, and summarizes a classified collection.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::config::CodecConfig;
use crate::delta::{Delta, DeltaList, DeltaOrder, PriorityList, PriorityOrder};
use crate::error::DeltaError;
use crate::frame::FramePair;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for file-backed operations.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("range list line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Delta(#[from] DeltaError),
}

// ---------------------------------------------------------------------------
// Frames
// ---------------------------------------------------------------------------

/// Read a raw frame dump, which must be exactly `buffer_size` bytes.
pub fn load_frame(path: &Path, buffer_size: usize) -> Result<Vec<u8>, IoError> {
    let data = fs::read(path).map_err(|source| IoError::Io {
        path: path.display().to_string(),
        source,
    })?;
    if data.len() != buffer_size {
        return Err(DeltaError::FrameSizeMismatch {
            which: "loaded",
            actual: data.len(),
            expected: buffer_size,
        }
        .into());
    }
    Ok(data)
}

// ---------------------------------------------------------------------------
// Range lists
// ---------------------------------------------------------------------------

/// Parse a changed-range list.
///
/// One inclusive range per line as `start end`, `start-end` or
/// `start+len`. Numbers are decimal or `0x` hex. `#` starts a comment.
pub fn parse_ranges(text: &str) -> Result<Vec<(usize, usize)>, IoError> {
    let mut out = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let body = raw.split('#').next().unwrap_or("").trim();
        if body.is_empty() {
            continue;
        }
        out.push(parse_range_line(body).map_err(|message| IoError::Parse { line, message })?);
    }
    Ok(out)
}

fn parse_range_line(body: &str) -> Result<(usize, usize), String> {
    if let Some((start, len)) = body.split_once('+') {
        let start = parse_offset(start)?;
        let len = parse_offset(len)?;
        if len == 0 {
            return Err(DeltaError::Empty { start }.to_string());
        }
        let end = start
            .checked_add(len - 1)
            .ok_or_else(|| format!("range overflow: '{body}'"))?;
        return Ok((start, end));
    }

    let parts: Vec<&str> = body
        .split(|c: char| c == '-' || c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .collect();
    match parts.as_slice() {
        [start, end] => Ok((parse_offset(start)?, parse_offset(end)?)),
        _ => Err(format!("expected two offsets, got '{body}'")),
    }
}

fn parse_offset(s: &str) -> Result<usize, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid offset '{s}': {e}"))
}

/// Read and parse a range list file.
pub fn read_ranges(path: &Path) -> Result<Vec<(usize, usize)>, IoError> {
    let text = fs::read_to_string(path).map_err(|source| IoError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_ranges(&text)
}

/// Classify every range and collect the results in priority order.
pub fn build_priority_list(
    frames: &FramePair<'_>,
    ranges: &[(usize, usize)],
    config: &CodecConfig,
) -> Result<PriorityList, DeltaError> {
    let mut list = DeltaList::new(PriorityOrder::for_config(config));
    for &(start, end) in ranges {
        list.insert(Delta::classify(start, end, frames, config)?);
    }
    Ok(list)
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Summary of one classified frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStats {
    pub deltas: usize,
    pub runs: usize,
    pub slices: usize,
    pub frozen: usize,
    pub total_bytes: usize,
    pub total_cost: f64,
}

impl FrameStats {
    pub fn collect<O: DeltaOrder>(list: &DeltaList<O>) -> Self {
        let runs = list.iter().filter(|d| d.is_run()).count();
        Self {
            deltas: list.len(),
            runs,
            slices: list.len() - runs,
            frozen: list.iter().filter(|d| d.is_frozen()).count(),
            total_bytes: list.total_bytes(),
            total_cost: list.total_cost(),
        }
    }
}
