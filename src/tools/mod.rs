//! Scan-file helpers for the CLI
//!
//! Reads newline-delimited scans and summarizes how they decode.

use crate::decoder::decode_valid;
use rayon::prelude::*;
use std::fs;
use std::path::Path;

/// Read newline-delimited scans, skipping blank lines.
pub fn read_scan_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>, std::io::Error> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect())
}

/// Summary of a batch of scans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Scans examined.
    pub total: usize,
    /// Valid scans that decoded with envelope timestamp or version.
    pub structured: usize,
    /// Valid scans taken as bare codes.
    pub bare: usize,
    /// Scans failing validation.
    pub rejected: usize,
}

impl ScanStats {
    fn record(mut self, scan: &str) -> Self {
        self.total += 1;
        match decode_valid(scan) {
            None => self.rejected += 1,
            Some(decoded) if decoded.is_structured() => self.structured += 1,
            Some(_) => self.bare += 1,
        }
        self
    }

    fn combine(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            structured: self.structured + other.structured,
            bare: self.bare + other.bare,
            rejected: self.rejected + other.rejected,
        }
    }

    /// Share of scans that passed validation.
    pub fn accept_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.structured + self.bare) as f64 / self.total as f64
        }
    }
}

/// Classify every scan, in parallel.
pub fn scan_stats<S: AsRef<str> + Sync>(scans: &[S]) -> ScanStats {
    scans
        .par_iter()
        .fold(ScanStats::default, |stats, scan| stats.record(scan.as_ref()))
        .reduce(ScanStats::default, ScanStats::combine)
}
