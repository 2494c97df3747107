use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::core::series::{Nucleotide, Series};
use crate::error::{Error, Result};
use crate::io::fshape::stem_name;

/// Load every `*.csv` in a directory as a reactivity series.
///
/// Non-CSV files are ignored. Files load in name order so repeated runs see
/// the same series order (and therefore identical consensus tie-breaks and
/// exports) regardless of directory enumeration order.
pub fn load_series_dir(dir: &Path) -> Result<Vec<Series>> {
    let entries = fs::read_dir(dir).map_err(|source| Error::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "csv") && p.is_file())
        .collect();
    paths.sort();

    let mut series = Vec::with_capacity(paths.len());
    for path in &paths {
        let s = load_reactivity_csv(path)?;
        debug!("loaded {} ({} positions)", s.name(), s.len());
        series.push(s);
    }
    Ok(series)
}

/// Load one CSV with at least `Reactivity` (float or `NA`) and `Sequence`
/// (single-character base, possibly blank) columns.
pub fn load_reactivity_csv(path: &Path) -> Result<Series> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| Error::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    let headers = reader
        .headers()
        .map_err(|source| Error::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    let reactivity_idx = column_index(&headers, "Reactivity").ok_or(Error::MissingColumn {
        path: path.to_path_buf(),
        column: "Reactivity",
    })?;
    let sequence_idx = column_index(&headers, "Sequence").ok_or(Error::MissingColumn {
        path: path.to_path_buf(),
        column: "Sequence",
    })?;

    let mut nucleotides = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|source| Error::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        let value_field = record.get(reactivity_idx).unwrap_or("").trim();
        let fshape = parse_reactivity(value_field).ok_or_else(|| Error::MalformedLine {
            path: path.to_path_buf(),
            line: row + 2, // 1-based, after the header
            text: value_field.to_string(),
        })?;
        let base = record
            .get(sequence_idx)
            .and_then(|s| s.trim().chars().next())
            .unwrap_or('N');
        nucleotides.push(Nucleotide::with_base(fshape, base));
    }

    Ok(Series::new(stem_name(path), &nucleotides))
}

pub(crate) fn parse_reactivity(field: &str) -> Option<f64> {
    if field.is_empty() || field == "NA" || field.eq_ignore_ascii_case("nan") {
        Some(f64::NAN)
    } else {
        field.parse().ok()
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}
