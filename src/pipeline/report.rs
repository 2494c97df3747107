use std::fs;
use std::io::Write;
use std::path::Path;

use crate::core::series::Series;
use crate::error::{Error, Result};
use crate::pipeline::query::MatchRecord;

/// Ranked match table.
///
/// Fixed leading columns, then one `fSHAPE-i` and one `SHAPE-i` column per
/// query position. Missing values print as `NA`.
pub fn write_match_table(path: &Path, records: &[MatchRecord], query: &Series) -> Result<()> {
    let m = query.len();
    let mut writer = csv::Writer::from_path(path).map_err(|source| Error::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    let io_err = |source| Error::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut header = vec![
        "Sample".to_string(),
        "Range".to_string(),
        "Sequence".to_string(),
        "Z-normalized".to_string(),
        "Distance".to_string(),
        "Sequence-Score".to_string(),
    ];
    header.extend((1..=m).map(|i| format!("fSHAPE-{i}")));
    header.extend((1..=m).map(|i| format!("SHAPE-{i}")));
    writer.write_record(&header).map_err(io_err)?;

    for record in records {
        let mut row = vec![
            record.series.name().to_string(),
            record.range_label(m),
            record.sequence(m),
            format_value(record.motif.profile_distance),
            format_value(record.raw_distance(query)),
            record.sequence_score(query).to_string(),
        ];
        row.extend(record.fshape_window(m).iter().map(|&v| format_value(v)));
        row.extend(record.shape_window(m).iter().map(|&v| format_value(v)));
        writer.write_record(&row).map_err(io_err)?;
    }

    writer.flush().map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Seed motif values, one per line.
pub fn write_seed_motif(path: &Path, values: &[f64]) -> Result<()> {
    let mut body = String::new();
    for &v in values {
        body.push_str(&format_value(v));
        body.push('\n');
    }
    write_text(path, &body)
}

/// Human-readable alignment summary, one line per series.
pub fn write_alignment_list(path: &Path, lines: &[String]) -> Result<()> {
    write_text(path, &lines.join("\n"))
}

/// Condensed pairwise distance table between the aligned motif windows,
/// pairs in series load order. Input for external clustering tools.
pub fn write_pairwise_distances(path: &Path, pairs: &[(String, String, f64)]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|source| Error::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    let io_err = |source| Error::Csv {
        path: path.to_path_buf(),
        source,
    };

    writer
        .write_record(["First", "Second", "Distance"])
        .map_err(io_err)?;
    for (first, second, distance) in pairs {
        let formatted = format_value(*distance);
        writer
            .write_record([first.as_str(), second.as_str(), formatted.as_str()])
            .map_err(io_err)?;
    }
    writer.flush().map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_text(path: &Path, body: &str) -> Result<()> {
    let mut file = fs::File::create(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(body.as_bytes()).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn format_value(v: f64) -> String {
    if v.is_finite() {
        v.to_string()
    } else {
        "NA".to_string()
    }
}
