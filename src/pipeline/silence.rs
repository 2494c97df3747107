use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{Error, Result};
use crate::io::reactivity_csv::parse_reactivity;

/// Keep-mask of a reactivity column: position `i` is kept when some
/// position within `m - 1` of it has `|value| > 1.0`, i.e. when at least
/// one length-`m` window covering `i` contains a high-signal position.
pub fn mask_low_signal(values: &[f64], m: usize) -> Vec<bool> {
    let mut keep = vec![false; values.len()];
    for (i, &v) in values.iter().enumerate() {
        if v.abs() > 1.0 {
            let lo = (i + 1).saturating_sub(m);
            let hi = (i + m).min(values.len());
            for flag in &mut keep[lo..hi] {
                *flag = true;
            }
        }
    }
    keep
}

/// Rewrite one CSV with low-signal finite reactivities blanked to `NA`.
///
/// Every other column, and every already-missing value, passes through
/// unchanged.
pub fn process_file(input: &Path, output: &Path, m: usize) -> Result<()> {
    let mut reader = csv::Reader::from_path(input).map_err(|source| Error::Csv {
        path: input.to_path_buf(),
        source,
    })?;
    let headers = reader
        .headers()
        .map_err(|source| Error::Csv {
            path: input.to_path_buf(),
            source,
        })?
        .clone();
    let reactivity_idx = column_index(&headers, "Reactivity").ok_or(Error::MissingColumn {
        path: input.to_path_buf(),
        column: "Reactivity",
    })?;

    let mut rows = Vec::new();
    let mut values = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|source| Error::Csv {
            path: input.to_path_buf(),
            source,
        })?;
        let field = record.get(reactivity_idx).unwrap_or("").trim();
        let value = parse_reactivity(field).ok_or_else(|| Error::MalformedLine {
            path: input.to_path_buf(),
            line: row + 2,
            text: field.to_string(),
        })?;
        values.push(value);
        rows.push(record);
    }

    let keep = mask_low_signal(&values, m);
    let mut silenced = 0usize;
    let mut writer = csv::Writer::from_path(output).map_err(|source| Error::Csv {
        path: output.to_path_buf(),
        source,
    })?;
    writer.write_record(&headers).map_err(|source| Error::Csv {
        path: output.to_path_buf(),
        source,
    })?;
    for (i, row) in rows.iter().enumerate() {
        let fields: Vec<&str> = row
            .iter()
            .enumerate()
            .map(|(col, field)| {
                if col == reactivity_idx && values[i].is_finite() && !keep[i] {
                    silenced += 1;
                    "NA"
                } else {
                    field
                }
            })
            .collect();
        writer.write_record(&fields).map_err(|source| Error::Csv {
            path: output.to_path_buf(),
            source,
        })?;
    }
    writer.flush().map_err(|source| Error::Io {
        path: output.to_path_buf(),
        source,
    })?;

    info!(
        "{}: silenced {silenced} of {} position(s)",
        input.display(),
        values.len()
    );
    Ok(())
}

/// Silence every CSV in a directory, writing same-named files into the
/// results directory.
pub fn run(input_dir: &Path, results_dir: &Path, m: usize) -> Result<()> {
    if m < 1 {
        return Err(Error::MotifTooShort(m));
    }
    fs::create_dir_all(results_dir).map_err(|source| Error::Io {
        path: results_dir.to_path_buf(),
        source,
    })?;

    let entries = fs::read_dir(input_dir).map_err(|source| Error::Io {
        path: input_dir.to_path_buf(),
        source,
    })?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "csv") && p.is_file())
        .collect();
    paths.sort();

    for path in &paths {
        let file_name = path.file_name().unwrap_or_default();
        process_file(path, &results_dir.join(file_name), m)?;
    }
    Ok(())
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_mask_keeps_window_around_high_signal() {
        let mut values = vec![0.1; 12];
        values[6] = 1.5;
        let keep = mask_low_signal(&values, 3);

        // Kept span is [6-2, 6+2]
        let expected: Vec<bool> = (0..12).map(|i| (4..=8).contains(&i)).collect();
        assert_eq!(keep, expected);
    }

    #[test]
    fn test_mask_threshold_is_strict_and_signed() {
        let keep = mask_low_signal(&[1.0, -1.0, -1.2, 0.0], 1);
        assert_eq!(keep, vec![false, false, true, false]);
    }

    #[test]
    fn test_mask_clamps_at_boundaries() {
        let keep = mask_low_signal(&[2.0, 0.0, 0.0, 0.0, 2.0], 4);
        assert!(keep.iter().all(|&k| k), "High signal at both ends covers all");
    }

    #[test]
    fn test_nan_never_triggers_keep() {
        let keep = mask_low_signal(&[f64::NAN, 0.2, 0.3], 2);
        assert_eq!(keep, vec![false, false, false]);
    }

    #[test]
    fn test_process_preserves_other_columns_and_missing_values() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        let mut f = fs::File::create(&input).unwrap();
        f.write_all(b"Position,Reactivity,Sequence\n1,0.1,A\n2,1.5,C\n3,NA,G\n4,0.2,U\n5,0.3,A\n")
            .unwrap();

        process_file(&input, &output, 2).unwrap();
        let text = fs::read_to_string(&output).unwrap();
        assert_eq!(
            text,
            "Position,Reactivity,Sequence\n1,0.1,A\n2,1.5,C\n3,NA,G\n4,NA,U\n5,NA,A\n"
        );
    }

    #[test]
    fn test_run_processes_whole_directory() {
        let dir = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        for name in ["a.csv", "b.csv"] {
            let mut f = fs::File::create(dir.path().join(name)).unwrap();
            f.write_all(b"Reactivity,Sequence\n2.0,A\n0.1,C\n").unwrap();
        }
        fs::write(dir.path().join("skip.txt"), "ignored").unwrap();

        run(dir.path(), out.path(), 1).unwrap();
        assert!(out.path().join("a.csv").is_file());
        assert!(out.path().join("b.csv").is_file());
        assert!(!out.path().join("skip.txt").exists());

        let text = fs::read_to_string(out.path().join("a.csv")).unwrap();
        assert_eq!(text, "Reactivity,Sequence\n2.0,A\nNA,C\n");
    }
}
