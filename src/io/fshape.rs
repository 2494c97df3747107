use std::fs;
use std::path::Path;

use crate::core::series::{Nucleotide, Series};
use crate::error::{Error, Result};

/// Load a whitespace-delimited fSHAPE/SHAPE profile.
///
/// One line per position, 1 to 3 fields: `fshape [base [shape]]`. The token
/// `NA` maps to a missing value; a missing base defaults to `'N'`. Any
/// other shape of line is a fatal parse error naming the offending line.
pub fn load_fshape_file(path: &Path) -> Result<Series> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut nucleotides = Vec::new();
    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        let malformed = || Error::MalformedLine {
            path: path.to_path_buf(),
            line: idx + 1,
            text: raw_line.to_string(),
        };

        let nt = match fields.as_slice() {
            [fshape] => Nucleotide::new(parse_value(fshape).ok_or_else(malformed)?),
            [fshape, base] => Nucleotide::with_base(
                parse_value(fshape).ok_or_else(malformed)?,
                parse_base(base),
            ),
            [fshape, base, shape] => Nucleotide {
                fshape: parse_value(fshape).ok_or_else(malformed)?,
                base: parse_base(base),
                shape: parse_value(shape).ok_or_else(malformed)?,
            },
            _ => return Err(malformed()),
        };
        nucleotides.push(nt);
    }

    Ok(Series::new(stem_name(path), &nucleotides))
}

/// `NA` means missing; everything else must parse as a float.
fn parse_value(token: &str) -> Option<f64> {
    if token == "NA" {
        Some(f64::NAN)
    } else {
        token.parse().ok()
    }
}

fn parse_base(token: &str) -> char {
    token.chars().next().unwrap_or('N')
}

/// Series name = file stem, so `sample1.fshape` reports as `sample1`.
pub fn stem_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
