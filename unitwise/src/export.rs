//! CSV export of the last conversion

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use crate::Conversion;

pub const CSV_HEADER: [&str; 4] = ["Value", "From", "Converted Value", "To"];

/// File name used when the export is written to disk
pub const DEFAULT_FILE_NAME: &str = "conversion_results.csv";

/// Header row plus one data row, each terminated by `\n`.
///
/// Numbers use the default `f64` formatting, unrounded.
pub fn to_csv(conversion: &Conversion) -> String {
    let row = [
        conversion.value.to_string(),
        conversion.from.name().to_string(),
        conversion.result.to_string(),
        conversion.to.name().to_string(),
    ];

    let mut out = String::new();
    push_record(&mut out, CSV_HEADER.iter().copied());
    push_record(&mut out, row.iter().map(String::as_str));
    out
}

/// Write the export into `dir` as [`DEFAULT_FILE_NAME`], returning the path
pub fn write_csv(conversion: &Conversion, dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(DEFAULT_FILE_NAME);
    fs::write(&path, to_csv(conversion))?;
    Ok(path)
}

fn push_record<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_field(field));
    }
    out.push('\n');
}

fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitwise_core::{Category, Unit};

    fn meters_to_feet() -> Conversion {
        Conversion {
            value: 5.0,
            category: Category::Length,
            from: Unit::Meters,
            to: Unit::Feet,
            result: 16.4042,
        }
    }

    #[test]
    fn test_csv_layout() {
        let csv = to_csv(&meters_to_feet());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["Value,From,Converted Value,To", "5,Meters,16.4042,Feet"]);
    }

    #[test]
    fn test_csv_keeps_full_precision() {
        let conversion = Conversion {
            value: 1.5,
            category: Category::Temperature,
            from: Unit::Celsius,
            to: Unit::Kelvin,
            result: 274.65,
        };
        assert!(to_csv(&conversion).ends_with("1.5,Celsius,274.65,Kelvin\n"));
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("Meters"), "Meters");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_write_csv() {
        let dir = std::env::temp_dir().join(format!("unitwise-export-{}", std::process::id()));
        let path = write_csv(&meters_to_feet(), &dir).unwrap();

        assert_eq!(path.file_name().unwrap(), DEFAULT_FILE_NAME);
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_csv(&meters_to_feet()));

        fs::remove_dir_all(&dir).unwrap();
    }
}
