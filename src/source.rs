//! Candidate loading for the command line front end.
//!
//! Each non-blank input line becomes one [`Entry`]; its fields are either
//! the delimited parts of the line or, for JSON lines, the values of the
//! configured column ids.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// One loaded candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// The original input line, printed back on selection
    pub line: String,
    /// Column texts in column order
    pub fields: Vec<String>,
}

impl Entry {
    /// Field `index`, or the empty string when the line had fewer fields
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Input line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    /// Fields separated by a delimiter character
    #[default]
    Delimited,
    /// One JSON object per line
    JsonLines,
}

/// How to turn lines into entries
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub format: InputFormat,
    pub delimiter: char,
    /// Column ids; JSON lines are projected onto these keys
    pub column_ids: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: InputFormat::Delimited,
            delimiter: '\t',
            column_ids: Vec::new(),
        }
    }
}

/// Load entries from `path`, or from stdin when `path` is `None` or `-`
pub fn load_entries_from(path: Option<&Path>, options: &LoadOptions) -> Result<Vec<Entry>> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            load_entries(BufReader::new(file), options)
                .with_context(|| format!("Failed to load {}", path.display()))
        }
        _ => load_entries(io::stdin().lock(), options).context("Failed to load stdin"),
    }
}

/// Load entries from any buffered reader
pub fn load_entries<R: BufRead>(reader: R, options: &LoadOptions) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let fields = match options.format {
            InputFormat::Delimited => line.split(options.delimiter).map(str::to_string).collect(),
            InputFormat::JsonLines => json_fields(line, &options.column_ids)
                .with_context(|| format!("Invalid JSON on line {}", line_num + 1))?,
        };

        entries.push(Entry {
            line: line.to_string(),
            fields,
        });
    }

    log::debug!("loaded {} entries", entries.len());
    Ok(entries)
}

fn json_fields(line: &str, column_ids: &[String]) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(line)?;
    let Value::Object(object) = value else {
        bail!("expected a JSON object");
    };

    Ok(column_ids
        .iter()
        .map(|id| match object.get(id) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_delimited_lines() {
        let input = "apple\tred\n\nbanana\tyellow\r\nkiwi\n";
        let entries = load_entries(Cursor::new(input), &LoadOptions::default()).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].fields, vec!["apple", "red"]);
        assert_eq!(entries[1].line, "banana\tyellow");
        assert_eq!(entries[2].field(0), "kiwi");
        assert_eq!(entries[2].field(1), "");
    }

    #[test]
    fn test_custom_delimiter() {
        let options = LoadOptions {
            delimiter: ',',
            ..LoadOptions::default()
        };
        let entries = load_entries(Cursor::new("a,b,c\n"), &options).unwrap();
        assert_eq!(entries[0].fields, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_json_lines_projection() {
        let options = LoadOptions {
            format: InputFormat::JsonLines,
            column_ids: vec!["name".to_string(), "size".to_string(), "tag".to_string()],
            ..LoadOptions::default()
        };
        let input = "{\"name\": \"apple\", \"size\": 3, \"tag\": null}\n";
        let entries = load_entries(Cursor::new(input), &options).unwrap();

        assert_eq!(entries[0].fields, vec!["apple", "3", ""]);
    }

    #[test]
    fn test_json_lines_errors_carry_line_number() {
        let options = LoadOptions {
            format: InputFormat::JsonLines,
            ..LoadOptions::default()
        };
        let err = load_entries(Cursor::new("{}\n[1, 2]\n"), &options).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
