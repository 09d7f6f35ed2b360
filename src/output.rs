//! Output formatting for ranked lists printed outside the TUI

use crate::rank::columns::Columns;
use crate::rank::score::RankedItem;
use crate::utils::alpha::AlphaCodec;
use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Column gap in plain output
const COLUMN_GAP: &str = "  ";

/// JSON view of one printed row
#[derive(Debug, Serialize)]
struct RowView<'a> {
    row: usize,
    code: String,
    total_score: f32,
    columns: Vec<ColumnView<'a>>,
}

#[derive(Debug, Serialize)]
struct ColumnView<'a> {
    id: &'a str,
    text: String,
    rank: Option<f32>,
    matches: &'a [usize],
}

/// Print ranked rows to stdout, either colored text or JSON
pub fn print_ranked<T>(
    items: &[RankedItem<T>],
    columns: &Columns<T>,
    codec: &AlphaCodec,
    color: ColorChoice,
    json: bool,
    limit: Option<usize>,
) -> io::Result<()> {
    let shown = &items[..limit.unwrap_or(items.len()).min(items.len())];

    if json {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_json(&mut out, shown, columns, codec)
    } else {
        let mut stdout = StandardStream::stdout(color);
        write_rows(&mut stdout, shown, columns, codec)
    }
}

/// Write rows as `CODE  col  col`, highlighting matched characters.
///
/// Every column is printed; only searchable ones get highlights.
pub fn write_rows<T, W: WriteColor>(
    out: &mut W,
    items: &[RankedItem<T>],
    columns: &Columns<T>,
    codec: &AlphaCodec,
) -> io::Result<()> {
    for (index, item) in items.iter().enumerate() {
        let code = codec.encode(index + 1).unwrap_or_default();
        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
        write!(out, "{:>width$}", code, width = codec.width())?;
        out.reset()?;

        for column in columns.iter() {
            write!(out, "{}", COLUMN_GAP)?;
            let text = column.display_text(item.item(), index);
            let matches = item
                .column_score(column.index())
                .filter(|_| column.is_searchable())
                .map(|score| score.matches.as_slice())
                .unwrap_or(&[]);
            write_highlighted(out, &text, matches)?;
        }

        writeln!(out)?;
    }

    Ok(())
}

/// Write rows as a JSON array
pub fn write_json<T, W: Write>(
    out: &mut W,
    items: &[RankedItem<T>],
    columns: &Columns<T>,
    codec: &AlphaCodec,
) -> io::Result<()> {
    let rows: Vec<RowView> = items
        .iter()
        .enumerate()
        .map(|(index, item)| RowView {
            row: index + 1,
            code: codec.encode(index + 1).unwrap_or_default(),
            total_score: item.total_score(),
            columns: columns
                .iter()
                .map(|column| {
                    let score = item.column_score(column.index());
                    ColumnView {
                        id: column.id(),
                        text: column.display_text(item.item(), index),
                        rank: score.map(|s| s.rank),
                        matches: score.map(|s| s.matches.as_slice()).unwrap_or(&[]),
                    }
                })
                .collect(),
        })
        .collect();

    serde_json::to_writer_pretty(&mut *out, &rows)?;
    writeln!(out)
}

/// Write `text` with the chars at `matches` (sorted char offsets) highlighted
fn write_highlighted<W: WriteColor>(out: &mut W, text: &str, matches: &[usize]) -> io::Result<()> {
    let mut pending = matches.iter().peekable();
    let mut highlighted = false;

    for (i, ch) in text.chars().enumerate() {
        let is_match = pending.next_if_eq(&&i).is_some();

        if is_match != highlighted {
            if is_match {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            } else {
                out.reset()?;
            }
            highlighted = is_match;
        }

        write!(out, "{}", ch)?;
    }

    if highlighted {
        out.reset()?;
    }

    Ok(())
}
