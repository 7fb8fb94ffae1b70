//! Aligned plain-text tables.

#[derive(Clone, Copy, Debug, Default)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN: usize = 4;
const GAP: &str = "  ";

/// Column-aligned rows under a header and a dashed divider.
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn render(&self, options: TableOptions) -> String {
        let mut widths = self.natural_widths();
        shrink_to_fit(&mut widths, options.max_width);

        let header = self
            .headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| pad(&clip(h, *w), *w))
            .collect::<Vec<_>>()
            .join(GAP);
        let divider = "-".repeat(header.chars().count());

        let mut lines = vec![header.trim_end().to_string(), divider];
        for row in &self.rows {
            let line = widths
                .iter()
                .enumerate()
                .map(|(col, w)| {
                    let cell = clip(row.get(col).map_or("-", String::as_str), *w);
                    let padded = pad(&cell, *w);
                    if options.color {
                        paint(&cell, &padded)
                    } else {
                        padded
                    }
                })
                .collect::<Vec<_>>()
                .join(GAP);
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }

    fn natural_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
                    .max(MIN_COLUMN)
            })
            .collect()
    }
}

/// Narrow the widest column one character at a time until the row fits.
fn shrink_to_fit(widths: &mut [usize], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let gaps = widths.len().saturating_sub(1) * GAP.len();

    while widths.iter().sum::<usize>() + gaps > max_width {
        let Some(widest) = widths
            .iter_mut()
            .filter(|w| **w > MIN_COLUMN)
            .max_by_key(|w| **w)
        else {
            break;
        };
        *widest -= 1;
    }
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    format!("{value}{}", " ".repeat(width.saturating_sub(len)))
}

/// Color a padded cell by its status word; padding stays outside the escape.
fn paint(cell: &str, padded: &str) -> String {
    let code = match cell {
        "synced" | "updated" => "32",
        "planned" => "36",
        "skipped" => "33",
        "rejected" => "31",
        _ => return padded.to_string(),
    };
    let tail = &padded[cell.len()..];
    format!("\u{1b}[{code}m{cell}\u{1b}[0m{tail}")
}
