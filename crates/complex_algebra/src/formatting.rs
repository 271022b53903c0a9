// =============================================================================
// Qubit Lens - Text Formatting Helpers
// =============================================================================
// Table of Contents:
//   1. Rounded float rendering
//   2. Column layout (tables of right/left aligned text)
// =============================================================================
// Purpose: All rendering returns Strings; callers decide where text goes.
// =============================================================================

pub const DEFAULT_DISPLAY_PRECISION: usize = 4;

// =============================================================================
// 1. Rounded float rendering
// =============================================================================

/// Rounds `value` to `precision` decimals and returns `(is_negative, digits)`
/// where `digits` is the shortest decimal text of the rounded magnitude.
/// The sign follows the unrounded value.
pub fn round_with_sign(value: f64, precision: usize) -> (bool, String) {
    let base = 10f64.powi(precision.min(i32::MAX as usize) as i32);
    let rounded = (value.abs() * base).round() / base;
    let digits = if rounded.is_finite() {
        format!("{rounded}")
    } else {
        format!("{}", value.abs())
    };
    (value < 0.0, digits)
}

pub fn format_rounded(value: f64, precision: usize) -> String {
    let (negative, digits) = round_with_sign(value, precision);
    if negative && digits != "0" {
        format!("-{digits}")
    } else {
        digits
    }
}

// =============================================================================
// 2. Column layout
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnAlignment {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub enum TextColumn {
    Separator(String),
    Items {
        items: Vec<String>,
        alignment: ColumnAlignment,
    },
}

impl TextColumn {
    pub fn separator(text: impl Into<String>) -> Self {
        TextColumn::Separator(text.into())
    }

    pub fn right_aligned(items: Vec<String>) -> Self {
        TextColumn::Items {
            items,
            alignment: ColumnAlignment::Right,
        }
    }

    pub fn left_aligned(items: Vec<String>) -> Self {
        TextColumn::Items {
            items,
            alignment: ColumnAlignment::Left,
        }
    }

    fn width(&self) -> usize {
        match self {
            TextColumn::Separator(text) => text.chars().count(),
            TextColumn::Items { items, .. } => items
                .iter()
                .map(|item| item.chars().count())
                .max()
                .unwrap_or(0),
        }
    }

    fn height(&self) -> usize {
        match self {
            TextColumn::Separator(_) => 1,
            TextColumn::Items { items, .. } => items.len(),
        }
    }
}

/// Lays columns side by side. Separators repeat on every row; shorter item
/// columns are padded with blanks.
pub fn render_columns(columns: &[TextColumn]) -> String {
    let widths: Vec<usize> = columns.iter().map(TextColumn::width).collect();
    let height = columns.iter().map(TextColumn::height).max().unwrap_or(0);

    let mut rows = Vec::with_capacity(height);
    for row_index in 0..height {
        let mut row = String::new();
        for (column, &width) in columns.iter().zip(widths.iter()) {
            match column {
                TextColumn::Separator(text) => row.push_str(text),
                TextColumn::Items { items, alignment } => {
                    let item = items.get(row_index).map(String::as_str).unwrap_or("");
                    match alignment {
                        ColumnAlignment::Left => row.push_str(&format!("{item:<width$}")),
                        ColumnAlignment::Right => row.push_str(&format!("{item:>width$}")),
                    }
                }
            }
        }
        rows.push(row);
    }
    rows.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_with_sign() {
        assert_eq!(round_with_sign(0.70710678, 4), (false, "0.7071".to_string()));
        assert_eq!(round_with_sign(-1.0, 4), (true, "1".to_string()));
        assert_eq!(round_with_sign(-0.00001, 4), (true, "0".to_string()));
    }

    #[test]
    fn test_format_rounded_drops_negative_zero() {
        assert_eq!(format_rounded(-0.00001, 4), "0");
        assert_eq!(format_rounded(-0.5, 4), "-0.5");
        assert_eq!(format_rounded(0.123456, 2), "0.12");
    }

    #[test]
    fn test_render_columns() {
        let table = render_columns(&[
            TextColumn::right_aligned(vec!["a".into(), "bbb".into()]),
            TextColumn::separator(" | "),
            TextColumn::left_aligned(vec!["x".into()]),
            TextColumn::separator(" |"),
        ]);
        assert_eq!(table, "  a | x |\nbbb |   |");
    }
}
