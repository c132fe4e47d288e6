//! Raw row splitting and padding.

/// Splits a raw shard row on literal commas.
///
/// No quote handling: a shard row is exactly the comma-separated fields the
/// dump tool produced, and an empty string yields one empty field.
pub fn split_row(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

/// Right-pads `row` with empty fields until it has `width` fields.
///
/// Rows already at or beyond `width` are returned unchanged.
pub fn pad_row(mut row: Vec<String>, width: usize) -> Vec<String> {
    if row.len() < width {
        row.resize(width, String::new());
    }
    row
}

/// Builds the `col_1..col_N` header used when a table has no header file.
pub fn synthetic_header(width: usize) -> Vec<String> {
    (1..=width).map(|i| format!("col_{i}")).collect()
}
