//! Column count and width calculation

/// Number of columns that fit in `wrapper_width`.
///
/// Columns are counted as `floor((width + gutter) / (min_column_width + gutter))`
/// and clamped to `max_columns` first, then raised to `min_columns`, then to 1.
/// The order matters when `max_columns < min_columns`: the minimum wins.
pub fn number_of_columns(
    wrapper_width: f32,
    min_column_width: f32,
    gutter: f32,
    min_columns: usize,
    max_columns: usize,
) -> usize {
    let available_width = wrapper_width + gutter;
    let column_slot = min_column_width + gutter;
    // Float to int casts saturate, NaN and negatives become 0
    let fitting = (available_width / column_slot).floor() as usize;

    fitting.min(max_columns).max(min_columns).max(1)
}

/// Width of each column so that `columns` columns and their gutters exactly
/// fill `wrapper_width`. Not rounded.
pub fn final_column_width(wrapper_width: f32, columns: usize, gutter: f32) -> f32 {
    let columns = columns.max(1) as f32;
    (wrapper_width - (columns - 1.0) * gutter) / columns
}
