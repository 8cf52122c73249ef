//! Forward-fill of missing cells

use order_table::{Table, Value};

/// Replace every absent cell with the cell above it, column by column.
///
/// Absent cells in the first row stay absent. Returns how many cells were
/// filled.
pub fn forward_fill(table: &mut Table) -> usize {
    table
        .columns_mut()
        .iter_mut()
        .map(|column| fill_values(column.values_mut()))
        .sum()
}

fn fill_values(values: &mut [Value]) -> usize {
    let mut filled = 0;
    for i in 1..values.len() {
        if values[i].is_absent() && !values[i - 1].is_absent() {
            values[i] = values[i - 1].clone();
            filled += 1;
        }
    }
    filled
}
