//! Multi-column stable sort over the grid's rows.

use std::cmp::Ordering;

use log::debug;

use crate::column::{Column, SortDirection, SortSpec};
use crate::options::GridOptions;
use crate::row::Row;
use crate::sort::resolver::{SortFn, SortFnCache};
use crate::value::CellValue;

/// Supplies comparison values to the sort engine.
///
/// The engine has no knowledge of how cells are stored or formatted; the
/// accessor bridges to the caller's data layer.
pub trait CellAccessor<E> {
    /// The raw comparison value of a cell.
    fn cell_value(&self, row: &Row<E>, column: &Column) -> CellValue;

    /// The filtered/display value of a cell, used when the column sets
    /// `sort_cell_filtered`. Defaults to the raw value.
    fn cell_display_value(&self, row: &Row<E>, column: &Column) -> CellValue {
        self.cell_value(row, column)
    }
}

impl<E, F> CellAccessor<E> for F
where
    F: Fn(&Row<E>, &Column) -> CellValue,
{
    fn cell_value(&self, row: &Row<E>, column: &Column) -> CellValue {
        self(row, column)
    }
}

/// One active sort criterion: a column paired with the spec that activated
/// it (the explicit sort or the default fallback).
#[derive(Debug, Clone, Copy)]
pub struct SortCriterion<'a> {
    /// The sorted column.
    pub column: &'a Column,
    /// The criterion driving it.
    pub spec: &'a SortSpec,
}

/// Order two criteria by priority: both prioritized compare numerically,
/// a prioritized criterion precedes an unprioritized one, and two
/// unprioritized criteria are equal (their encounter order stands).
///
/// Standalone so UI affordances (sort-order badges) can rank criteria
/// without running a sort.
pub fn priority_sort(a: &SortCriterion<'_>, b: &SortCriterion<'_>) -> Ordering {
    match (a.spec.priority, b.spec.priority) {
        (Some(pa), Some(pb)) => pa.cmp(&pb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Build the ordered criteria list for a sort pass.
///
/// Columns with an active explicit sort come first, then columns falling
/// back to a directed `default_sort`; each group is ordered by
/// [`priority_sort`] with encounter order as the stable tie-break.
pub fn active_criteria(columns: &[Column]) -> Vec<SortCriterion<'_>> {
    let mut explicit = Vec::new();
    let mut fallback = Vec::new();
    for column in columns {
        if column.sort.is_active() {
            explicit.push(SortCriterion {
                column,
                spec: &column.sort,
            });
        } else if column.default_sort.direction.is_some() {
            fallback.push(SortCriterion {
                column,
                spec: &column.default_sort,
            });
        }
    }
    explicit.sort_by(|a, b| priority_sort(a, b));
    fallback.sort_by(|a, b| priority_sort(a, b));
    explicit.extend(fallback);
    explicit
}

/// Sort the rows in place by the columns' active criteria.
///
/// No-ops when there are no rows, when external sorting is enabled (the
/// caller owns the order), or when no criterion is active (original order
/// preserved). Equal rows keep their relative order: the final tie-break
/// is the original position, paired out-of-band and never stored on the
/// row or its entity.
pub fn sort_rows<E, A: CellAccessor<E>>(
    options: &GridOptions<E>,
    cache: &mut SortFnCache,
    accessor: &A,
    rows: &mut Vec<Row<E>>,
    columns: &[Column],
) {
    if rows.is_empty() {
        return;
    }
    if options.use_external_sorting {
        return;
    }
    let criteria = active_criteria(columns);
    if criteria.is_empty() {
        return;
    }
    debug!(
        "sorting {} rows over {} criteria",
        rows.len(),
        criteria.len()
    );

    let sort_fns: Vec<SortFn> = criteria
        .iter()
        .map(|criterion| cache.resolve(criterion.column))
        .collect();

    let mut indexed: Vec<(usize, Row<E>)> = rows.drain(..).enumerate().collect();
    indexed.sort_by(|(index_a, row_a), (index_b, row_b)| {
        for (criterion, sort_fn) in criteria.iter().zip(&sort_fns) {
            let (value_a, value_b) = comparison_values(accessor, row_a, row_b, criterion.column);
            let ord = sort_fn(&value_a, &value_b);
            if ord != Ordering::Equal {
                return match criterion.spec.direction {
                    Some(SortDirection::Desc) => ord.reverse(),
                    _ => ord,
                };
            }
        }
        // Positional tie-break; direction never applies to it.
        index_a.cmp(index_b)
    });
    rows.extend(indexed.into_iter().map(|(_, row)| row));
}

fn comparison_values<E, A: CellAccessor<E>>(
    accessor: &A,
    row_a: &Row<E>,
    row_b: &Row<E>,
    column: &Column,
) -> (CellValue, CellValue) {
    if column.sort_cell_filtered {
        (
            accessor.cell_display_value(row_a, column),
            accessor.cell_display_value(row_b, column),
        )
    } else {
        (
            accessor.cell_value(row_a, column),
            accessor.cell_value(row_b, column),
        )
    }
}
