//! First-fit row packing for the items of one lane.
//!
//! Items are visited in the order given and placed in the lowest row where
//! they overlap nothing already placed there. The result depends on input
//! order: callers that want leftmost-first packing should use
//! [`PackOrder::ByStart`] or sort before calling.

use serde::{Deserialize, Serialize};

use crate::interval::Interval;

/// Order in which the packer visits a lane's items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PackOrder {
    /// Visit items in lane order.
    #[default]
    Insertion,
    /// Visit items by start date, ties broken by shorter duration, then lane order.
    ByStart,
}

impl std::fmt::Display for PackOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Insertion => write!(f, "insertion"),
            Self::ByStart => write!(f, "by_start"),
        }
    }
}

/// Row index per item, keyed by the item's position in the input slice.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RowAssignment {
    rows: Vec<usize>,
    row_count: usize,
}

impl RowAssignment {
    /// Row of the item at `index`, if it exists.
    pub fn row(&self, index: usize) -> Option<usize> {
        self.rows.get(index).copied()
    }

    /// Rows in input order.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Number of distinct rows used (0 for no items).
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of items assigned.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if no items were assigned.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Assign every interval a row so that no two intervals in the same row overlap.
pub fn assign_rows(items: &[Interval], order: PackOrder) -> RowAssignment {
    let mut visit: Vec<usize> = (0..items.len()).collect();
    if order == PackOrder::ByStart {
        // Stable sort keeps lane order for full ties.
        visit.sort_by_key(|&i| (items[i].start, items[i].duration_days()));
    }

    // Each packed row holds the input indices placed in it.
    let mut packed: Vec<Vec<usize>> = Vec::new();
    let mut rows = vec![0; items.len()];

    for idx in visit {
        let item = &items[idx];
        let free = packed
            .iter()
            .position(|row| row.iter().all(|&other| !item.overlaps(&items[other])));

        match free {
            Some(r) => {
                packed[r].push(idx);
                rows[idx] = r;
            }
            None => {
                rows[idx] = packed.len();
                packed.push(vec![idx]);
            }
        }
    }

    RowAssignment {
        rows,
        row_count: packed.len(),
    }
}
