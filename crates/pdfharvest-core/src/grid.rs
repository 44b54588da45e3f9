//! Grid detection inside a bounded region.
//!
//! Turns the text runs (and ruling edges) found inside a located
//! region into a raw cell grid. Two heuristics are provided, matching
//! the classic dense/sparse split:
//!
//! - [`Strategy::Lattice`]: dense, ruled tables — horizontal and
//!   vertical rulings intersect into cells, each cell's text is the
//!   runs it contains.
//! - [`Strategy::Text`]: sparse, whitespace-delimited tables — rows
//!   from baseline clusters, columns from left-edge alignment across
//!   the whole region.
//! - [`Strategy::Auto`] picks Lattice when the rulings form at least
//!   one full cell grid, Text otherwise.

use crate::geometry::{BBox, Edge, Orientation};
use crate::runs::TextRun;

/// Baseline tolerance for grouping runs into grid rows, in points.
const ROW_Y_TOLERANCE: f64 = 3.0;

/// Alignment tolerance for clustering column starts, in points.
const COLUMN_X_TOLERANCE: f64 = 3.0;

/// Runs on the same row closer than this merge into one chunk, in
/// points. Roughly two space widths at common body sizes; column gaps
/// run much wider.
const CHUNK_JOIN_TOLERANCE: f64 = 6.0;

/// Snap tolerance for merging nearby ruling positions, in points.
const RULING_TOLERANCE: f64 = 2.0;

/// Table-detection heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Sparse: infer columns from text alignment.
    #[default]
    Text,
    /// Dense: build cells from ruling-line intersections.
    Lattice,
    /// Lattice when a ruled grid is present, Text otherwise.
    Auto,
}

/// A detected grid: rows of cell text, top-to-bottom, left-to-right.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub rows: Vec<Vec<String>>,
}

/// Detect grids among the runs and rulings of one region.
///
/// `runs` and `edges` must already be cropped/clipped to the region.
/// Returns at most one grid; an empty region yields none.
pub fn detect(runs: &[&TextRun], edges: &[Edge], strategy: Strategy) -> Vec<Grid> {
    let use_lattice = match strategy {
        Strategy::Lattice => true,
        Strategy::Text => false,
        Strategy::Auto => has_ruled_grid(edges),
    };
    let grid = if use_lattice {
        detect_lattice(runs, edges)
    } else {
        detect_text(runs)
    };
    grid.into_iter().collect()
}

/// Whether the rulings form at least one full cell: two or more
/// horizontal and two or more vertical ruling positions.
pub fn has_ruled_grid(edges: &[Edge]) -> bool {
    ruling_positions(edges, Orientation::Horizontal).len() >= 2
        && ruling_positions(edges, Orientation::Vertical).len() >= 2
}

fn detect_text(runs: &[&TextRun]) -> Option<Grid> {
    if runs.is_empty() {
        return None;
    }

    // Row groups from baseline clusters.
    let mut sorted: Vec<&TextRun> = runs.to_vec();
    sorted.sort_by(|a, b| {
        a.bbox
            .top
            .partial_cmp(&b.bbox.top)
            .unwrap()
            .then(a.bbox.x0.partial_cmp(&b.bbox.x0).unwrap())
    });
    let mut row_groups: Vec<Vec<&TextRun>> = Vec::new();
    for run in sorted {
        match row_groups.last_mut() {
            Some(row) if (run.bbox.top - row[0].bbox.top).abs() <= ROW_Y_TOLERANCE => {
                row.push(run)
            }
            _ => row_groups.push(vec![run]),
        }
    }

    // Merge adjacent runs into chunks so multi-word cells don't split
    // into spurious columns.
    let chunk_rows: Vec<Vec<TextRun>> = row_groups.into_iter().map(merge_into_chunks).collect();

    // Column starts from left-edge alignment across the whole region.
    let mut starts: Vec<f64> = chunk_rows
        .iter()
        .flatten()
        .map(|c| c.bbox.x0)
        .collect();
    starts.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let mut columns: Vec<f64> = Vec::new();
    for x in starts {
        match columns.last() {
            Some(&c) if x - c <= COLUMN_X_TOLERANCE => {}
            _ => columns.push(x),
        }
    }

    let rows = chunk_rows
        .into_iter()
        .map(|row| {
            let mut cells = vec![String::new(); columns.len()];
            for chunk in row {
                let col = column_index(&columns, chunk.bbox.x0);
                if cells[col].is_empty() {
                    cells[col] = chunk.text;
                } else {
                    cells[col].push(' ');
                    cells[col].push_str(&chunk.text);
                }
            }
            cells
        })
        .collect();
    Some(Grid { rows })
}

/// Merge a row of x-sorted runs into chunks at gaps wider than
/// [`CHUNK_JOIN_TOLERANCE`].
fn merge_into_chunks(row: Vec<&TextRun>) -> Vec<TextRun> {
    let mut chunks: Vec<TextRun> = Vec::new();
    for run in row {
        match chunks.last_mut() {
            Some(chunk) if run.bbox.x0 - chunk.bbox.x1 <= CHUNK_JOIN_TOLERANCE => {
                chunk.text.push(' ');
                chunk.text.push_str(&run.text);
                chunk.bbox = chunk.bbox.union(&run.bbox);
            }
            _ => chunks.push(run.clone()),
        }
    }
    chunks
}

/// Index of the last column start at or before `x0` (within tolerance).
fn column_index(columns: &[f64], x0: f64) -> usize {
    let mut index = 0;
    for (i, &c) in columns.iter().enumerate() {
        if c <= x0 + COLUMN_X_TOLERANCE {
            index = i;
        } else {
            break;
        }
    }
    index
}

fn detect_lattice(runs: &[&TextRun], edges: &[Edge]) -> Option<Grid> {
    let ys = ruling_positions(edges, Orientation::Horizontal);
    let xs = ruling_positions(edges, Orientation::Vertical);
    if ys.len() < 2 || xs.len() < 2 {
        return None;
    }

    let rows = ys
        .windows(2)
        .map(|yw| {
            xs.windows(2)
                .map(|xw| {
                    let cell = BBox::new(xw[0], yw[0], xw[1], yw[1]);
                    cell_text(runs, &cell)
                })
                .collect()
        })
        .collect();
    Some(Grid { rows })
}

/// Text of the runs whose centers fall inside the cell, reading order.
fn cell_text(runs: &[&TextRun], cell: &BBox) -> String {
    let mut inside: Vec<&&TextRun> = runs
        .iter()
        .filter(|r| cell.contains_point(r.bbox.x_center(), r.bbox.y_center()))
        .collect();
    inside.sort_by(|a, b| {
        a.bbox
            .top
            .partial_cmp(&b.bbox.top)
            .unwrap()
            .then(a.bbox.x0.partial_cmp(&b.bbox.x0).unwrap())
    });
    inside
        .iter()
        .map(|r| r.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Distinct ruling positions along one axis, snapped within tolerance.
fn ruling_positions(edges: &[Edge], orientation: Orientation) -> Vec<f64> {
    let mut positions: Vec<f64> = edges
        .iter()
        .filter(|e| e.orientation == orientation)
        .map(|e| match orientation {
            Orientation::Horizontal => e.top,
            Orientation::Vertical => e.x0,
        })
        .collect();
    positions.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let mut snapped: Vec<f64> = Vec::new();
    for p in positions {
        match snapped.last() {
            Some(&last) if p - last <= RULING_TOLERANCE => {}
            _ => snapped.push(p),
        }
    }
    snapped
}
