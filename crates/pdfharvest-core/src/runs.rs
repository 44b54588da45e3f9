//! Positioned text runs and the grouping helpers built on them.
//!
//! A [`TextRun`] is the unit the section locator and the grid detector
//! work with: a short piece of text with its bounding box on one page.
//! Backends emit word-level runs in reading order; the locator scans
//! line-level runs produced by [`cluster_into_lines`].

use crate::geometry::BBox;

/// Default baseline tolerance for grouping runs into lines, in points.
pub const LINE_Y_TOLERANCE: f64 = 3.0;

/// Containment slack when cropping runs to a region, in points.
pub const CONTAIN_TOLERANCE: f64 = 0.5;

/// A positioned piece of text on a page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextRun {
    /// The text content of this run.
    pub text: String,
    /// Bounding box in top-left page coordinates.
    pub bbox: BBox,
}

impl TextRun {
    pub fn new(text: impl Into<String>, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }
}

/// Group word-level runs into line-level runs.
///
/// Runs whose tops lie within `y_tolerance` of the current line are
/// merged left-to-right, joined with single spaces, with the union of
/// their boxes. Anchor identifiers frequently span several words
/// ("Table 7:"), so boundary matching happens against these lines.
pub fn cluster_into_lines(runs: &[TextRun], y_tolerance: f64) -> Vec<TextRun> {
    if runs.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&TextRun> = runs.iter().collect();
    sorted.sort_by(|a, b| {
        a.bbox
            .top
            .partial_cmp(&b.bbox.top)
            .unwrap()
            .then(a.bbox.x0.partial_cmp(&b.bbox.x0).unwrap())
    });

    let mut lines: Vec<Vec<&TextRun>> = Vec::new();
    for run in sorted {
        match lines.last_mut() {
            Some(line) if (run.bbox.top - line[0].bbox.top).abs() <= y_tolerance => {
                line.push(run);
            }
            _ => lines.push(vec![run]),
        }
    }

    lines
        .into_iter()
        .map(|mut line| {
            line.sort_by(|a, b| a.bbox.x0.partial_cmp(&b.bbox.x0).unwrap());
            let bbox = line
                .iter()
                .skip(1)
                .fold(line[0].bbox, |acc, r| acc.union(&r.bbox));
            let text = line
                .iter()
                .map(|r| r.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            TextRun::new(text, bbox)
        })
        .collect()
}

/// Return the runs fully contained in `bbox`, in their original order.
pub fn runs_within<'a>(runs: &'a [TextRun], bbox: &BBox) -> Vec<&'a TextRun> {
    runs.iter()
        .filter(|r| bbox.contains(&r.bbox, CONTAIN_TOLERANCE))
        .collect()
}
