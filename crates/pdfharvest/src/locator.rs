//! Locating a section's page rectangles from its anchor texts.
//!
//! One forward scan over line-level text runs collects all four
//! anchor positions and counts page turns; a second pass assembles
//! the page rectangles. Anchors may appear out of top-to-bottom,
//! left-to-right order as long as the causal preconditions hold: the
//! bottom anchor is only searched once the top condition is
//! satisfied, and the right anchor once the left condition is.

use log::warn;
use pdfharvest_core::{BBox, LINE_Y_TOLERANCE, Section, cluster_into_lines};
use pdfharvest_parse::PageText;

use crate::document::Document;

/// Y inset that detaches an excluded bottom identifier from its
/// region. Empirical constant carried over from the original
/// measurement units; do not tune.
const BOTTOM_DETACH: f64 = 1.0;

/// Additional bottom inset applied on the last page of a multi-page
/// region when the bottom identifier is excluded. Same provenance as
/// [`BOTTOM_DETACH`].
const LAST_PAGE_INSET: f64 = 10.0;

/// One rectangle of a located region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageArea {
    /// 1-based page number.
    pub page_number: usize,
    pub bbox: BBox,
}

/// Locates the page rectangles bounding one section's content.
pub struct SectionLocator<'a> {
    section: &'a Section,
}

/// Anchor positions and page bookkeeping collected by the forward scan.
struct Scan {
    top_hit: Option<BBox>,
    left_hit: Option<BBox>,
    bottom_hit: Option<BBox>,
    right_hit: Option<BBox>,
    /// Page that turned out to contain the top of the section.
    actual_start: usize,
    /// Pages turned after the top condition held and before the
    /// bottom anchor was found; the region spans this many extra pages.
    page_turns: usize,
    /// First-run Y of every scanned page.
    top_margins: Vec<f64>,
}

impl<'a> SectionLocator<'a> {
    pub fn new(section: &'a Section) -> Self {
        Self { section }
    }

    /// Find the rectangles containing the section, scanning from
    /// `start_page` (1-based). Returns an empty sequence when the top
    /// anchor never appears.
    pub fn locate(&self, document: &Document, start_page: usize) -> Vec<PageArea> {
        let start_page = start_page.max(1);
        let scan = self.scan(document, start_page);

        let Some(start_page_text) = document.page(scan.actual_start) else {
            // The top anchor never matched before the document ran out.
            return Vec::new();
        };

        let measured = if scan.top_margins.is_empty() {
            0.0
        } else {
            (scan.top_margins.iter().sum::<f64>() / scan.top_margins.len() as f64).floor()
        };
        let margin_top = measured.max(self.section.top_margin);

        let (left, top) = self.top_left(&scan, start_page_text);

        if scan.page_turns == 0 {
            let (right, bottom) = self.bottom_right(&scan, start_page_text);
            return vec![PageArea {
                page_number: scan.actual_start,
                bbox: BBox::new(left, top, right, bottom),
            }];
        }

        let mut areas = Vec::new();

        // First page: from the located top-left down to the page edge.
        areas.push(PageArea {
            page_number: scan.actual_start,
            bbox: BBox::new(
                left,
                top,
                start_page_text.width,
                start_page_text.height - self.section.bottom_margin,
            ),
        });

        // Middle pages: full width between the working margins.
        for delta in 1..scan.page_turns {
            let number = scan.actual_start + delta;
            let Some(page) = document.page(number) else {
                break;
            };
            areas.push(PageArea {
                page_number: number,
                bbox: BBox::new(
                    left,
                    margin_top,
                    start_page_text.width,
                    page.height - self.section.bottom_margin,
                ),
            });
        }

        // Last page: down to the located bottom-right.
        let last_number = scan.actual_start + scan.page_turns;
        if let Some(last_page) = document.page(last_number) {
            let (right, mut bottom) = self.bottom_right(&scan, last_page);
            if scan.bottom_hit.is_some() && !self.section.bottom_included {
                bottom -= LAST_PAGE_INSET;
            }
            areas.push(PageArea {
                page_number: last_number,
                bbox: BBox::new(left, margin_top, right, bottom),
            });
        } else {
            warn!(
                "section '{}' runs past page {}; dropping its final rectangle",
                self.section.name,
                document.page_count()
            );
        }

        areas
    }

    /// Forward scan from `start_page` to the end of the document.
    fn scan(&self, document: &Document, start_page: usize) -> Scan {
        let section = self.section;
        let mut scan = Scan {
            top_hit: None,
            left_hit: None,
            bottom_hit: None,
            right_hit: None,
            actual_start: start_page,
            page_turns: 0,
            top_margins: Vec::new(),
        };

        let pages = document
            .pages()
            .get(start_page - 1..)
            .unwrap_or_default();

        for page in pages {
            let lines = cluster_into_lines(&page.runs, LINE_Y_TOLERANCE);

            if let Some(first) = lines.first() {
                scan.top_margins.push(first.bbox.top);
            }

            for line in &lines {
                if !section.top.is_empty()
                    && scan.top_hit.is_none()
                    && section.top.iter().any(|a| a.matches(&line.text))
                {
                    scan.top_hit = Some(line.bbox);
                }

                if let Some(left) = &section.left {
                    if scan.left_hit.is_none() && left.matches(&line.text) {
                        scan.left_hit = Some(line.bbox);
                    }
                }

                // Bottom only becomes searchable once the top condition
                // holds, so a bottom identifier above the true top
                // boundary cannot match.
                if (section.top.is_empty() || scan.top_hit.is_some())
                    && !section.bottom.is_empty()
                    && scan.bottom_hit.is_none()
                    && section.bottom.iter().any(|a| a.matches(&line.text))
                {
                    scan.bottom_hit = Some(line.bbox);
                }

                if let Some(right) = &section.right {
                    if (section.left.is_none() || scan.left_hit.is_some())
                        && scan.right_hit.is_none()
                        && right.matches(&line.text)
                    {
                        scan.right_hit = Some(line.bbox);
                    }
                }
            }

            if !section.top.is_empty() && scan.top_hit.is_none() {
                scan.actual_start += 1;
            }
            if (section.top.is_empty() || scan.top_hit.is_some()) && scan.bottom_hit.is_none() {
                scan.page_turns += 1;
            }
        }

        scan
    }

    /// Top-left corner from the anchors, page edges substituting for
    /// missing ones. Inclusion flags shift an anchor's own extent in
    /// or out of the region.
    fn top_left(&self, scan: &Scan, page: &PageText) -> (f64, f64) {
        let top = match scan.top_hit {
            Some(hit) => {
                if self.section.top_included {
                    hit.top
                } else {
                    hit.bottom
                }
            }
            None => 0.0,
        };
        let left = match scan.left_hit {
            Some(hit) => {
                if self.section.left_included {
                    hit.x0
                } else {
                    hit.x1
                }
            }
            None => page.bbox().x0,
        };
        (left.floor(), top.floor())
    }

    /// Bottom-right corner, as `(right, bottom)`.
    fn bottom_right(&self, scan: &Scan, page: &PageText) -> (f64, f64) {
        let bottom = match scan.bottom_hit {
            Some(hit) => {
                if self.section.bottom_included {
                    hit.bottom
                } else {
                    hit.top - BOTTOM_DETACH
                }
            }
            None => page.height,
        };
        let right = match scan.right_hit {
            Some(hit) => {
                if self.section.right_included {
                    hit.x1
                } else {
                    hit.x0
                }
            }
            None => page.width,
        };
        (right.ceil(), bottom.ceil())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfharvest_core::{Anchor, TextRun};

    const LINE_HEIGHT: f64 = 12.0;

    /// A page of single-run lines at the given tops.
    fn page(lines: &[(&str, f64)]) -> PageText {
        let runs = lines
            .iter()
            .map(|(text, top)| {
                TextRun::new(
                    *text,
                    BBox::new(72.0, *top, 72.0 + 6.0 * text.len() as f64, top + LINE_HEIGHT),
                )
            })
            .collect();
        PageText {
            page_number: 0,
            width: 612.0,
            height: 792.0,
            runs,
            rulings: Vec::new(),
        }
    }

    fn section_with(top: &str, bottom: &str) -> Section {
        let mut section = Section::new("s");
        section.top = vec![Anchor::new(top)];
        section.bottom = vec![Anchor::new(bottom)];
        section
    }

    #[test]
    fn test_single_page_region_with_default_flags() {
        let doc = Document::from_pages(vec![page(&[
            ("Header", 50.0),
            ("Table 7:", 100.0),
            ("data row", 130.0),
            ("Table 8:", 200.0),
        ])]);
        let section = section_with("Table 7:", "Table 8:");
        let areas = SectionLocator::new(&section).locate(&doc, 1);

        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].page_number, 1);
        // Top identifier included by default: the region starts at its top.
        assert_eq!(areas[0].bbox.top, 100.0);
        // Bottom identifier excluded by default: detached one unit above.
        assert_eq!(areas[0].bbox.bottom, 199.0);
        // No left/right anchors: page edges.
        assert_eq!(areas[0].bbox.x0, 0.0);
        assert_eq!(areas[0].bbox.x1, 612.0);
    }

    #[test]
    fn test_excluded_top_starts_below_the_identifier() {
        let doc = Document::from_pages(vec![page(&[
            ("Table 7:", 100.0),
            ("data row", 130.0),
            ("Table 8:", 200.0),
        ])]);
        let mut section = section_with("Table 7:", "Table 8:");
        section.top_included = false;
        let areas = SectionLocator::new(&section).locate(&doc, 1);

        assert_eq!(areas[0].bbox.top, 112.0);
    }

    #[test]
    fn test_included_bottom_keeps_the_identifier_row() {
        let doc = Document::from_pages(vec![page(&[
            ("Table 7:", 100.0),
            ("Total", 200.0),
        ])]);
        let mut section = section_with("Table 7:", "Total");
        section.bottom_included = true;
        let areas = SectionLocator::new(&section).locate(&doc, 1);

        assert_eq!(areas[0].bbox.bottom, 212.0);
    }

    #[test]
    fn test_missing_top_anchor_yields_empty() {
        let doc = Document::from_pages(vec![
            page(&[("nothing here", 100.0)]),
            page(&[("still nothing", 100.0)]),
        ]);
        let section = section_with("Table 7:", "Table 8:");
        assert!(SectionLocator::new(&section).locate(&doc, 1).is_empty());
    }

    #[test]
    fn test_prefix_and_suffix_matches() {
        let doc = Document::from_pages(vec![page(&[
            ("Table 7: Overview of results", 100.0),
            ("see also Table 8:", 200.0),
        ])]);
        let section = section_with("Table 7:", "Table 8:");
        let areas = SectionLocator::new(&section).locate(&doc, 1);
        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].bbox.top, 100.0);
    }

    #[test]
    fn test_bottom_alternatives_match_in_any_position() {
        let doc = Document::from_pages(vec![page(&[
            ("Start", 100.0),
            ("Appendix A", 300.0),
        ])]);
        let mut section = Section::new("s");
        section.top = vec![Anchor::new("Start")];
        section.bottom = vec![Anchor::new("Table 9:"), Anchor::new("Appendix A")];
        let areas = SectionLocator::new(&section).locate(&doc, 1);
        assert_eq!(areas[0].bbox.bottom, 299.0);
    }

    #[test]
    fn test_bottom_above_top_is_not_matched() {
        // The bottom identifier appears before the top anchor; the
        // bottom search must not start until the top has matched.
        let doc = Document::from_pages(vec![page(&[
            ("Table 8:", 50.0),
            ("Table 7:", 100.0),
            ("Table 8:", 200.0),
        ])]);
        let section = section_with("Table 7:", "Table 8:");
        let areas = SectionLocator::new(&section).locate(&doc, 1);
        assert_eq!(areas[0].bbox.top, 100.0);
        assert_eq!(areas[0].bbox.bottom, 199.0);
    }

    #[test]
    fn test_left_and_right_anchor_sides() {
        let doc = Document::from_pages(vec![page(&[
            ("Start", 100.0),
            ("Label", 130.0),
            ("Edge", 160.0),
            ("Stop", 200.0),
        ])]);
        let mut section = section_with("Start", "Stop");
        section.left = Some(Anchor::new("Label"));
        section.right = Some(Anchor::new("Edge"));
        let areas = SectionLocator::new(&section).locate(&doc, 1);

        // Included left anchor: region starts at its left edge.
        assert_eq!(areas[0].bbox.x0, 72.0);
        // Excluded right anchor (default): region ends at its left edge.
        assert_eq!(areas[0].bbox.x1, 72.0);

        let mut section = section_with("Start", "Stop");
        section.left = Some(Anchor::new("Label"));
        section.left_included = false;
        section.right = Some(Anchor::new("Edge"));
        section.right_included = true;
        let areas = SectionLocator::new(&section).locate(&doc, 1);

        // Excluded left anchor: region starts past the run's right edge.
        assert_eq!(areas[0].bbox.x0, (72.0f64 + 6.0 * 5.0).floor());
        // Included right anchor: region ends at the run's right edge.
        assert_eq!(areas[0].bbox.x1, (72.0f64 + 6.0 * 4.0).ceil());
    }

    #[test]
    fn test_multi_page_region_produces_first_middle_last() {
        let doc = Document::from_pages(vec![
            page(&[("Intro", 50.0)]),
            page(&[("Chapter Two:", 100.0), ("body", 150.0)]),
            page(&[("more body", 50.0)]),
            page(&[("Appendix", 100.0), ("tail", 150.0)]),
        ]);
        let section = section_with("Chapter Two:", "Appendix");
        let areas = SectionLocator::new(&section).locate(&doc, 1);

        assert_eq!(areas.len(), 3);
        assert_eq!(
            areas.iter().map(|a| a.page_number).collect::<Vec<_>>(),
            [2, 3, 4]
        );
        // First page runs from the top anchor to the page bottom.
        assert_eq!(areas[0].bbox.top, 100.0);
        assert_eq!(areas[0].bbox.bottom, 792.0);
        // Middle page spans full width between the working margins.
        assert_eq!(areas[1].bbox.x0, 0.0);
        assert_eq!(areas[1].bbox.x1, 612.0);
        // Last page ends at the bottom anchor, detached and inset.
        assert_eq!(areas[2].bbox.bottom, 99.0 - 10.0);
    }

    #[test]
    fn test_margin_override_takes_the_larger_value() {
        let pages = vec![
            page(&[("Chapter Two:", 50.0), ("body", 150.0)]),
            page(&[("more body", 50.0)]),
            page(&[("Appendix", 50.0)]),
        ];
        let doc = Document::from_pages(pages);

        // Measured average top margin is 50; the configured override
        // of 80 wins under the max rule.
        let mut section = section_with("Chapter Two:", "Appendix");
        section.top_margin = 80.0;
        let areas = SectionLocator::new(&section).locate(&doc, 1);
        assert_eq!(areas[1].bbox.top, 80.0);
        assert_eq!(areas[2].bbox.top, 80.0);

        // Without the override the measured average is used.
        let section = section_with("Chapter Two:", "Appendix");
        let areas = SectionLocator::new(&section).locate(&doc, 1);
        assert_eq!(areas[1].bbox.top, 50.0);
    }

    #[test]
    fn test_bottom_margin_trims_first_and_middle_pages() {
        let doc = Document::from_pages(vec![
            page(&[("Chapter Two:", 50.0)]),
            page(&[("body", 50.0)]),
            page(&[("Appendix", 50.0)]),
        ]);
        let mut section = section_with("Chapter Two:", "Appendix");
        section.bottom_margin = 40.0;
        let areas = SectionLocator::new(&section).locate(&doc, 1);
        assert_eq!(areas[0].bbox.bottom, 752.0);
        assert_eq!(areas[1].bbox.bottom, 752.0);
    }

    #[test]
    fn test_unmatched_bottom_truncates_region() {
        // The bottom identifier never matches: the region runs to the
        // end of the document and the out-of-range final rectangle is
        // dropped.
        let doc = Document::from_pages(vec![
            page(&[("Chapter Two:", 100.0)]),
            page(&[("body", 50.0)]),
        ]);
        let section = section_with("Chapter Two:", "Nowhere");
        let areas = SectionLocator::new(&section).locate(&doc, 1);

        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].page_number, 1);
        assert_eq!(areas[1].page_number, 2);
        // Both kept rectangles are top/full-width shapes.
        assert_eq!(areas[1].bbox.x1, 612.0);
    }

    #[test]
    fn test_no_top_identifier_starts_at_page_edge() {
        let doc = Document::from_pages(vec![page(&[
            ("first line", 40.0),
            ("Stop", 200.0),
        ])]);
        let mut section = Section::new("s");
        section.bottom = vec![Anchor::new("Stop")];
        let areas = SectionLocator::new(&section).locate(&doc, 1);

        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].bbox.top, 0.0);
        assert_eq!(areas[0].bbox.bottom, 199.0);
    }

    #[test]
    fn test_search_starts_at_the_given_page() {
        let doc = Document::from_pages(vec![
            page(&[("Marker", 100.0), ("Stop", 200.0)]),
            page(&[("Marker", 300.0), ("Stop", 400.0)]),
        ]);
        let mut section = Section::new("s");
        section.top = vec![Anchor::new("Marker")];
        section.bottom = vec![Anchor::new("Stop")];

        let areas = SectionLocator::new(&section).locate(&doc, 2);
        assert_eq!(areas[0].page_number, 2);
        assert_eq!(areas[0].bbox.top, 300.0);
    }

    #[test]
    fn test_start_page_past_document_is_empty() {
        let doc = Document::from_pages(vec![page(&[("Marker", 100.0)])]);
        let mut section = Section::new("s");
        section.top = vec![Anchor::new("Nowhere")];
        assert!(SectionLocator::new(&section).locate(&doc, 5).is_empty());
    }
}
