//! Per-page annotation storage.
//!
//! Annotations are kept in a single creation-ordered list; that order is
//! both the render z-order and the order shown in the sidebar. Points are
//! page-local (scale 1.0) units, so a stored annotation never has to be
//! rewritten when the zoom level changes.

use crate::models::Rgb;
use iced::{Point, Size};

/// Identifies the stroke created by a `begin_stroke` call. Appending
/// through a handle whose stroke has been finalized is a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeHandle(u64);

#[derive(Debug, Clone)]
pub struct Stroke {
    id: u64,
    pub page: usize,
    pub color: Rgb,
    pub width: u32,
    pub points: Vec<Point>,
    open: bool,
}

#[derive(Debug, Clone)]
pub struct TextLabel {
    pub page: usize,
    pub text: String,
    pub color: Rgb,
    pub position: Point,
}

#[derive(Debug, Clone)]
pub enum Annotation {
    Stroke(Stroke),
    TextLabel(TextLabel),
}

impl Annotation {
    pub fn page(&self) -> usize {
        match self {
            Annotation::Stroke(s) => s.page,
            Annotation::TextLabel(t) => t.page,
        }
    }
}

#[derive(Debug, Default)]
pub struct AnnotationStore {
    items: Vec<Annotation>,
    next_id: u64,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new stroke with a single initial point and returns the
    /// handle the active drag appends through.
    pub fn begin_stroke(
        &mut self,
        page: usize,
        color: Rgb,
        width: u32,
        start: Point,
    ) -> StrokeHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Annotation::Stroke(Stroke {
            id,
            page,
            color,
            width,
            points: vec![start],
            open: true,
        }));
        StrokeHandle(id)
    }

    /// Appends a point to the stroke behind `handle`. Points outside the
    /// page's raster bounds are dropped, and a stale handle (the stroke was
    /// already finalized) does nothing.
    pub fn append_to_stroke(&mut self, handle: StrokeHandle, point: Point, page_size: Size) {
        if point.x < 0.0 || point.y < 0.0 || point.x > page_size.width || point.y > page_size.height
        {
            return;
        }
        if let Some(stroke) = self.stroke_mut(handle) {
            if stroke.open {
                stroke.points.push(point);
            }
        }
    }

    /// Finalizes the stroke; further appends through the handle are no-ops.
    pub fn end_stroke(&mut self, handle: StrokeHandle) {
        if let Some(stroke) = self.stroke_mut(handle) {
            stroke.open = false;
        }
    }

    /// Adds a text label. Whitespace-only text is rejected and nothing is
    /// stored; returns whether a label was added.
    pub fn add_text_label(&mut self, page: usize, text: &str, color: Rgb, position: Point) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.items.push(Annotation::TextLabel(TextLabel {
            page,
            text: trimmed.to_string(),
            color,
            position,
        }));
        true
    }

    /// Removes every annotation on `page`; other pages are untouched.
    pub fn clear_page(&mut self, page: usize) {
        self.items.retain(|a| a.page() != page);
    }

    /// All annotations on `page`, in creation order.
    pub fn annotations_for_page(&self, page: usize) -> impl Iterator<Item = &Annotation> {
        self.items.iter().filter(move |a| a.page() == page)
    }

    /// All annotations across all pages, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drops everything. Invoked when a new document is opened.
    pub fn reset(&mut self) {
        self.items.clear();
    }

    fn stroke_mut(&mut self, handle: StrokeHandle) -> Option<&mut Stroke> {
        self.items.iter_mut().find_map(|a| match a {
            Annotation::Stroke(s) if s.id == handle.0 => Some(s),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_SIZE: Size = Size::new(612.0, 792.0);
    const RED: Rgb = Rgb(255, 0, 0);

    #[test]
    fn test_begin_stroke_starts_with_initial_point() {
        let mut store = AnnotationStore::new();
        let handle = store.begin_stroke(0, RED, 3, Point::new(10.0, 20.0));
        store.append_to_stroke(handle, Point::new(11.0, 21.0), PAGE_SIZE);

        let strokes: Vec<_> = store.annotations_for_page(0).collect();
        assert_eq!(strokes.len(), 1);
        match strokes[0] {
            Annotation::Stroke(s) => {
                assert_eq!(s.points.len(), 2);
                assert_eq!(s.points[0], Point::new(10.0, 20.0));
            }
            Annotation::TextLabel(_) => panic!("expected a stroke"),
        }
    }

    #[test]
    fn test_append_after_end_is_a_no_op() {
        let mut store = AnnotationStore::new();
        let handle = store.begin_stroke(0, RED, 3, Point::new(1.0, 1.0));
        store.append_to_stroke(handle, Point::new(2.0, 2.0), PAGE_SIZE);
        store.end_stroke(handle);
        store.append_to_stroke(handle, Point::new(3.0, 3.0), PAGE_SIZE);
        store.append_to_stroke(handle, Point::new(4.0, 4.0), PAGE_SIZE);

        match store.annotations_for_page(0).next().unwrap() {
            Annotation::Stroke(s) => assert_eq!(s.points.len(), 2),
            Annotation::TextLabel(_) => panic!("expected a stroke"),
        }
    }

    #[test]
    fn test_out_of_bounds_points_are_dropped() {
        let mut store = AnnotationStore::new();
        let handle = store.begin_stroke(0, RED, 3, Point::new(1.0, 1.0));
        store.append_to_stroke(handle, Point::new(-5.0, 10.0), PAGE_SIZE);
        store.append_to_stroke(handle, Point::new(10.0, 9999.0), PAGE_SIZE);
        store.append_to_stroke(handle, Point::new(10.0, 10.0), PAGE_SIZE);

        match store.annotations_for_page(0).next().unwrap() {
            Annotation::Stroke(s) => assert_eq!(s.points.len(), 2),
            Annotation::TextLabel(_) => panic!("expected a stroke"),
        }
    }

    #[test]
    fn test_blank_text_is_never_stored() {
        let mut store = AnnotationStore::new();
        assert!(!store.add_text_label(0, "", RED, Point::new(5.0, 5.0)));
        assert!(!store.add_text_label(0, "   \t\n", RED, Point::new(5.0, 5.0)));
        assert_eq!(store.len(), 0);

        assert!(store.add_text_label(0, "  note  ", RED, Point::new(5.0, 5.0)));
        assert_eq!(store.len(), 1);
        match store.annotations_for_page(0).next().unwrap() {
            Annotation::TextLabel(t) => assert_eq!(t.text, "note"),
            Annotation::Stroke(_) => panic!("expected a label"),
        }
    }

    #[test]
    fn test_clear_page_removes_only_that_page() {
        let mut store = AnnotationStore::new();
        let h0 = store.begin_stroke(0, RED, 3, Point::new(1.0, 1.0));
        store.end_stroke(h0);
        store.add_text_label(0, "a", RED, Point::new(2.0, 2.0));
        let h2 = store.begin_stroke(2, RED, 3, Point::new(3.0, 3.0));
        store.end_stroke(h2);
        store.add_text_label(2, "b", RED, Point::new(4.0, 4.0));

        store.clear_page(0);
        assert_eq!(store.annotations_for_page(0).count(), 0);
        assert_eq!(store.annotations_for_page(2).count(), 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_listing_preserves_creation_order_across_kinds() {
        let mut store = AnnotationStore::new();
        let h = store.begin_stroke(1, RED, 3, Point::new(1.0, 1.0));
        store.end_stroke(h);
        store.add_text_label(1, "between", RED, Point::new(2.0, 2.0));
        let h = store.begin_stroke(1, RED, 3, Point::new(3.0, 3.0));
        store.end_stroke(h);

        let kinds: Vec<_> = store
            .annotations_for_page(1)
            .map(|a| matches!(a, Annotation::Stroke(_)))
            .collect();
        assert_eq!(kinds, vec![true, false, true]);
    }

    #[test]
    fn test_label_survives_page_switches_unchanged() {
        let mut store = AnnotationStore::new();
        store.add_text_label(2, "Hello", RED, Point::new(100.0, 100.0));

        // Looking at another page does not disturb page 2.
        assert_eq!(store.annotations_for_page(3).count(), 0);
        match store.annotations_for_page(2).next().unwrap() {
            Annotation::TextLabel(t) => {
                assert_eq!(t.text, "Hello");
                assert_eq!(t.position, Point::new(100.0, 100.0));
            }
            Annotation::Stroke(_) => panic!("expected a label"),
        }
    }

    #[test]
    fn test_reset_clears_all_pages() {
        let mut store = AnnotationStore::new();
        store.add_text_label(0, "a", RED, Point::new(1.0, 1.0));
        store.add_text_label(7, "b", RED, Point::new(1.0, 1.0));
        store.reset();
        assert!(store.is_empty());
    }
}
