//! Projects stored annotations into display-space paint operations.
//!
//! The canvas widget replays these after blitting the page raster, in the
//! order they come out, which makes creation order the z-order.

use crate::annotations::{Annotation, AnnotationStore};
use crate::coords;
use crate::models::Rgb;
use iced::{Point, Size};

#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    Polyline {
        points: Vec<Point>,
        color: Rgb,
        width: f32,
    },
    /// A stroke whose drag never moved; painted as a filled dot so a tap
    /// still leaves a visible mark.
    Dot {
        center: Point,
        radius: f32,
        color: Rgb,
    },
    Label {
        text: String,
        anchor: Point,
        color: Rgb,
    },
}

/// Display-space paint operations for one page at the given view
/// parameters, in creation order.
pub fn paint_ops(
    store: &AnnotationStore,
    page: usize,
    scale: f32,
    pan: (i32, i32),
    image_size: Size,
    widget_size: Size,
) -> Vec<PaintOp> {
    let project =
        |p: Point| coords::to_display_space(p, scale, pan, image_size, widget_size);

    store
        .annotations_for_page(page)
        .map(|annotation| match annotation {
            Annotation::Stroke(s) => {
                if s.points.len() == 1 {
                    PaintOp::Dot {
                        center: project(s.points[0]),
                        radius: (s.width as f32 / 2.0).max(1.0),
                        color: s.color,
                    }
                } else {
                    PaintOp::Polyline {
                        points: s.points.iter().copied().map(project).collect(),
                        color: s.color,
                        width: s.width as f32,
                    }
                }
            }
            Annotation::TextLabel(t) => PaintOp::Label {
                text: t.text.clone(),
                anchor: project(t.position),
                color: t.color,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDGET: Size = Size::new(1000.0, 800.0);
    const RED: Rgb = Rgb(255, 0, 0);

    fn store_with_fixture() -> AnnotationStore {
        let mut store = AnnotationStore::new();
        let page_size = Size::new(600.0, 400.0);
        let h = store.begin_stroke(0, RED, 4, Point::new(10.0, 10.0));
        store.append_to_stroke(h, Point::new(20.0, 30.0), page_size);
        store.end_stroke(h);
        store.add_text_label(0, "note", RED, Point::new(50.0, 60.0));
        store
    }

    #[test]
    fn test_ops_are_projected_and_creation_ordered() {
        let store = store_with_fixture();
        let image = Size::new(600.0, 400.0);
        let ops = paint_ops(&store, 0, 1.0, (0, 0), image, WIDGET);

        // Image origin at (200, 200).
        assert_eq!(ops.len(), 2);
        match &ops[0] {
            PaintOp::Polyline { points, width, .. } => {
                assert_eq!(points[0], Point::new(210.0, 210.0));
                assert_eq!(points[1], Point::new(220.0, 230.0));
                assert_eq!(*width, 4.0);
            }
            other => panic!("expected a polyline, got {other:?}"),
        }
        match &ops[1] {
            PaintOp::Label { text, anchor, .. } => {
                assert_eq!(text, "note");
                assert_eq!(*anchor, Point::new(250.0, 260.0));
            }
            other => panic!("expected a label, got {other:?}"),
        }
    }

    #[test]
    fn test_ops_follow_zoom_and_pan() {
        let store = store_with_fixture();
        let image = Size::new(1200.0, 800.0);
        let ops = paint_ops(&store, 0, 2.0, (10, -20), image, WIDGET);

        // Origin: ((1000-1200)/2 + 10, (800-800)/2 - 20) = (-90, -20).
        match &ops[0] {
            PaintOp::Polyline { points, .. } => {
                assert_eq!(points[0], Point::new(-70.0, 0.0));
            }
            other => panic!("expected a polyline, got {other:?}"),
        }
    }

    #[test]
    fn test_single_point_stroke_paints_a_dot() {
        let mut store = AnnotationStore::new();
        let h = store.begin_stroke(0, RED, 6, Point::new(100.0, 100.0));
        store.end_stroke(h);

        let image = Size::new(600.0, 400.0);
        let ops = paint_ops(&store, 0, 1.0, (0, 0), image, WIDGET);
        match &ops[0] {
            PaintOp::Dot { center, radius, .. } => {
                assert_eq!(*center, Point::new(300.0, 300.0));
                assert_eq!(*radius, 3.0);
            }
            other => panic!("expected a dot, got {other:?}"),
        }
    }

    #[test]
    fn test_other_pages_produce_no_ops() {
        let store = store_with_fixture();
        let image = Size::new(600.0, 400.0);
        assert!(paint_ops(&store, 1, 1.0, (0, 0), image, WIDGET).is_empty());
    }
}
