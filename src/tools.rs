//! Pointer dispatch for the pan, draw and text tools.

use crate::annotations::{AnnotationStore, StrokeHandle};
use crate::coords;
use crate::models::{Tool, ViewState};
use iced::{Point, Size};

/// Geometry of the frame actually on screen. Built from the displayed
/// raster, not from the requested view state, so input keeps mapping to
/// the visible image while a re-render at a new zoom is still in flight.
#[derive(Debug, Clone, Copy)]
pub struct ContentGeometry {
    pub scale: f32,
    pub image_size: Size,
    pub widget_size: Size,
}

impl ContentGeometry {
    /// Page dimensions in page-local units.
    pub fn page_size(&self) -> Size {
        Size::new(
            self.image_size.width / self.scale,
            self.image_size.height / self.scale,
        )
    }
}

/// Tracks the gesture in progress. At most one of the two fields is set
/// at a time; both are display-space or handle state, never page data.
#[derive(Debug, Default)]
pub struct ToolController {
    active_stroke: Option<StrokeHandle>,
    pan_anchor: Option<Point>,
}

impl ToolController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active_stroke.is_some() || self.pan_anchor.is_some()
    }

    /// Handles a press at `display`. Returns true when a text label was
    /// placed, so the caller can clear the pending input. Presses outside
    /// the page rectangle start nothing in Draw and Text mode.
    pub fn on_pointer_down(
        &mut self,
        display: Point,
        view: &mut ViewState,
        geom: &ContentGeometry,
        pending_text: &str,
        store: &mut AnnotationStore,
    ) -> bool {
        match view.tool {
            Tool::Pan => {
                self.pan_anchor = Some(display);
                false
            }
            Tool::Draw => {
                if coords::is_within_content(display, view.pan, geom.image_size, geom.widget_size) {
                    let start = coords::to_page_space(
                        display,
                        geom.scale,
                        view.pan,
                        geom.image_size,
                        geom.widget_size,
                    );
                    self.active_stroke = Some(store.begin_stroke(
                        view.current_page,
                        view.pen_color,
                        view.pen_width,
                        start,
                    ));
                }
                false
            }
            Tool::Text => {
                if coords::is_within_content(display, view.pan, geom.image_size, geom.widget_size) {
                    let anchor = coords::to_page_space(
                        display,
                        geom.scale,
                        view.pan,
                        geom.image_size,
                        geom.widget_size,
                    );
                    store.add_text_label(view.current_page, pending_text, view.pen_color, anchor)
                } else {
                    false
                }
            }
        }
    }

    /// Handles movement: extends the active stroke or accumulates pan
    /// deltas. Movement with no gesture in progress does nothing.
    pub fn on_pointer_move(
        &mut self,
        display: Point,
        view: &mut ViewState,
        geom: &ContentGeometry,
        store: &mut AnnotationStore,
    ) {
        if let Some(anchor) = self.pan_anchor {
            view.pan.0 += (display.x - anchor.x).round() as i32;
            view.pan.1 += (display.y - anchor.y).round() as i32;
            self.pan_anchor = Some(display);
        } else if let Some(handle) = self.active_stroke {
            let point = coords::to_page_space(
                display,
                geom.scale,
                view.pan,
                geom.image_size,
                geom.widget_size,
            );
            store.append_to_stroke(handle, point, geom.page_size());
        }
    }

    /// Ends the gesture in progress, keeping whatever points were
    /// captured. Also used when the pointer leaves the widget or the tool
    /// or page changes mid-drag.
    pub fn finish(&mut self, store: &mut AnnotationStore) {
        if let Some(handle) = self.active_stroke.take() {
            store.end_stroke(handle);
        }
        self.pan_anchor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppSettings;

    const WIDGET: Size = Size::new(1000.0, 800.0);

    fn geom() -> ContentGeometry {
        ContentGeometry {
            scale: 1.0,
            image_size: Size::new(600.0, 400.0),
            widget_size: WIDGET,
        }
    }

    fn view() -> ViewState {
        ViewState::new(&AppSettings::default())
    }

    #[test]
    fn test_draw_drag_records_page_local_points() {
        let g = geom();
        let mut v = view();
        v.tool = Tool::Draw;
        let mut store = AnnotationStore::new();
        let mut ctl = ToolController::new();

        // Image origin is (200, 200) in a 1000x800 widget.
        ctl.on_pointer_down(Point::new(250.0, 260.0), &mut v, &g, "", &mut store);
        ctl.on_pointer_move(Point::new(260.0, 270.0), &mut v, &g, &mut store);
        ctl.finish(&mut store);

        match store.annotations_for_page(0).next().unwrap() {
            crate::annotations::Annotation::Stroke(s) => {
                assert_eq!(s.points[0], Point::new(50.0, 60.0));
                assert_eq!(s.points[1], Point::new(60.0, 70.0));
            }
            _ => panic!("expected a stroke"),
        }
    }

    #[test]
    fn test_margin_press_creates_nothing_and_keeps_pan() {
        let g = geom();
        let mut v = view();
        v.tool = Tool::Draw;
        v.pan = (12, -7);
        let mut store = AnnotationStore::new();
        let mut ctl = ToolController::new();

        ctl.on_pointer_down(Point::new(5.0, 5.0), &mut v, &g, "", &mut store);
        ctl.on_pointer_move(Point::new(50.0, 50.0), &mut v, &g, &mut store);
        ctl.finish(&mut store);

        assert!(store.is_empty());
        assert_eq!(v.pan, (12, -7));

        v.tool = Tool::Text;
        assert!(!ctl.on_pointer_down(Point::new(5.0, 5.0), &mut v, &g, "note", &mut store));
        assert!(store.is_empty());
        assert_eq!(v.pan, (12, -7));
    }

    #[test]
    fn test_pan_drag_accumulates_deltas() {
        let g = geom();
        let mut v = view();
        let mut store = AnnotationStore::new();
        let mut ctl = ToolController::new();

        ctl.on_pointer_down(Point::new(400.0, 400.0), &mut v, &g, "", &mut store);
        ctl.on_pointer_move(Point::new(410.0, 395.0), &mut v, &g, &mut store);
        ctl.on_pointer_move(Point::new(430.0, 390.0), &mut v, &g, &mut store);
        ctl.finish(&mut store);

        assert_eq!(v.pan, (30, -10));
        assert!(store.is_empty());
    }

    #[test]
    fn test_text_press_places_trimmed_label() {
        let g = geom();
        let mut v = view();
        v.tool = Tool::Text;
        let mut store = AnnotationStore::new();
        let mut ctl = ToolController::new();

        let placed =
            ctl.on_pointer_down(Point::new(300.0, 300.0), &mut v, &g, " note ", &mut store);
        assert!(placed);
        match store.annotations_for_page(0).next().unwrap() {
            crate::annotations::Annotation::TextLabel(t) => {
                assert_eq!(t.text, "note");
                assert_eq!(t.position, Point::new(100.0, 100.0));
            }
            _ => panic!("expected a label"),
        }

        // Empty input never places anything.
        assert!(!ctl.on_pointer_down(Point::new(300.0, 300.0), &mut v, &g, "  ", &mut store));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_moves_after_finish_do_not_extend_the_stroke() {
        let g = geom();
        let mut v = view();
        v.tool = Tool::Draw;
        let mut store = AnnotationStore::new();
        let mut ctl = ToolController::new();

        ctl.on_pointer_down(Point::new(250.0, 250.0), &mut v, &g, "", &mut store);
        ctl.finish(&mut store);
        ctl.on_pointer_move(Point::new(260.0, 260.0), &mut v, &g, &mut store);

        match store.annotations_for_page(0).next().unwrap() {
            crate::annotations::Annotation::Stroke(s) => assert_eq!(s.points.len(), 1),
            _ => panic!("expected a stroke"),
        }
        assert!(!ctl.is_dragging());
    }
}
