//! Display <-> page coordinate mapping.
//!
//! The rendered page raster is centered inside the viewer widget and then
//! shifted by the pan offset. Page-local coordinates are the raster's own
//! pixel grid divided by the render scale, which makes them equal to PDF
//! points and independent of the current zoom level.

use iced::{Point, Size};

/// Top-left corner of the page raster inside the widget, after centering
/// and panning.
pub fn content_origin(pan: (i32, i32), image_size: Size, widget_size: Size) -> Point {
    Point::new(
        (widget_size.width - image_size.width) / 2.0 + pan.0 as f32,
        (widget_size.height - image_size.height) / 2.0 + pan.1 as f32,
    )
}

/// Maps a widget-local point to page-local units.
pub fn to_page_space(
    display: Point,
    scale: f32,
    pan: (i32, i32),
    image_size: Size,
    widget_size: Size,
) -> Point {
    let origin = content_origin(pan, image_size, widget_size);
    Point::new(
        (display.x - origin.x) / scale,
        (display.y - origin.y) / scale,
    )
}

/// Maps a page-local point back to widget coordinates.
pub fn to_display_space(
    page_point: Point,
    scale: f32,
    pan: (i32, i32),
    image_size: Size,
    widget_size: Size,
) -> Point {
    let origin = content_origin(pan, image_size, widget_size);
    Point::new(
        page_point.x * scale + origin.x,
        page_point.y * scale + origin.y,
    )
}

/// Whether a widget-local point lies over the rendered page rectangle.
pub fn is_within_content(
    display: Point,
    pan: (i32, i32),
    image_size: Size,
    widget_size: Size,
) -> bool {
    let origin = content_origin(pan, image_size, widget_size);
    display.x >= origin.x
        && display.y >= origin.y
        && display.x <= origin.x + image_size.width
        && display.y <= origin.y + image_size.height
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDGET: Size = Size::new(1000.0, 800.0);

    #[test]
    fn test_centering_offset_at_unit_zoom() {
        let image = Size::new(600.0, 400.0);
        let origin = content_origin((0, 0), image, WIDGET);
        assert_eq!(origin, Point::new(200.0, 200.0));

        // A click at the image's top-left corner maps to page (0, 0).
        let page = to_page_space(Point::new(200.0, 200.0), 1.0, (0, 0), image, WIDGET);
        assert!(page.x.abs() < 1e-4 && page.y.abs() < 1e-4);
    }

    #[test]
    fn test_round_trip_is_identity_at_any_zoom() {
        let page_point = Point::new(123.5, 456.25);
        for scale in [0.25_f32, 0.5, 1.0, 1.75, 3.0, 5.0] {
            let image = Size::new(612.0 * scale, 792.0 * scale);
            let pan = (37, -81);
            let display = to_display_space(page_point, scale, pan, image, WIDGET);
            let back = to_page_space(display, scale, pan, image, WIDGET);
            assert!(
                (back.x - page_point.x).abs() < 1e-2 && (back.y - page_point.y).abs() < 1e-2,
                "round trip drifted at scale {scale}: {back:?}"
            );
        }
    }

    #[test]
    fn test_pan_shifts_the_content_rectangle() {
        let image = Size::new(600.0, 400.0);
        let center = Point::new(500.0, 400.0);
        assert!(is_within_content(center, (0, 0), image, WIDGET));

        // Pan the page fully off to the right of the click point.
        assert!(!is_within_content(center, (400, 0), image, WIDGET));
    }

    #[test]
    fn test_margin_points_are_outside_content() {
        let image = Size::new(600.0, 400.0);
        assert!(!is_within_content(Point::new(10.0, 10.0), (0, 0), image, WIDGET));
        assert!(!is_within_content(Point::new(990.0, 790.0), (0, 0), image, WIDGET));
        assert!(is_within_content(Point::new(200.0, 200.0), (0, 0), image, WIDGET));
        assert!(is_within_content(Point::new(800.0, 600.0), (0, 0), image, WIDGET));
    }

    #[test]
    fn test_zoom_change_does_not_move_stored_points() {
        // The same display pixel maps to different page points at different
        // zoom levels, but a stored page point projected and un-projected
        // through any zoom stays fixed.
        let stored = Point::new(300.0, 300.0);
        let image_1x = Size::new(612.0, 792.0);
        let image_2x = Size::new(1224.0, 1584.0);

        let at_1x = to_display_space(stored, 1.0, (0, 0), image_1x, WIDGET);
        let at_2x = to_display_space(stored, 2.0, (0, 0), image_2x, WIDGET);
        assert_ne!(at_1x, at_2x);

        let back = to_page_space(at_2x, 2.0, (0, 0), image_2x, WIDGET);
        assert!((back.x - stored.x).abs() < 1e-3);
        assert!((back.y - stored.y).abs() < 1e-3);
    }
}
