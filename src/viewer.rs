//! The page viewer: a canvas that blits the rendered raster and replays
//! the annotation overlay on top, wrapped in a mouse area that feeds
//! pointer events back to the update loop.

use crate::coords;
use crate::message::Message;
use crate::models::DocumentState;
use crate::overlay::{self, PaintOp};
use iced::widget::{canvas, mouse_area, responsive};
use iced::{mouse, Element, Length, Point, Rectangle, Renderer, Theme};

const LABEL_TEXT_SIZE: f32 = 16.0;

pub fn page_viewer(doc: &DocumentState) -> Element<'_, Message> {
    responsive(move |size| {
        mouse_area(
            canvas(PageCanvas { doc })
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .on_move(move |position| Message::PointerMoved(position, size))
        .on_press(Message::PointerPressed)
        .on_release(Message::PointerReleased)
        .on_exit(Message::PointerExited)
        .into()
    })
    .into()
}

struct PageCanvas<'a> {
    doc: &'a DocumentState,
}

impl canvas::Program<Message> for PageCanvas<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let doc = self.doc;

        let Some(rendered) = &doc.rendered else {
            let placeholder = doc
                .render_error
                .clone()
                .unwrap_or_else(|| "Rendering...".to_string());
            frame.fill_text(canvas::Text {
                content: placeholder,
                position: Point::new(20.0, 20.0),
                size: LABEL_TEXT_SIZE.into(),
                ..canvas::Text::default()
            });
            return vec![frame.into_geometry()];
        };

        let image_size = rendered.size();
        let origin = coords::content_origin(doc.view.pan, image_size, bounds.size());
        frame.draw_image(
            Rectangle::new(origin, image_size),
            canvas::Image::new(rendered.handle.clone()),
        );

        if let Some(error) = &doc.render_error {
            // Last good frame stays up; the failure is still visible.
            frame.fill_text(canvas::Text {
                content: error.clone(),
                position: Point::new(20.0, 20.0),
                size: LABEL_TEXT_SIZE.into(),
                ..canvas::Text::default()
            });
        }

        let ops = overlay::paint_ops(
            &doc.store,
            doc.view.current_page,
            rendered.scale,
            doc.view.pan,
            image_size,
            bounds.size(),
        );
        for op in ops {
            match op {
                PaintOp::Polyline {
                    points,
                    color,
                    width,
                } => {
                    let path = canvas::Path::new(|builder| {
                        builder.move_to(points[0]);
                        for point in &points[1..] {
                            builder.line_to(*point);
                        }
                    });
                    frame.stroke(
                        &path,
                        canvas::Stroke::default()
                            .with_color(color.to_color())
                            .with_width(width),
                    );
                }
                PaintOp::Dot {
                    center,
                    radius,
                    color,
                } => {
                    frame.fill(&canvas::Path::circle(center, radius), color.to_color());
                }
                PaintOp::Label {
                    text,
                    anchor,
                    color,
                } => {
                    frame.fill_text(canvas::Text {
                        content: text,
                        position: anchor,
                        color: color.to_color(),
                        size: LABEL_TEXT_SIZE.into(),
                        ..canvas::Text::default()
                    });
                }
            }
        }

        vec![frame.into_geometry()]
    }
}
