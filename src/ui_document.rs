use crate::annotations::Annotation;
use crate::app::PdfScribeApp;
use crate::message::Message;
use crate::models::{DocumentState, Rgb, Tool, PEN_PALETTE};
use crate::viewer;
use iced::widget::{button, column, container, row, scrollable, text, text_input, Space};
use iced::{Element, Length};

pub fn document_view<'a>(app: &'a PdfScribeApp, doc: &'a DocumentState) -> Element<'a, Message> {
    column![
        render_toolbar(doc),
        row![
            render_sidebar(doc),
            render_viewer_column(doc),
        ]
        .height(Length::Fill),
        render_status_bar(app, doc),
    ]
    .into()
}

fn tool_button(label: &str, tool: Tool, active: Tool) -> Element<'_, Message> {
    let b = button(label).on_press(Message::SelectTool(tool));
    if tool == active {
        b.style(button::primary).into()
    } else {
        b.style(button::secondary).into()
    }
}

fn pen_swatch(color: Rgb, active: Rgb) -> Element<'static, Message> {
    let side = if color == active { 18.0 } else { 14.0 };
    button(
        Space::new()
            .width(Length::Fixed(side))
            .height(Length::Fixed(side)),
    )
    .style(move |_theme, _status| button::Style {
        background: Some(iced::Background::Color(color.to_color())),
        ..button::Style::default()
    })
    .padding(0)
    .on_press(Message::SetPenColor(color))
    .into()
}

fn render_toolbar(doc: &DocumentState) -> Element<'_, Message> {
    let view = &doc.view;

    let mut swatches = row![].spacing(2).align_y(iced::Alignment::Center);
    for color in PEN_PALETTE {
        swatches = swatches.push(pen_swatch(color, view.pen_color));
    }

    let row1 = row![
        button("Open").on_press(Message::OpenDocument),
        button("Save As").on_press(Message::SaveDocument),
        Space::new().width(Length::Fixed(10.0)),
        tool_button("Pan", Tool::Pan, view.tool),
        tool_button("Draw", Tool::Draw, view.tool),
        tool_button("Text", Tool::Text, view.tool),
        Space::new().width(Length::Fixed(10.0)),
        swatches,
        text(view.pen_color.name()).size(12),
        button("-").on_press(Message::PenWidthDown),
        text(format!("{}px", view.pen_width)),
        button("+").on_press(Message::PenWidthUp),
        Space::new().width(Length::Fill),
        button("-").on_press(Message::ZoomOut),
        text(format!("{}%", (view.scale * 100.0) as u32)),
        button("+").on_press(Message::ZoomIn),
        button("Reset").on_press(Message::ResetView),
    ]
    .spacing(5)
    .align_y(iced::Alignment::Center);

    column![row1].spacing(10).padding(10).into()
}

fn render_sidebar(doc: &DocumentState) -> Element<'_, Message> {
    let mut sidebar_col = column![].spacing(10).padding(5).width(Length::Fixed(180.0));

    sidebar_col = sidebar_col.push(text(format!("Page {} annotations", doc.view.current_page + 1)).size(14));

    let annotations: Vec<_> = doc.store.annotations_for_page(doc.view.current_page).collect();
    if annotations.is_empty() {
        sidebar_col = sidebar_col.push(text("None yet").size(12));
    } else {
        for annotation in &annotations {
            let label = match annotation {
                Annotation::Stroke(s) => format!("Drawing ({} points)", s.points.len()),
                Annotation::TextLabel(t) => {
                    format!("Text: {}", t.text.chars().take(24).collect::<String>())
                }
            };
            sidebar_col = sidebar_col.push(text(label).size(12));
        }
        sidebar_col = sidebar_col.push(button("Clear Page").on_press(Message::ClearPageAnnotations));
    }

    scrollable(sidebar_col).height(Length::Fill).into()
}

fn render_viewer_column(doc: &DocumentState) -> Element<'_, Message> {
    let mut viewer_col = column![container(viewer::page_viewer(doc))
        .width(Length::Fill)
        .height(Length::Fill)];

    if doc.view.tool == Tool::Text {
        viewer_col = viewer_col.push(
            row![
                text("Label:"),
                text_input("Type the label, then click the page", &doc.pending_text)
                    .on_input(Message::PendingTextChanged)
                    .width(Length::Fill),
            ]
            .spacing(5)
            .padding(5)
            .align_y(iced::Alignment::Center),
        );
    }

    viewer_col.width(Length::Fill).into()
}

fn render_status_bar<'a>(app: &'a PdfScribeApp, doc: &'a DocumentState) -> Element<'a, Message> {
    let status = if let Some(ref msg) = app.status_message {
        row![
            Space::new().width(Length::Fill),
            text(msg).size(12),
            button("x").on_press(Message::ClearStatus).padding(2),
        ]
    } else {
        row![]
    };

    row![
        button("Prev").on_press(Message::PrevPage),
        text(format!(
            "Page {} of {}",
            doc.view.current_page + 1,
            doc.page_count.max(1)
        )),
        button("Next").on_press(Message::NextPage),
        Space::new().width(Length::Fixed(20.0)),
        text_input("Go to page", &app.page_input)
            .on_input(Message::PageInputChanged)
            .on_submit(Message::PageInputSubmitted)
            .width(Length::Fixed(80.0)),
        status,
    ]
    .spacing(5)
    .padding(5)
    .align_y(iced::Alignment::Center)
    .into()
}
