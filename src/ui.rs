use crate::app::PdfScribeApp;
use crate::message::Message;
use crate::ui_document::document_view;
use crate::ui_welcome::welcome_view;
use iced::Element;

pub fn view(app: &PdfScribeApp) -> Element<'_, Message> {
    match &app.doc {
        Some(doc) => document_view(app, doc),
        None => welcome_view(app),
    }
}
