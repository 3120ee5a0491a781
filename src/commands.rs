use crate::annotations::Annotation;
use crate::error::ScribeError;
use crate::pdf_engine::{DocumentInfo, RenderedPage};
use tokio::sync::mpsc;

/// Requests serviced by the engine thread. Each carries its own reply
/// channel; the engine answers exactly once per command.
#[derive(Debug, Clone)]
pub enum PdfCommand {
    Open(String, mpsc::Sender<Result<DocumentInfo, ScribeError>>),
    Render(i32, f32, mpsc::Sender<Result<RenderedPage, ScribeError>>),
    /// Destination path and the annotations to burn in.
    Save(
        String,
        Vec<Annotation>,
        mpsc::Sender<Result<String, ScribeError>>,
    ),
}
