use crate::error::ScribeError;
use crate::models::{RecentFile, Rgb, Tool};
use crate::pdf_engine::{DocumentInfo, RenderedPage};
use iced::{Point, Size};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Message {
    // Document lifecycle
    OpenDocument,
    OpenRecentFile(RecentFile),
    DocumentOpened(Result<(PathBuf, DocumentInfo), ScribeError>),
    SaveDocument,
    DocumentSaved(Result<String, ScribeError>),
    DialogCancelled,
    PageRendered(Result<RenderedPage, ScribeError>),

    // Navigation and view
    NextPage,
    PrevPage,
    PageInputChanged(String),
    PageInputSubmitted,
    ZoomIn,
    ZoomOut,
    ResetView,

    // Tools and pen
    SelectTool(Tool),
    SetPenColor(Rgb),
    PenWidthUp,
    PenWidthDown,
    PendingTextChanged(String),

    // Pointer events from the viewer, widget-local
    PointerMoved(Point, Size),
    PointerPressed,
    PointerReleased,
    PointerExited,

    // Annotations
    ClearPageAnnotations,

    // Welcome screen and status bar
    ClearRecentFiles,
    ClearStatus,
}
