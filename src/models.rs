use crate::annotations::AnnotationStore;
use crate::tools::{ContentGeometry, ToolController};
use iced::widget::image as iced_image;
use iced::{Point, Size};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const MIN_ZOOM: f32 = 0.25;
pub const MAX_ZOOM: f32 = 5.0;
pub const ZOOM_STEP: f32 = 1.25;

pub const MIN_PEN_WIDTH: u32 = 1;
pub const MAX_PEN_WIDTH: u32 = 20;

/// Pen colors offered by the toolbar swatch picker.
pub const PEN_PALETTE: [Rgb; 8] = [
    Rgb(255, 0, 0),
    Rgb(0, 0, 255),
    Rgb(0, 128, 0),
    Rgb(0, 0, 0),
    Rgb(255, 140, 0),
    Rgb(128, 0, 128),
    Rgb(255, 0, 255),
    Rgb(0, 128, 128),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_color(self) -> iced::Color {
        iced::Color::from_rgb8(self.0, self.1, self.2)
    }

    pub fn name(self) -> &'static str {
        match self {
            Rgb(255, 0, 0) => "Red",
            Rgb(0, 0, 255) => "Blue",
            Rgb(0, 128, 0) => "Green",
            Rgb(0, 0, 0) => "Black",
            Rgb(255, 140, 0) => "Orange",
            Rgb(128, 0, 128) => "Purple",
            Rgb(255, 0, 255) => "Magenta",
            Rgb(0, 128, 128) => "Teal",
            _ => "Custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tool {
    Pan,
    Draw,
    Text,
}

/// Per-session view configuration: page, zoom, pan and the pen, held
/// explicitly rather than as ambient globals.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub current_page: usize,
    pub scale: f32,
    /// Display-space translation in whole pixels.
    pub pan: (i32, i32),
    pub tool: Tool,
    pub pen_color: Rgb,
    pub pen_width: u32,
}

impl ViewState {
    pub fn new(settings: &AppSettings) -> Self {
        Self {
            current_page: 0,
            scale: settings.default_zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            pan: (0, 0),
            tool: Tool::Pan,
            pen_color: settings.pen_color,
            pen_width: settings.pen_width.clamp(MIN_PEN_WIDTH, MAX_PEN_WIDTH),
        }
    }

    pub fn zoom_in(&mut self) {
        self.scale = (self.scale * ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.scale = (self.scale / ZOOM_STEP).max(MIN_ZOOM);
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.scale = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn reset_view(&mut self) {
        self.scale = 1.0;
        self.pan = (0, 0);
    }

    /// Moves to `page` if it is in bounds. Pan resets on any page change;
    /// out-of-bounds targets leave the state untouched.
    pub fn jump_to_page(&mut self, page: usize, page_count: usize) -> bool {
        if page < page_count && page != self.current_page {
            self.current_page = page;
            self.pan = (0, 0);
            true
        } else {
            false
        }
    }

    pub fn pen_width_up(&mut self) {
        self.pen_width = (self.pen_width + 1).min(MAX_PEN_WIDTH);
    }

    pub fn pen_width_down(&mut self) {
        self.pen_width = self.pen_width.saturating_sub(1).max(MIN_PEN_WIDTH);
    }

    pub fn next_page(&mut self, page_count: usize) -> bool {
        self.jump_to_page(self.current_page + 1, page_count)
    }

    pub fn prev_page(&mut self, page_count: usize) -> bool {
        if self.current_page == 0 {
            return false;
        }
        self.jump_to_page(self.current_page - 1, page_count)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub default_zoom: f32,
    pub pen_color: Rgb,
    pub pen_width: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_zoom: 1.0,
            pen_color: PEN_PALETTE[0],
            pen_width: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentFile {
    pub path: String,
    pub name: String,
    pub last_opened: u64,
}

/// The raster currently on screen. The scale it was rendered at travels
/// with it so painting and input mapping stay aligned with the displayed
/// image even while a re-render at a new zoom level is in flight.
pub struct RenderedFrame {
    pub scale: f32,
    pub width: u32,
    pub height: u32,
    pub handle: iced_image::Handle,
}

impl RenderedFrame {
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

/// Everything owned by one open document.
pub struct DocumentState {
    pub path: PathBuf,
    pub name: String,
    pub page_count: usize,
    /// Page dimensions at scale 1.0, in page-local units (PDF points).
    pub page_sizes: Vec<Size>,
    pub view: ViewState,
    pub store: AnnotationStore,
    pub controller: ToolController,
    pub pending_text: String,
    pub rendered: Option<RenderedFrame>,
    pub render_error: Option<String>,
    /// Last cursor position over the viewer, widget-local.
    pub cursor: Option<Point>,
    /// Size of the viewer widget as of the last pointer event.
    pub widget_size: Size,
}

impl DocumentState {
    pub fn new(
        path: PathBuf,
        page_count: usize,
        page_sizes: Vec<Size>,
        settings: &AppSettings,
    ) -> Self {
        Self {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "Untitled".to_string()),
            path,
            page_count,
            page_sizes,
            view: ViewState::new(settings),
            store: AnnotationStore::new(),
            controller: ToolController::new(),
            pending_text: String::new(),
            rendered: None,
            render_error: None,
            cursor: None,
            widget_size: Size::new(0.0, 0.0),
        }
    }

    /// Input mapping geometry for the frame currently displayed. None
    /// until the first raster has arrived and the widget has reported a
    /// real size; pointer handlers are no-ops in that window.
    pub fn geometry(&self) -> Option<ContentGeometry> {
        let frame = self.rendered.as_ref()?;
        if self.widget_size.width <= 0.0 || self.widget_size.height <= 0.0 {
            return None;
        }
        Some(ContentGeometry {
            scale: frame.scale,
            image_size: frame.size(),
            widget_size: self.widget_size,
        })
    }
}
