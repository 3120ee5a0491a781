use crate::annotations::Annotation;
use crate::error::ScribeError;
use iced::Size;
use pdfium_render::prelude::*;
use std::sync::Arc;

/// Label glyph size used when burning text annotations into the output.
const LABEL_FONT_SIZE: f32 = 12.0;

#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub page_count: usize,
    /// Page dimensions at scale 1.0, in PDF points.
    pub page_sizes: Vec<Size>,
}

#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub page: usize,
    pub scale: f32,
    pub width: u32,
    pub height: u32,
    pub pixels: Arc<Vec<u8>>,
}

pub struct PdfEngine<'a> {
    pdfium: &'a Pdfium,
    active_doc: Option<PdfDocument<'a>>,
    active_path: Option<String>,
}

impl<'a> PdfEngine<'a> {
    pub fn init_pdfium() -> Result<Pdfium, ScribeError> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name()))
            .map_err(|e| ScribeError::EngineInit(e.to_string()))?;

        Ok(Pdfium::new(bindings))
    }

    pub fn new(pdfium: &'a Pdfium) -> Self {
        Self {
            pdfium,
            active_doc: None,
            active_path: None,
        }
    }

    pub fn open_document(&mut self, path: &str) -> Result<DocumentInfo, ScribeError> {
        let doc = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| ScribeError::DocumentOpen(e.to_string()))?;

        let pages = doc.pages();
        let page_count = pages.len();

        let mut page_sizes = Vec::with_capacity(page_count as usize);
        for i in 0..page_count {
            if let Ok(page) = pages.get(i) {
                page_sizes.push(Size::new(page.width().value, page.height().value));
            } else {
                page_sizes.push(Size::new(0.0, 0.0));
            }
        }

        self.active_doc = Some(doc);
        self.active_path = Some(path.to_string());

        Ok(DocumentInfo {
            page_count: page_count as usize,
            page_sizes,
        })
    }

    pub fn render_page(&self, page_num: i32, scale: f32) -> Result<RenderedPage, ScribeError> {
        let page_idx = usize::try_from(page_num)
            .map_err(|_| self.render_error(page_num, "page number out of bounds"))?;

        let Some(doc) = &self.active_doc else {
            return Err(self.render_error(page_num, "no active document"));
        };
        if page_idx >= doc.pages().len() as usize {
            return Err(self.render_error(page_num, "page number out of bounds"));
        }

        let page = doc
            .pages()
            .get(page_num as u16)
            .map_err(|e| self.render_error(page_num, &e.to_string()))?;

        let render_config = PdfRenderConfig::new()
            .set_target_width((page.width().value * scale) as i32)
            .set_maximum_height((page.height().value * scale) as i32)
            .rotate(PdfPageRenderRotation::None, false);

        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| self.render_error(page_num, &e.to_string()))?;

        let width = bitmap.width() as u32;
        let height = bitmap.height() as u32;
        let pixels = Arc::new(bitmap.as_rgba_bytes().to_vec());

        Ok(RenderedPage {
            page: page_idx,
            scale,
            width,
            height,
            pixels,
        })
    }

    /// Burns `annotations` into a fresh copy of the active document and
    /// writes it to `dest`. The viewing document is left untouched, so a
    /// failed or repeated save can never double-apply.
    pub fn save_with_annotations(
        &self,
        dest: &str,
        annotations: &[Annotation],
    ) -> Result<(), ScribeError> {
        let Some(src) = &self.active_path else {
            return Err(ScribeError::DocumentSave("no active document".to_string()));
        };

        let mut doc = self
            .pdfium
            .load_pdf_from_file(src, None)
            .map_err(|e| ScribeError::DocumentSave(e.to_string()))?;

        let font = doc.fonts_mut().helvetica();
        let page_count = doc.pages().len() as usize;

        for annotation in annotations {
            if annotation.page() >= page_count {
                continue;
            }
            let mut page = doc
                .pages()
                .get(annotation.page() as u16)
                .map_err(|e| ScribeError::DocumentSave(e.to_string()))?;
            let page_height = page.height().value;

            match annotation {
                Annotation::Stroke(stroke) => {
                    if stroke.points.len() < 2 {
                        continue;
                    }
                    let color = stroke.color;
                    let start = stroke.points[0];
                    // Stored points use a top-left origin; PDF puts it
                    // bottom-left, so the y axis flips here.
                    let mut path = PdfPagePathObject::new(
                        &doc,
                        PdfPoints::new(start.x),
                        PdfPoints::new(page_height - start.y),
                        Some(PdfColor::new(color.0, color.1, color.2, 255)),
                        Some(PdfPoints::new(stroke.width as f32)),
                        None,
                    )
                    .map_err(|e| ScribeError::DocumentSave(e.to_string()))?;

                    for point in &stroke.points[1..] {
                        path.line_to(
                            PdfPoints::new(point.x),
                            PdfPoints::new(page_height - point.y),
                        )
                        .map_err(|e| ScribeError::DocumentSave(e.to_string()))?;
                    }

                    page.objects_mut()
                        .add_path_object(path)
                        .map_err(|e| ScribeError::DocumentSave(e.to_string()))?;
                }
                Annotation::TextLabel(label) => {
                    let color = label.color;
                    let mut text = PdfPageTextObject::new(
                        &doc,
                        &label.text,
                        font,
                        PdfPoints::new(LABEL_FONT_SIZE),
                    )
                    .map_err(|e| ScribeError::DocumentSave(e.to_string()))?;
                    text.set_fill_color(PdfColor::new(color.0, color.1, color.2, 255))
                        .map_err(|e| ScribeError::DocumentSave(e.to_string()))?;
                    text.translate(
                        PdfPoints::new(label.position.x),
                        PdfPoints::new(page_height - label.position.y),
                    )
                    .map_err(|e| ScribeError::DocumentSave(e.to_string()))?;

                    page.objects_mut()
                        .add_text_object(text)
                        .map_err(|e| ScribeError::DocumentSave(e.to_string()))?;
                }
            }
        }

        doc.save_to_file(dest)
            .map_err(|e| ScribeError::DocumentSave(e.to_string()))?;

        Ok(())
    }

    fn render_error(&self, page_num: i32, reason: &str) -> ScribeError {
        ScribeError::Render {
            page: page_num.max(0) as usize,
            reason: reason.to_string(),
        }
    }
}
