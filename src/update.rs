use crate::app::PdfScribeApp;
use crate::commands::PdfCommand;
use crate::error::ScribeError;
use crate::message::Message;
use crate::models::{DocumentState, RenderedFrame};
use crate::storage;
use iced::widget::image as iced_image;
use iced::Task;
use native_dialog::{MessageDialog, MessageType};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub fn handle_message(app: &mut PdfScribeApp, message: Message) -> Task<Message> {
    // Lazy load persisted state on first update
    if !app.loaded {
        app.loaded = true;
        app.settings = storage::load_settings();
        app.recent_files = storage::load_recent_files();
    }

    match message {
        Message::OpenDocument => {
            let cmd_tx = app.ensure_engine();
            Task::perform(
                async move {
                    let file = rfd::AsyncFileDialog::new()
                        .add_filter("PDF", &["pdf"])
                        .pick_file()
                        .await;

                    let Some(file) = file else {
                        return None;
                    };
                    let path = file.path().to_path_buf();
                    let path_s = path.to_string_lossy().to_string();
                    let (resp_tx, mut resp_rx) = mpsc::channel(1);
                    let _ = cmd_tx.send(PdfCommand::Open(path_s, resp_tx)).await;
                    Some(match resp_rx.recv().await {
                        Some(Ok(info)) => Ok((path, info)),
                        Some(Err(e)) => Err(e),
                        None => Err(ScribeError::DocumentOpen("engine unavailable".to_string())),
                    })
                },
                |result| match result {
                    Some(r) => Message::DocumentOpened(r),
                    None => Message::DialogCancelled,
                },
            )
        }
        Message::OpenRecentFile(file) => {
            let path = PathBuf::from(&file.path);
            if path.exists() {
                return app.open_path(path);
            }
            app.recent_files.retain(|f| f.path != file.path);
            storage::save_recent_files(&app.recent_files);
            app.status_message = Some(format!("{} no longer exists", file.name));
            Task::none()
        }
        Message::DocumentOpened(Ok((path, info))) => {
            app.add_recent_file(&path);
            let doc = DocumentState::new(path, info.page_count, info.page_sizes, &app.settings);
            app.status_message = Some(format!("Opened {} ({} pages)", doc.name, doc.page_count));
            app.page_input = "1".to_string();
            app.doc = Some(doc);
            app.render_current_page()
        }
        Message::DocumentOpened(Err(e)) => {
            // The previous document, if any, stays active untouched.
            tracing::error!("open failed: {e}");
            report_error("Open failed", &e);
            Task::none()
        }
        Message::SaveDocument => {
            let Some(doc) = &app.doc else {
                return Task::none();
            };
            let Some(engine) = &app.engine else {
                return Task::none();
            };

            let annotations: Vec<_> = doc.store.iter().cloned().collect();
            let default_name = format!(
                "{}-annotated.pdf",
                doc.path
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_else(|| "document".to_string())
            );
            let cmd_tx = engine.cmd_tx.clone();
            Task::perform(
                async move {
                    let file = rfd::AsyncFileDialog::new()
                        .add_filter("PDF", &["pdf"])
                        .set_file_name(default_name)
                        .save_file()
                        .await;

                    let Some(file) = file else {
                        return None;
                    };
                    let dest = file.path().to_string_lossy().to_string();
                    let (resp_tx, mut resp_rx) = mpsc::channel(1);
                    let _ = cmd_tx
                        .send(PdfCommand::Save(dest, annotations, resp_tx))
                        .await;
                    Some(match resp_rx.recv().await {
                        Some(r) => r,
                        None => Err(ScribeError::DocumentSave("engine unavailable".to_string())),
                    })
                },
                |result| match result {
                    Some(r) => Message::DocumentSaved(r),
                    None => Message::DialogCancelled,
                },
            )
        }
        Message::DocumentSaved(Ok(dest)) => {
            app.status_message = Some(format!("Saved to {dest}"));
            Task::none()
        }
        Message::DocumentSaved(Err(e)) => {
            tracing::error!("save failed: {e}");
            report_error("Save failed", &e);
            app.status_message = Some(e.to_string());
            Task::none()
        }
        Message::DialogCancelled => Task::none(),
        Message::PageRendered(Ok(rendered)) => {
            if let Some(doc) = &mut app.doc {
                // Replies for a page we have since navigated away from
                // are dropped; same-page replies at an older zoom are
                // fine because the frame carries its own scale.
                if rendered.page == doc.view.current_page {
                    doc.rendered = Some(RenderedFrame {
                        scale: rendered.scale,
                        width: rendered.width,
                        height: rendered.height,
                        handle: iced_image::Handle::from_rgba(
                            rendered.width,
                            rendered.height,
                            rendered.pixels.as_ref().clone(),
                        ),
                    });
                    doc.render_error = None;
                }
            }
            Task::none()
        }
        Message::PageRendered(Err(e)) => {
            tracing::error!("render failed: {e}");
            if let Some(doc) = &mut app.doc {
                doc.render_error = Some(e.to_string());
            }
            Task::none()
        }
        Message::NextPage => {
            let Some(doc) = &mut app.doc else {
                return Task::none();
            };
            doc.controller.finish(&mut doc.store);
            if doc.view.next_page(doc.page_count) {
                app.page_input = (doc.view.current_page + 1).to_string();
                return app.render_current_page();
            }
            Task::none()
        }
        Message::PrevPage => {
            let Some(doc) = &mut app.doc else {
                return Task::none();
            };
            doc.controller.finish(&mut doc.store);
            if doc.view.prev_page(doc.page_count) {
                app.page_input = (doc.view.current_page + 1).to_string();
                return app.render_current_page();
            }
            Task::none()
        }
        Message::PageInputChanged(value) => {
            app.page_input = value;
            Task::none()
        }
        Message::PageInputSubmitted => {
            let Some(doc) = &mut app.doc else {
                return Task::none();
            };
            if let Ok(n) = app.page_input.trim().parse::<usize>() {
                if n >= 1 {
                    doc.controller.finish(&mut doc.store);
                    if doc.view.jump_to_page(n - 1, doc.page_count) {
                        app.page_input = (doc.view.current_page + 1).to_string();
                        return app.render_current_page();
                    }
                }
            }
            app.page_input = (doc.view.current_page + 1).to_string();
            Task::none()
        }
        Message::ZoomIn => {
            let Some(doc) = &mut app.doc else {
                return Task::none();
            };
            doc.controller.finish(&mut doc.store);
            doc.view.zoom_in();
            app.render_current_page()
        }
        Message::ZoomOut => {
            let Some(doc) = &mut app.doc else {
                return Task::none();
            };
            doc.controller.finish(&mut doc.store);
            doc.view.zoom_out();
            app.render_current_page()
        }
        Message::ResetView => {
            let Some(doc) = &mut app.doc else {
                return Task::none();
            };
            doc.controller.finish(&mut doc.store);
            doc.view.reset_view();
            app.render_current_page()
        }
        Message::SelectTool(tool) => {
            if let Some(doc) = &mut app.doc {
                if doc.view.tool != tool {
                    doc.controller.finish(&mut doc.store);
                    doc.view.tool = tool;
                }
            }
            Task::none()
        }
        Message::SetPenColor(color) => {
            if let Some(doc) = &mut app.doc {
                doc.view.pen_color = color;
                app.settings.pen_color = color;
                storage::save_settings(&app.settings);
            }
            Task::none()
        }
        Message::PenWidthUp => {
            if let Some(doc) = &mut app.doc {
                doc.view.pen_width_up();
                app.settings.pen_width = doc.view.pen_width;
                storage::save_settings(&app.settings);
            }
            Task::none()
        }
        Message::PenWidthDown => {
            if let Some(doc) = &mut app.doc {
                doc.view.pen_width_down();
                app.settings.pen_width = doc.view.pen_width;
                storage::save_settings(&app.settings);
            }
            Task::none()
        }
        Message::PendingTextChanged(value) => {
            if let Some(doc) = &mut app.doc {
                doc.pending_text = value;
            }
            Task::none()
        }
        Message::PointerMoved(position, widget_size) => {
            if let Some(doc) = &mut app.doc {
                doc.cursor = Some(position);
                doc.widget_size = widget_size;
                if let Some(geom) = doc.geometry() {
                    doc.controller
                        .on_pointer_move(position, &mut doc.view, &geom, &mut doc.store);
                }
            }
            Task::none()
        }
        Message::PointerPressed => {
            if let Some(doc) = &mut app.doc {
                if let (Some(cursor), Some(geom)) = (doc.cursor, doc.geometry()) {
                    let placed = doc.controller.on_pointer_down(
                        cursor,
                        &mut doc.view,
                        &geom,
                        &doc.pending_text,
                        &mut doc.store,
                    );
                    if placed {
                        doc.pending_text.clear();
                    }
                }
            }
            Task::none()
        }
        Message::PointerReleased => {
            if let Some(doc) = &mut app.doc {
                doc.controller.finish(&mut doc.store);
            }
            Task::none()
        }
        Message::PointerExited => {
            // Pointer-up may never arrive; keep what was captured.
            if let Some(doc) = &mut app.doc {
                doc.controller.finish(&mut doc.store);
                doc.cursor = None;
            }
            Task::none()
        }
        Message::ClearPageAnnotations => {
            if let Some(doc) = &mut app.doc {
                doc.controller.finish(&mut doc.store);
                doc.store.clear_page(doc.view.current_page);
            }
            Task::none()
        }
        Message::ClearRecentFiles => {
            app.recent_files.clear();
            storage::save_recent_files(&app.recent_files);
            Task::none()
        }
        Message::ClearStatus => {
            app.status_message = None;
            Task::none()
        }
    }
}

fn report_error(title: &str, error: &ScribeError) {
    let _ = MessageDialog::new()
        .set_type(MessageType::Error)
        .set_title(title)
        .set_text(&error.to_string())
        .show_alert();
}
