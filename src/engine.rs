use crate::commands::PdfCommand;
use crate::pdf_engine::PdfEngine;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub struct EngineState {
    pub cmd_tx: mpsc::Sender<PdfCommand>,
}

/// Starts the engine thread and returns its command handle. pdfium
/// documents are not `Send`, so the engine owns them for its whole
/// lifetime and everything crosses the boundary as channel messages.
pub fn spawn_engine_thread() -> EngineState {
    let (cmd_tx, mut cmd_rx) = mpsc::channel(32);

    std::thread::spawn(move || {
        let pdfium = match PdfEngine::init_pdfium() {
            Ok(p) => p,
            Err(e) => {
                tracing::error!("engine init failed: {e}");
                return;
            }
        };
        let mut engine = PdfEngine::new(&pdfium);

        while let Some(cmd) = cmd_rx.blocking_recv() {
            match cmd {
                PdfCommand::Open(path, resp) => {
                    let res = engine.open_document(&path);
                    let _ = resp.blocking_send(res);
                }
                PdfCommand::Render(page, scale, resp) => {
                    let res = engine.render_page(page, scale);
                    let _ = resp.blocking_send(res);
                }
                PdfCommand::Save(dest, annotations, resp) => {
                    let res = engine
                        .save_with_annotations(&dest, &annotations)
                        .map(|()| dest);
                    let _ = resp.blocking_send(res);
                }
            }
        }
    });

    EngineState { cmd_tx }
}
