use crate::commands::PdfCommand;
use crate::engine::{spawn_engine_thread, EngineState};
use crate::error::ScribeError;
use crate::message::Message;
use crate::models::{AppSettings, DocumentState, RecentFile};
use crate::ui;
use crate::update::handle_message;
use iced::{Element, Task};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

#[derive(Default)]
pub struct PdfScribeApp {
    pub doc: Option<DocumentState>,
    pub settings: AppSettings,
    pub recent_files: Vec<RecentFile>,
    pub page_input: String,
    pub status_message: Option<String>,
    pub engine: Option<EngineState>,
    pub loaded: bool,
}

impl PdfScribeApp {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        handle_message(self, message)
    }

    pub fn view(&self) -> Element<'_, Message> {
        ui::view(self)
    }

    /// The engine thread starts on first use, not at program startup.
    /// A failed engine init leaves a closed channel behind; that handle
    /// is dropped and a fresh thread spawned on the next use.
    pub fn ensure_engine(&mut self) -> mpsc::Sender<PdfCommand> {
        if self.engine.as_ref().is_some_and(|e| e.cmd_tx.is_closed()) {
            self.engine = None;
        }
        self.engine
            .get_or_insert_with(spawn_engine_thread)
            .cmd_tx
            .clone()
    }

    pub fn add_recent_file(&mut self, path: &Path) {
        crate::storage::add_recent_file(&mut self.recent_files, path);
        crate::storage::save_recent_files(&self.recent_files);
    }

    /// Asks the engine for the current page at the current zoom. The
    /// reply lands back in the update loop as `PageRendered`.
    pub fn render_current_page(&self) -> Task<Message> {
        let Some(doc) = &self.doc else {
            return Task::none();
        };
        let Some(engine) = &self.engine else {
            return Task::none();
        };

        let page = doc.view.current_page as i32;
        let scale = doc.view.scale;
        let cmd_tx = engine.cmd_tx.clone();
        Task::perform(
            async move {
                let (resp_tx, mut resp_rx) = mpsc::channel(1);
                let _ = cmd_tx.send(PdfCommand::Render(page, scale, resp_tx)).await;
                resp_rx.recv().await.unwrap_or(Err(ScribeError::Render {
                    page: page.max(0) as usize,
                    reason: "engine channel closed".to_string(),
                }))
            },
            Message::PageRendered,
        )
    }

    /// Opens `path` through the engine, no dialog involved. Used by the
    /// recent-files list.
    pub fn open_path(&mut self, path: PathBuf) -> Task<Message> {
        let cmd_tx = self.ensure_engine();
        let path_s = path.to_string_lossy().to_string();
        Task::perform(
            async move {
                let (resp_tx, mut resp_rx) = mpsc::channel(1);
                let _ = cmd_tx.send(PdfCommand::Open(path_s, resp_tx)).await;
                match resp_rx.recv().await {
                    Some(Ok(info)) => Ok((path, info)),
                    Some(Err(e)) => Err(e),
                    None => Err(ScribeError::DocumentOpen("engine unavailable".to_string())),
                }
            },
            Message::DocumentOpened,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineState;

    #[test]
    fn test_dead_engine_is_respawned_on_next_use() {
        let (cmd_tx, cmd_rx) = mpsc::channel(1);
        drop(cmd_rx);
        let mut app = PdfScribeApp {
            engine: Some(EngineState {
                cmd_tx: cmd_tx.clone(),
            }),
            ..PdfScribeApp::default()
        };

        let fresh = app.ensure_engine();
        assert!(!fresh.same_channel(&cmd_tx));
    }

    #[test]
    fn test_live_engine_is_reused() {
        let (cmd_tx, _cmd_rx) = mpsc::channel(1);
        let mut app = PdfScribeApp {
            engine: Some(EngineState {
                cmd_tx: cmd_tx.clone(),
            }),
            ..PdfScribeApp::default()
        };

        let handle = app.ensure_engine();
        assert!(handle.same_channel(&cmd_tx));
    }
}
