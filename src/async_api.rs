//! Async editing facade backed by a dedicated worker thread.
//!
//! The worker thread owns a synchronous `Session` and executes commands
//! sent from async tasks, so the single-writer turn-taking of the
//! session is preserved while callers use an async interface. Exports
//! are single-shot deferred computations: the command is queued when
//! the method is called and the returned future may be dropped without
//! losing the artifact — completion is signaled by the file appearing.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::mpsc::{self, Sender};
use std::task::{Context, Poll};
use std::thread;

use tokio::sync::oneshot;

use crate::error::{Error, Result};
use crate::export;
use crate::model::{ItemEdit, Quote, QuoteField};
use crate::rendering::Screenshot;
use crate::session::Session;
use crate::RenderConfig;

enum Command {
    AddItem(oneshot::Sender<Result<()>>),
    EditItem(usize, ItemEdit, oneshot::Sender<Result<()>>),
    RemoveItem(usize, oneshot::Sender<Result<()>>),
    SetField(QuoteField, String, oneshot::Sender<Result<()>>),
    SetLaborCharge(f64, oneshot::Sender<Result<()>>),
    Mount(oneshot::Sender<Result<()>>),
    Snapshot(oneshot::Sender<Result<Quote>>),
    Capture(oneshot::Sender<Result<Option<Screenshot>>>),
    #[cfg(feature = "pdf")]
    ExportPdf(oneshot::Sender<Result<Option<PathBuf>>>),
    ExportPng(oneshot::Sender<Result<Option<PathBuf>>>),
    Close(oneshot::Sender<Result<()>>),
}

/// An async handle to an editing session running on a worker thread.
#[derive(Clone)]
pub struct Editor {
    cmd_tx: Sender<Command>,
}

/// Future for a queued export. The export runs whether or not this is
/// awaited; awaiting yields the artifact path (`None` when the render
/// surface was not mounted).
pub struct PendingExport {
    rx: oneshot::Receiver<Result<Option<PathBuf>>>,
}

impl Future for PendingExport {
    type Output = Result<Option<PathBuf>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(res)) => Poll::Ready(res),
            Poll::Ready(Err(e)) => {
                Poll::Ready(Err(Error::Other(format!("Export canceled: {}", e))))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Editor {
    /// Create a new editor (spawns a background thread that owns the
    /// session).
    pub async fn new(config: Option<RenderConfig>) -> Result<Self> {
        let config = config.unwrap_or_default();

        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx): (oneshot::Sender<Result<()>>, oneshot::Receiver<Result<()>>) =
            oneshot::channel();

        thread::spawn(move || {
            // Initialize the session on the worker thread
            let mut session = match Session::new(config) {
                Ok(s) => s,
                Err(err) => {
                    let _ = init_tx.send(Err(err));
                    return;
                }
            };

            let _ = init_tx.send(Ok(()));

            // Command loop: strict turn-taking, one command at a time
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::AddItem(resp) => {
                        session.add_item();
                        let _ = resp.send(Ok(()));
                    }
                    Command::EditItem(index, edit, resp) => {
                        let _ = resp.send(session.edit_item(index, edit));
                    }
                    Command::RemoveItem(index, resp) => {
                        let _ = resp.send(session.remove_item(index));
                    }
                    Command::SetField(field, value, resp) => {
                        session.set_field(field, value);
                        let _ = resp.send(Ok(()));
                    }
                    Command::SetLaborCharge(amount, resp) => {
                        session.set_labor_charge(amount);
                        let _ = resp.send(Ok(()));
                    }
                    Command::Mount(resp) => {
                        session.mount();
                        let _ = resp.send(Ok(()));
                    }
                    Command::Snapshot(resp) => {
                        let _ = resp.send(Ok(session.quote().clone()));
                    }
                    Command::Capture(resp) => {
                        let _ = resp.send(session.capture());
                    }
                    #[cfg(feature = "pdf")]
                    Command::ExportPdf(resp) => {
                        let _ = resp.send(export::pdf::export_pdf(&session));
                    }
                    Command::ExportPng(resp) => {
                        let _ = resp.send(export::png::export_png(&session));
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(Ok(()));
                        break;
                    }
                }
            }
        });

        // Wait for the worker to report initialization success or failure
        let init_res = init_rx
            .await
            .map_err(|e| Error::Other(format!("Worker init canceled: {}", e)))?;
        init_res?;

        Ok(Self { cmd_tx })
    }

    /// Append a new line item with default values.
    pub async fn add_item(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::AddItem(tx));
        rx.await
            .map_err(|e| Error::Other(format!("AddItem canceled: {}", e)))?
    }

    /// Replace one field of the item at `index`.
    pub async fn edit_item(&self, index: usize, edit: ItemEdit) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::EditItem(index, edit, tx));
        rx.await
            .map_err(|e| Error::Other(format!("EditItem canceled: {}", e)))?
    }

    /// Delete the item at `index`.
    pub async fn remove_item(&self, index: usize) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::RemoveItem(index, tx));
        rx.await
            .map_err(|e| Error::Other(format!("RemoveItem canceled: {}", e)))?
    }

    /// Set a text-valued quote field.
    pub async fn set_field(&self, field: QuoteField, value: impl Into<String>) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self
            .cmd_tx
            .send(Command::SetField(field, value.into(), tx));
        rx.await
            .map_err(|e| Error::Other(format!("SetField canceled: {}", e)))?
    }

    /// Set the flat labor/service charge.
    pub async fn set_labor_charge(&self, amount: f64) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::SetLaborCharge(amount, tx));
        rx.await
            .map_err(|e| Error::Other(format!("SetLaborCharge canceled: {}", e)))?
    }

    /// Attach the render surface; exports before this are no-ops.
    pub async fn mount(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Mount(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Mount canceled: {}", e)))?
    }

    /// Get a snapshot of the current quote state (for previews).
    pub async fn quote(&self) -> Result<Quote> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Snapshot(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Snapshot canceled: {}", e)))?
    }

    /// Capture the rendered document as a PNG screenshot.
    pub async fn capture(&self) -> Result<Option<Screenshot>> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Capture(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Capture canceled: {}", e)))?
    }

    /// Queue a PDF export of the current render. Fire-and-forget: the
    /// returned future may be dropped.
    #[cfg(feature = "pdf")]
    pub fn export_pdf(&self) -> PendingExport {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::ExportPdf(tx));
        PendingExport { rx }
    }

    /// Queue a PNG export of the current render. Fire-and-forget: the
    /// returned future may be dropped.
    pub fn export_png(&self) -> PendingExport {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::ExportPng(tx));
        PendingExport { rx }
    }

    /// Shut down the background worker.
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Close(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Close canceled: {}", e)))?
    }
}
