//! Worker orchestration for the chess search engine.
//!
//! The search runs on a dedicated background thread so the caller's
//! event loop never blocks while the AI is thinking. Communication is a
//! small message protocol: one `go` command per turn, one reply. Tickets
//! make replies attributable so the bridge can discard stale ones.

use super::backend::SearchBackend;
use crate::games::contract::Difficulty;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Command sent to the search worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum SearchCommand {
    /// Search the given position.
    Go {
        /// Position to search, as FEN.
        fen: String,
        /// Difficulty tier forwarded to the backend.
        difficulty: Difficulty,
        /// Correlates the reply with this request.
        ticket: u64,
    },
}

/// Reply from the search worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchReply {
    /// The backend produced a move in coordinate notation.
    BestMove {
        /// Ticket of the request this answers.
        ticket: u64,
        /// Move in coordinate notation (`e2e4`, `e7e8q`).
        uci: String,
    },
    /// The backend failed for this request.
    Failed {
        /// Ticket of the request this answers.
        ticket: u64,
        /// Failure description.
        message: String,
    },
}

impl SearchReply {
    /// Returns the ticket this reply answers.
    pub fn ticket(&self) -> u64 {
        match self {
            SearchReply::BestMove { ticket, .. } | SearchReply::Failed { ticket, .. } => *ticket,
        }
    }
}

/// Error starting the worker.
#[derive(Debug, Display, Error)]
#[display("failed to start search worker: {message}")]
pub struct EngineError {
    /// OS-level failure description.
    pub message: String,
}

/// Handle to a running search worker.
///
/// Dropping the handle closes the command channel, which terminates the
/// worker thread; there is no way to cancel a search that is already
/// executing, which is why replies carry tickets.
#[derive(Debug)]
pub struct EngineHandle {
    cmd_tx: mpsc::UnboundedSender<SearchCommand>,
    reply_rx: mpsc::UnboundedReceiver<SearchReply>,
    worker: Option<std::thread::JoinHandle<()>>,
}

impl EngineHandle {
    /// Spawns the worker thread around a backend.
    #[instrument(skip(backend))]
    pub fn spawn<B: SearchBackend>(mut backend: B) -> Result<Self, EngineError> {
        let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<SearchCommand>();
        let (reply_tx, reply_rx) = mpsc::unbounded_channel::<SearchReply>();

        let worker = std::thread::Builder::new()
            .name("chess-search".into())
            .spawn(move || {
                while let Some(SearchCommand::Go {
                    fen,
                    difficulty,
                    ticket,
                }) = cmd_rx.blocking_recv()
                {
                    debug!(ticket, %difficulty, "worker received search request");
                    let reply = match backend.best_move(&fen, difficulty) {
                        Ok(uci) => SearchReply::BestMove { ticket, uci },
                        Err(e) => SearchReply::Failed {
                            ticket,
                            message: e.message,
                        },
                    };
                    if reply_tx.send(reply).is_err() {
                        // Bridge is gone; nothing left to answer.
                        break;
                    }
                }
                debug!("search worker exiting");
            })
            .map_err(|e| EngineError {
                message: e.to_string(),
            })?;

        info!("search worker started");
        Ok(Self {
            cmd_tx,
            reply_rx,
            worker: Some(worker),
        })
    }

    /// Submits a search request. Returns false if the worker has died.
    pub fn submit(&self, command: SearchCommand) -> bool {
        self.cmd_tx.send(command).is_ok()
    }

    /// Awaits the next reply. `None` means the worker has terminated.
    pub async fn recv(&mut self) -> Option<SearchReply> {
        self.reply_rx.recv().await
    }

    /// Tears the worker down and waits for the thread to finish.
    pub fn shutdown(mut self) {
        drop(self.cmd_tx);
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            warn!("search worker panicked during shutdown");
        }
    }
}
