//! Native message API client
//!
//! Runs reqwest on a tokio runtime in a background thread. Drafts go in over
//! a tokio channel, results come back over `std::sync::mpsc`.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{error, info, warn};

use crate::api::{fetch_messages, post_message};
use crate::api_state::{ApiEvent, ApiState};
use crate::core::MessageDraft;

/// Message API client backed by a background thread
pub struct NativeApiClient {
    /// Completed requests
    pub rx: Receiver<ApiEvent>,
    /// Shared request state
    pub state: Arc<Mutex<ApiState>>,
    drafts: UnboundedSender<MessageDraft>,
}

impl NativeApiClient {
    /// Start the worker and fetch the initial list.
    ///
    /// `ctx` is woken whenever a result lands so idle frames still pick it up.
    pub fn connect(url: &str, ctx: egui::Context) -> Self {
        let (tx, rx): (Sender<ApiEvent>, Receiver<ApiEvent>) = mpsc::channel();
        let (drafts, draft_rx) = unbounded_channel();
        let state = Arc::new(Mutex::new(ApiState::Loading));

        let url = url.to_string();
        let state_clone = state.clone();

        std::thread::spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    error!(error = %e, "Failed to create tokio runtime");
                    *state_clone.lock() = ApiState::Error(e.to_string());
                    return;
                }
            };
            rt.block_on(async move {
                Self::run(&url, tx, draft_rx, state_clone, ctx).await;
            });
        });

        Self { rx, state, drafts }
    }

    /// Queue a draft for posting.
    pub fn post(&self, draft: MessageDraft) {
        if self.drafts.send(draft).is_err() {
            warn!("Message API worker is gone, draft dropped");
            *self.state.lock() = ApiState::Error("worker stopped".into());
        }
    }

    async fn run(
        url: &str,
        tx: Sender<ApiEvent>,
        mut drafts: UnboundedReceiver<MessageDraft>,
        state: Arc<Mutex<ApiState>>,
        ctx: egui::Context,
    ) {
        let client = reqwest::Client::new();
        info!(url, "Loading messages");

        match fetch_messages(&client, url).await {
            Ok(messages) => {
                info!(count = messages.len(), "Messages loaded");
                *state.lock() = ApiState::Ready;
                if tx.send(ApiEvent::Loaded(messages)).is_err() {
                    return;
                }
                ctx.request_repaint();
            }
            Err(e) => {
                error!(error = %e, "Failed to load messages");
                *state.lock() = ApiState::Error(e.to_string());
            }
        }

        while let Some(draft) = drafts.recv().await {
            match post_message(&client, url, &draft).await {
                Ok(message) => {
                    *state.lock() = ApiState::Ready;
                    if tx.send(ApiEvent::Posted(message)).is_err() {
                        // UI gone
                        break;
                    }
                    ctx.request_repaint();
                }
                Err(e) => {
                    error!(error = %e, "Failed to post message");
                    *state.lock() = ApiState::Error(e.to_string());
                }
            }
        }

        warn!("Message API worker stopped");
    }
}
