//! WASM message API client

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::{error, info};
use wasm_bindgen_futures::spawn_local;

use crate::api::{fetch_messages, post_message};
use crate::api_state::{ApiEvent, ApiState};
use crate::core::MessageDraft;

/// Shared result buffer: request futures push, app drains in update()
pub type EventBuffer = Rc<RefCell<VecDeque<ApiEvent>>>;

/// WASM message API client
pub struct WebApiClient {
    url: Rc<str>,
    client: reqwest::Client,
    events: EventBuffer,
    state: Rc<RefCell<ApiState>>,
    ctx: egui::Context,
}

impl WebApiClient {
    /// Fetch the initial list; results land in `events`.
    pub fn connect(
        url: &str,
        events: EventBuffer,
        state: Rc<RefCell<ApiState>>,
        ctx: egui::Context,
    ) -> Self {
        *state.borrow_mut() = ApiState::Loading;
        let this = Self {
            url: Rc::from(url),
            client: reqwest::Client::new(),
            events,
            state,
            ctx,
        };

        let url = this.url.clone();
        let client = this.client.clone();
        let events = this.events.clone();
        let state = this.state.clone();
        let ctx = this.ctx.clone();
        spawn_local(async move {
            info!(url = %url, "Loading messages");
            match fetch_messages(&client, &url).await {
                Ok(messages) => {
                    info!(count = messages.len(), "Messages loaded");
                    *state.borrow_mut() = ApiState::Ready;
                    events.borrow_mut().push_back(ApiEvent::Loaded(messages));
                    ctx.request_repaint();
                }
                Err(e) => {
                    error!(error = %e, "Failed to load messages");
                    *state.borrow_mut() = ApiState::Error(e.to_string());
                }
            }
        });

        this
    }

    /// Post a draft in the background.
    pub fn post(&self, draft: MessageDraft) {
        let url = self.url.clone();
        let client = self.client.clone();
        let events = self.events.clone();
        let state = self.state.clone();
        let ctx = self.ctx.clone();
        spawn_local(async move {
            match post_message(&client, &url, &draft).await {
                Ok(message) => {
                    *state.borrow_mut() = ApiState::Ready;
                    events.borrow_mut().push_back(ApiEvent::Posted(message));
                    ctx.request_repaint();
                }
                Err(e) => {
                    error!(error = %e, "Failed to post message");
                    *state.borrow_mut() = ApiState::Error(e.to_string());
                }
            }
        });
    }
}
