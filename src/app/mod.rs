//! Guestbook board app
//!
//! The egui app that runs on both native and WASM platforms: header, the
//! constellation backdrop, the message carousel and the submission form.

mod board;
mod constellation;
mod header;

use eframe::egui;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::collections::VecDeque;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

use crate::api::endpoint;
use crate::api_state::{ApiEvent, ApiState};
use crate::board::{Carousel, MessageForm};
use crate::config::BoardConfig;
use crate::constellation::ParticleField;
use crate::core::{MessageLog, ThemeSignal, ThemeWatcher};
use crate::theme::visuals_for;
use crate::time::{now_millis, wall_clock};

#[cfg(target_arch = "wasm32")]
use crate::api_wasm::{EventBuffer, WebApiClient};

#[cfg(not(target_arch = "wasm32"))]
use crate::api_native::NativeApiClient;

/// Idle repaint cadence while nothing animates
const IDLE_REPAINT_MS: f64 = 1000.0;

/// Guestbook board app - runs on both native and WASM
pub struct BoardApp {
    /// Animated backdrop
    pub(crate) field: ParticleField<StdRng>,
    /// Backdrop visible (mount) or hidden (unmount)
    pub(crate) show_constellation: bool,
    /// Page-wide theme flag
    pub(crate) theme: ThemeSignal,
    theme_watch: ThemeWatcher,

    pub(crate) log: MessageLog,
    pub(crate) carousel: Carousel,
    pub(crate) form: MessageForm,

    /// API state (platform-specific wrapper)
    #[cfg(target_arch = "wasm32")]
    api_state: Rc<RefCell<ApiState>>,
    /// Completed API requests, drained in update()
    #[cfg(target_arch = "wasm32")]
    api_events: EventBuffer,

    /// API client, `None` when offline
    #[cfg(target_arch = "wasm32")]
    api: Option<WebApiClient>,
    #[cfg(not(target_arch = "wasm32"))]
    api: Option<NativeApiClient>,

    /// FPS counter
    pub(crate) fps_counter: header::FpsCounter,
}

impl BoardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: BoardConfig) -> Self {
        let theme = ThemeSignal::new(config.initial_theme);
        let theme_watch = theme.watch();
        cc.egui_ctx.set_visuals(visuals_for(theme.get()));

        #[cfg(target_arch = "wasm32")]
        let (api_state, api_events, api) = {
            let api_state = Rc::new(RefCell::new(ApiState::Offline));
            let api_events: EventBuffer = Rc::new(RefCell::new(VecDeque::new()));
            let api = endpoint(&config).ok().map(|url| {
                WebApiClient::connect(
                    &url,
                    api_events.clone(),
                    api_state.clone(),
                    cc.egui_ctx.clone(),
                )
            });
            (api_state, api_events, api)
        };
        #[cfg(not(target_arch = "wasm32"))]
        let api = endpoint(&config)
            .ok()
            .map(|url| NativeApiClient::connect(&url, cc.egui_ctx.clone()));

        if api.is_none() {
            info!("Running offline, messages are kept in memory");
        }

        Self {
            field: ParticleField::new(StdRng::from_entropy()),
            show_constellation: true,
            theme,
            theme_watch,
            log: MessageLog::new(),
            carousel: Carousel::new(),
            form: MessageForm::new(),
            #[cfg(target_arch = "wasm32")]
            api_state,
            #[cfg(target_arch = "wasm32")]
            api_events,
            api,
            fps_counter: header::FpsCounter::new(),
        }
    }

    /// Get the current API state
    pub(crate) fn api_state(&self) -> ApiState {
        #[cfg(target_arch = "wasm32")]
        {
            self.api_state.borrow().clone()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.api
                .as_ref()
                .map(|client| client.state.lock().clone())
                .unwrap_or(ApiState::Offline)
        }
    }

    /// Drain completed API requests (native)
    #[cfg(not(target_arch = "wasm32"))]
    fn process_api_events(&mut self) {
        let events: Vec<ApiEvent> = match &self.api {
            Some(client) => client.rx.try_iter().collect(),
            None => return,
        };
        for event in events {
            self.apply_api_event(event);
        }
    }

    /// Drain completed API requests (WASM)
    #[cfg(target_arch = "wasm32")]
    fn process_api_events(&mut self) {
        let events: Vec<ApiEvent> = self.api_events.borrow_mut().drain(..).collect();
        for event in events {
            self.apply_api_event(event);
        }
    }

    fn apply_api_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::Loaded(messages) => self.log.replace_all(messages),
            ApiEvent::Posted(message) => self.log.push_newest(message),
        }
    }

    /// Hand the form's draft to the API, or keep it locally when offline.
    pub(crate) fn submit_message(&mut self) {
        let Some(draft) = self.form.submit() else {
            return;
        };
        match &self.api {
            Some(client) => client.post(draft),
            None => {
                let message = self.log.add_local(draft, wall_clock());
                info!(id = %message.id, "Message stored locally");
            }
        }
    }

    /// Toggle the backdrop; hiding it unmounts the field.
    pub(crate) fn set_constellation_visible(&mut self, visible: bool) {
        if self.show_constellation == visible {
            return;
        }
        self.show_constellation = visible;
        if !visible {
            self.field.unmount();
        }
    }

    /// Keep animating while something moves, otherwise wake for the next timer.
    fn schedule_repaint(&self, ctx: &egui::Context, now: f64) {
        if self.field.is_running() || self.carousel.is_sliding(now) || self.form.rating().is_resetting() {
            ctx.request_repaint();
            return;
        }
        let next = [
            self.carousel.next_deadline(),
            self.form.rating().next_deadline(),
        ]
        .into_iter()
        .flatten()
        .fold(now + IDLE_REPAINT_MS, f64::min);
        let wait = (next - now).max(0.0);
        ctx.request_repaint_after(std::time::Duration::from_secs_f64(wait / 1000.0));
    }
}

impl eframe::App for BoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = now_millis();
        self.fps_counter.tick(now);

        self.process_api_events();

        if let Some(mode) = self.theme_watch.changed() {
            ctx.set_visuals(visuals_for(mode));
            self.field.set_mode(mode);
        }

        self.carousel.sync(self.log.len(), now);
        self.carousel.poll(now);
        self.form.rating_mut().poll(now);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            self.render_header(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let rect = ui.available_rect_before_wrap();
            if self.show_constellation {
                self.render_constellation(ui, rect);
            }
            self.render_board(ui, now);
        });

        self.render_toast(ctx);
        self.schedule_repaint(ctx, now);
    }
}

impl Drop for BoardApp {
    fn drop(&mut self) {
        self.carousel.unmount();
        self.form.rating_mut().teardown();
        self.field.unmount();
    }
}
