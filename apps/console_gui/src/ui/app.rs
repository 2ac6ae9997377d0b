use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        events::UiEvent,
        orchestration::dispatch_backend_command,
        reducer::{ConsoleController, Page},
    },
    preferences::ThemePreference,
    ui::{panels, theme::visuals_for_theme},
};

const IDLE_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

pub struct ConsoleApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: ConsoleController,
    applied_theme: Option<ThemePreference>,
}

impl ConsoleApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        mut controller: ConsoleController,
    ) -> Self {
        controller.startup();
        let mut app = Self {
            cmd_tx,
            ui_rx,
            controller,
            applied_theme: None,
        };
        app.flush_commands();
        app
    }

    fn process_ui_events(&mut self) {
        let now = Instant::now();
        while let Ok(event) = self.ui_rx.try_recv() {
            self.controller.handle_event(event, now);
        }
        self.controller.tick(now);
    }

    fn flush_commands(&mut self) {
        for cmd in self.controller.take_commands() {
            if let Err(failure) = dispatch_backend_command(&self.cmd_tx, cmd) {
                self.controller.record_dispatch_failure(failure);
            }
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        let theme = self.controller.theme();
        if self.applied_theme == Some(theme) {
            return;
        }
        ctx.set_visuals(visuals_for_theme(theme));
        self.applied_theme = Some(theme);
    }

    /// Drops only stage a file while the create page is showing.
    fn accept_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw
                    .dropped_files
                    .iter()
                    .filter_map(|file| file.path.clone())
                    .last(),
            )
        });
        if self.controller.page() != Page::Create {
            return false;
        }
        if let Some(path) = dropped {
            self.controller.stage_path(&path, Instant::now());
        }
        hovering
    }
}

impl eframe::App for ConsoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_theme_if_needed(ctx);
        let drag_hover = self.accept_dropped_files(ctx);

        egui::TopBottomPanel::top("console_top_bar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                panels::show_top_bar(ui, &mut self.controller);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            panels::show_status_banner(ui, &mut self.controller);
            match self.controller.page() {
                Page::Create => panels::show_create_page(ui, &mut self.controller, drag_hover),
                Page::Dashboard => panels::show_dashboard_page(ui, &mut self.controller),
                Page::Review => panels::show_review_page(ui, &mut self.controller),
                Page::Reply => panels::show_reply_page(ui, &mut self.controller),
            }
        });

        panels::show_notification(ctx, &mut self.controller);
        self.flush_commands();

        ctx.request_repaint_after(IDLE_REPAINT_INTERVAL);
    }
}
