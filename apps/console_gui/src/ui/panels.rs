//! Page renderers. They only read controller state and forward user actions
//! back to the controller; no backend work starts here.

use eframe::egui;
use shared::domain::{CampaignId, ReviewAction, RowId};

use crate::{
    controller::{
        dashboard::PLACEHOLDER_DASH,
        manual_reply::NO_SENT_ROWS_MESSAGE,
        reducer::{ConsoleController, Page, StatusBannerSeverity},
        registry::{SelectOption, SelectionTarget},
    },
    ui::theme::{connectivity_color, notification_colors, status_color},
};

pub fn show_top_bar(ui: &mut egui::Ui, controller: &mut ConsoleController) {
    ui.horizontal(|ui| {
        ui.heading("SentinalGrid");
        ui.separator();
        for page in Page::ALL {
            if ui
                .add(egui::Button::new(page.title()).selected(controller.page() == page))
                .clicked()
            {
                controller.navigate(page);
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button(controller.theme().toggle_label()).clicked() {
                controller.toggle_theme();
            }
            ui.separator();
            let indicator = controller.health().indicator();
            ui.label(indicator.label());
            ui.label(egui::RichText::new("\u{25CF}").color(connectivity_color(indicator)));
            ui.separator();
            model_selector(ui, controller);
        });
    });
}

fn model_selector(ui: &mut egui::Ui, controller: &mut ConsoleController) {
    let models = controller.models();
    if models.can_retry() && ui.small_button("Retry").clicked() {
        controller.reload_models();
        return;
    }
    if models.is_loading() || models.is_switching() {
        ui.spinner();
    }

    let available = models.available().to_vec();
    let current = models.current().map(str::to_string);
    let mut picked: Option<String> = None;
    ui.add_enabled_ui(models.enabled(), |ui| {
        egui::ComboBox::from_id_salt("model_selector")
            .width(180.0)
            .selected_text(models.selected_label().to_string())
            .show_ui(ui, |ui| {
                for model in &available {
                    let is_current = current.as_deref() == Some(model.as_str());
                    if ui
                        .add(egui::Button::new(model.as_str()).selected(is_current))
                        .clicked()
                    {
                        picked = Some(model.clone());
                    }
                }
            });
    });
    ui.label("AI model");

    if let Some(model) = picked {
        controller.select_model(&model);
    }
}

pub fn show_status_banner(ui: &mut egui::Ui, controller: &mut ConsoleController) {
    let Some(banner) = controller.status_banner().cloned() else {
        return;
    };
    let (fill, stroke) = match banner.severity {
        StatusBannerSeverity::Error => (
            egui::Color32::from_rgb(111, 53, 53),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
        ),
    };

    egui::Frame::NONE
        .fill(fill)
        .stroke(stroke)
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Dismiss").clicked() {
                        controller.dismiss_status_banner();
                    }
                });
            });
        });
}

pub fn show_create_page(ui: &mut egui::Ui, controller: &mut ConsoleController, drag_hover: bool) {
    ui.heading(Page::Create.title());
    ui.add_space(8.0);

    egui::Grid::new("create_form")
        .num_columns(2)
        .spacing(egui::vec2(12.0, 8.0))
        .show(ui, |ui| {
            ui.label("Campaign name");
            ui.add(
                egui::TextEdit::singleline(&mut controller.form_mut().name)
                    .hint_text("e.g. Fall Promo")
                    .desired_width(360.0),
            );
            ui.end_row();

            ui.label("Master prompt");
            ui.add(
                egui::TextEdit::multiline(&mut controller.form_mut().master_prompt)
                    .desired_rows(6)
                    .desired_width(360.0),
            );
            ui.end_row();
        });

    ui.add_space(8.0);
    let stroke_color = if drag_hover {
        ui.visuals().selection.bg_fill
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke.color
    };
    let mut browse = false;
    egui::Frame::NONE
        .stroke(egui::Stroke::new(1.5, stroke_color))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(16, 20))
        .show(ui, |ui| {
            ui.set_min_width(360.0);
            ui.vertical_centered(|ui| {
                ui.label(controller.stager().description());
                ui.horizontal(|ui| {
                    browse = ui.button("Browse...").clicked();
                    if controller.stager().current_file().is_some() && ui.button("Clear").clicked() {
                        controller.clear_staged_file();
                    }
                });
            });
        });

    if browse {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Spreadsheets", &["csv", "xlsx", "xls"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            controller.stage_path(&path, std::time::Instant::now());
        }
    }

    ui.add_space(12.0);
    let creator = controller.creator();
    let label = creator.button_label();
    if ui
        .add_enabled(creator.button_enabled(), egui::Button::new(label))
        .clicked()
    {
        controller.submit_create();
    }
}

/// Renders a selection control. Returns the campaign the user picked, if any.
fn campaign_picker(
    ui: &mut egui::Ui,
    id_salt: &str,
    controller: &ConsoleController,
    target: SelectionTarget,
) -> Option<CampaignId> {
    let registry = controller.registry();
    let control = registry.control(target);
    let options: Vec<SelectOption> = control.options().to_vec();
    let selected = control.selected();
    let mut picked = None;
    egui::ComboBox::from_id_salt(id_salt)
        .width(320.0)
        .selected_text(control.selected_label().to_string())
        .show_ui(ui, |ui| {
            for option in &options {
                let is_selected = option.value.is_some() && option.value == selected;
                let response = ui.add_enabled(
                    option.enabled,
                    egui::Button::new(option.label.as_str()).selected(is_selected),
                );
                if response.clicked() {
                    picked = option.value;
                }
            }
        });
    if registry.is_loading() {
        ui.spinner();
        ui.weak("Loading campaigns...");
    }
    picked
}

pub fn show_dashboard_page(ui: &mut egui::Ui, controller: &mut ConsoleController) {
    ui.heading(Page::Dashboard.title());
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        if let Some(campaign_id) =
            campaign_picker(ui, "dashboard_campaign", controller, SelectionTarget::Dashboard)
        {
            controller.select_dashboard(campaign_id);
        }
        let refreshing = controller.dashboard().is_refreshing();
        if ui
            .add_enabled(
                !refreshing,
                egui::Button::new(controller.dashboard().refresh_label()),
            )
            .clicked()
        {
            controller.refresh_dashboard();
        }
    });
    ui.add_space(8.0);

    let Some(view) = controller.dashboard().view().cloned() else {
        ui.label("Select a campaign to view its progress.");
        return;
    };

    ui.horizontal(|ui| {
        ui.strong(view.campaign_name.as_deref().unwrap_or(PLACEHOLDER_DASH));
        ui.label(format!("(ID: {})", view.campaign_id));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(view.launch.enabled(), egui::Button::new(view.launch.label()))
                .clicked()
            {
                controller.launch();
            }
        });
    });

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        for (label, value) in [
            ("Total", view.stats.total),
            ("Pending", view.stats.pending),
            ("Sent", view.stats.sent),
            ("Replied", view.stats.replied),
            ("Review", view.stats.review),
        ] {
            egui::Frame::NONE
                .fill(ui.visuals().faint_bg_color)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(14, 10))
                .show(ui, |ui| {
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(value.to_string()).size(22.0).strong());
                        ui.label(label);
                    });
                });
        }
    });

    ui.add_space(10.0);
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new("dashboard_rows")
                .striped(true)
                .num_columns(5)
                .spacing(egui::vec2(16.0, 6.0))
                .show(ui, |ui| {
                    for header in ["Row", "Channel", "Contact", "Status", "Message"] {
                        ui.strong(header);
                    }
                    ui.end_row();

                    for row in &view.rows {
                        ui.label(row.row_index.to_string());
                        ui.label(&row.channel);
                        ui.label(&row.contact);
                        ui.label(
                            egui::RichText::new(&row.status).color(status_color(&row.status_class)),
                        );
                        ui.label(&row.preview);
                        ui.end_row();
                    }
                });
        });
}

pub fn show_review_page(ui: &mut egui::Ui, controller: &mut ConsoleController) {
    ui.heading(Page::Review.title());
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        if let Some(campaign_id) =
            campaign_picker(ui, "review_campaign", controller, SelectionTarget::Review)
        {
            controller.select_review(campaign_id);
        }
        if ui
            .add_enabled(
                controller.review().campaign_id().is_some() && !controller.review().is_loading(),
                egui::Button::new("Reload"),
            )
            .clicked()
        {
            controller.refresh_review();
        }
    });
    ui.add_space(8.0);

    if let Some(summary) = controller.review().summary() {
        ui.label(summary);
    } else if controller.review().campaign_id().is_none() {
        ui.label("Select a campaign to review flagged replies.");
        return;
    }

    let rows = controller.review().rows().map(<[_]>::to_vec).unwrap_or_default();
    let mut decision: Option<(RowId, ReviewAction)> = None;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for row in &rows {
                egui::Frame::NONE
                    .fill(ui.visuals().faint_bg_color)
                    .corner_radius(8.0)
                    .inner_margin(egui::Margin::symmetric(12, 10))
                    .show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.strong(format!("Row {}", row.row_index));
                            ui.label(&row.channel);
                            ui.label(&row.contact);
                            ui.label(format!("Confidence: {}", row.confidence));
                        });
                        ui.label("Original data:");
                        ui.monospace(&row.original_data);
                        ui.label(format!("Sent: {}", row.outbound_message));
                        ui.label(format!("Reply: {}", row.reply_text));
                        ui.label("Suggested update:");
                        ui.monospace(&row.suggested_update);
                        let busy = controller.review().is_deciding(row.row_id);
                        ui.horizontal(|ui| {
                            if ui.add_enabled(!busy, egui::Button::new("Approve")).clicked() {
                                decision = Some((row.row_id, ReviewAction::Approve));
                            }
                            if ui.add_enabled(!busy, egui::Button::new("Reject")).clicked() {
                                decision = Some((row.row_id, ReviewAction::Reject));
                            }
                        });
                    });
                ui.add_space(6.0);
            }
        });

    if let Some((row_id, action)) = decision {
        controller.decide_review(row_id, action);
    }
}

pub fn show_reply_page(ui: &mut egui::Ui, controller: &mut ConsoleController) {
    ui.heading(Page::Reply.title());
    ui.label("Paste a reply from a recipient to process it as an inbound message.");
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        if let Some(campaign_id) =
            campaign_picker(ui, "reply_campaign", controller, SelectionTarget::Reply)
        {
            controller.select_reply(campaign_id);
        }
        if ui
            .add_enabled(
                controller.reply().campaign_id().is_some() && !controller.reply().is_loading(),
                egui::Button::new("Reload"),
            )
            .clicked()
        {
            controller.refresh_reply();
        }
    });
    ui.add_space(8.0);

    let Some(candidates) = controller.reply().candidates().map(<[_]>::to_vec) else {
        if controller.reply().campaign_id().is_none() {
            ui.label("Select a campaign to enter a reply.");
        }
        return;
    };
    if candidates.is_empty() {
        ui.label(NO_SENT_ROWS_MESSAGE);
        return;
    }

    let selected = controller.reply().selected().cloned();
    let mut picked_row: Option<RowId> = None;
    egui::ComboBox::from_id_salt("reply_row")
        .width(320.0)
        .selected_text(
            selected
                .as_ref()
                .map(|candidate| candidate.label.clone())
                .unwrap_or_else(|| "Select a row...".to_string()),
        )
        .show_ui(ui, |ui| {
            for candidate in &candidates {
                let is_selected = selected
                    .as_ref()
                    .is_some_and(|current| current.row_id == candidate.row_id);
                if ui
                    .add(egui::Button::new(candidate.label.as_str()).selected(is_selected))
                    .clicked()
                {
                    picked_row = Some(candidate.row_id);
                }
            }
        });
    if let Some(row_id) = picked_row {
        controller.select_reply_row(row_id);
    }

    if let Some(candidate) = controller.reply().selected().cloned() {
        ui.add_space(6.0);
        ui.strong("Message that was sent:");
        ui.label(&candidate.outbound_message);
    }

    ui.add_space(6.0);
    ui.label("Paste the reply:");
    ui.add(
        egui::TextEdit::multiline(controller.reply_text_mut())
            .desired_rows(4)
            .desired_width(f32::INFINITY),
    );

    let reply = controller.reply();
    if ui
        .add_enabled(reply.button_enabled(), egui::Button::new(reply.button_label()))
        .clicked()
    {
        controller.submit_manual_reply(std::time::Instant::now());
    }

    if let Some(outcome) = controller.reply().outcome().cloned() {
        ui.add_space(10.0);
        egui::Frame::NONE
            .fill(ui.visuals().faint_bg_color)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(12, 10))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label("Intent:");
                    ui.monospace(&outcome.intent);
                    ui.separator();
                    ui.label("Confidence:");
                    ui.monospace(&outcome.confidence);
                });
                let note_color = if outcome.needs_review {
                    ui.visuals().warn_fg_color
                } else {
                    ui.visuals().text_color()
                };
                ui.label(egui::RichText::new(outcome.review_note()).color(note_color));
                ui.label("Suggested update:");
                ui.monospace(&outcome.suggested_update);
            });
    }
}

pub fn show_notification(ctx: &egui::Context, controller: &mut ConsoleController) {
    let Some(notification) = controller.notifier().visible().cloned() else {
        return;
    };
    let (fill, stroke) = notification_colors(notification.kind);
    egui::Area::new(egui::Id::new("notification_toast"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
        .show(ctx, |ui| {
            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(14, 10))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(&notification.message).color(egui::Color32::WHITE),
                        );
                        if ui.small_button("\u{2715}").clicked() {
                            controller.dismiss_notification();
                        }
                    });
                });
        });
}
