//! Main application UI and state management.
//! Review view walks the due cards; Manage view creates and deletes cards.

use chrono::{DateTime, Local, Utc};
use eframe::egui;
use spaced_cards::export::json::{export_json_to_path, import_json};
use spaced_cards::models::scheduler::{format_interval, preview_intervals};
use spaced_cards::{Card, CardStore, Error, ReviewClock, ReviewQuality, ReviewSession, SqliteCardStore};
use uuid::Uuid;

#[derive(Clone, Copy, Default, PartialEq)]
enum View {
    #[default]
    Review,
    Manage,
}

pub struct MyApp {
    store: SqliteCardStore,
    clock: ReviewClock,
    view: View,
    session: ReviewSession,
    all_cards: Vec<Card>,

    new_question: String,
    new_answer: String,
    new_subject: String,

    show_confirmation_dialog: bool,
    allowed_to_close: bool,
    show_message_dialog: bool,
    message: String,
}

fn format_date(time: DateTime<Utc>) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%Y-%m-%d").to_string()
}

impl eframe::App for MyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_top_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            View::Review => self.render_review_view(ui),
            View::Manage => self.render_manage_view(ui),
        });

        // Handle window close requests with confirmation dialog
        if ctx.input(|i| i.viewport().close_requested()) && !self.allowed_to_close {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.show_confirmation_dialog = true;
        }

        if self.show_confirmation_dialog {
            egui::Window::new("Do you want to quit?")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("No").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = false;
                        }

                        if ui.button("Yes").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = true;
                            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
        }

        if self.show_message_dialog {
            egui::Window::new("Flashcards")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&self.message);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.show_message_dialog = false;
                    }
                });
        }
    }
}

impl MyApp {
    pub fn new(store: SqliteCardStore) -> Self {
        let clock = store.review_clock().unwrap_or_default();
        let mut app = Self {
            store,
            clock,
            view: View::default(),
            session: ReviewSession::new(Vec::new()),
            all_cards: Vec::new(),
            new_question: String::new(),
            new_answer: String::new(),
            new_subject: String::new(),
            show_confirmation_dialog: false,
            allowed_to_close: false,
            show_message_dialog: false,
            message: String::new(),
        };
        app.refresh();
        app
    }

    /// Reloads the card list and starts a new session over the due cards.
    fn refresh(&mut self) {
        let now = self.clock.now();
        match self.store.all() {
            Ok(cards) => self.all_cards = cards,
            Err(err) => self.report_error("Failed to load cards", err),
        }
        match self.store.due_cards(now) {
            Ok(due) => {
                tracing::debug!(due = due.len(), "starting review session");
                self.session = ReviewSession::new(due);
            }
            Err(err) => self.report_error("Failed to load due cards", err),
        }
    }

    fn show_message(&mut self, message: String) {
        self.message = message;
        self.show_message_dialog = true;
    }

    fn report_error(&mut self, context: &str, err: Error) {
        tracing::error!(%err, "{context}");
        self.show_message(format!("{context}: {err}"));
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format_date(self.clock.now()));

                if ui.button("Next Day").clicked() {
                    match self.store.advance_day() {
                        Ok(clock) => {
                            self.clock = clock;
                            self.refresh();
                        }
                        Err(err) => self.report_error("Failed to advance the date", err),
                    }
                }

                ui.separator();

                if ui.button("Import").clicked() {
                    self.handle_import();
                }
                if ui.button("Export").clicked() {
                    self.handle_export();
                }

                ui.separator();

                let toggle = match self.view {
                    View::Review => "Manage Cards",
                    View::Manage => "Review Cards",
                };
                if ui.button(toggle).clicked() {
                    self.view = match self.view {
                        View::Review => View::Manage,
                        View::Manage => View::Review,
                    };
                    if self.view == View::Review {
                        self.refresh();
                    }
                }
            });
        });
    }

    fn render_review_view(&mut self, ui: &mut egui::Ui) {
        ui.heading("Flashcards");
        ui.label("Review cards due today using spaced repetition.");
        ui.separator();

        if self.session.is_completed() {
            ui.add_space(20.0);
            ui.vertical_centered(|ui| {
                if self.session.total_count() == 0 {
                    ui.heading("All caught up!");
                    ui.label("You have no flashcards due for review right now.");
                } else {
                    ui.heading("Review session complete!");
                    ui.label(self.session.progress_message());
                }
            });
            ui.add_space(20.0);

            let mut action_manage = false;
            let mut action_refresh = false;
            ui.horizontal(|ui| {
                if ui.button("Manage Flashcards").clicked() {
                    action_manage = true;
                }
                if ui.button("Check Again").clicked() {
                    action_refresh = true;
                }
            });
            if action_manage {
                self.view = View::Manage;
            }
            if action_refresh {
                self.refresh();
            }
            return;
        }

        let Some(card) = self.session.current_card().cloned() else {
            return;
        };
        let now = self.clock.now();
        let show_answer = self.session.show_answer;

        ui.label(self.session.progress_message());
        ui.add_space(10.0);

        ui.group(|ui| {
            ui.set_min_height(200.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(&card.subject).small().italics());
                ui.add_space(20.0);
                ui.label(egui::RichText::new(&card.question).strong().size(18.0));
                ui.add_space(20.0);

                if show_answer {
                    ui.separator();
                    ui.label(egui::RichText::new(&card.answer).size(16.0));
                } else {
                    ui.label("(Click 'Show Answer' to reveal)");
                }
            });
        });

        ui.add_space(20.0);

        // Store actions to execute after UI rendering
        let mut action_reveal = false;
        let mut action_grade: Option<ReviewQuality> = None;

        if !show_answer {
            if ui.button("Show Answer").clicked() {
                action_reveal = true;
            }
        } else {
            let intervals = preview_intervals(&card, now).ok();
            ui.label("How well did you remember?");
            ui.horizontal(|ui| {
                for (i, quality) in ReviewQuality::ALL.into_iter().enumerate() {
                    let text = match &intervals {
                        Some(days) => format!("{} ({})", quality.label(), format_interval(days[i])),
                        None => quality.label().to_string(),
                    };
                    if ui.button(text).clicked() {
                        action_grade = Some(quality);
                    }
                }
            });
        }

        if action_reveal {
            self.session.reveal_answer();
        }
        if let Some(quality) = action_grade {
            match self.session.grade_current_card(quality, now, &mut self.store) {
                Ok(_) => {
                    if let Ok(cards) = self.store.all() {
                        self.all_cards = cards;
                    }
                }
                Err(err) => self.report_error("Failed to save review", err),
            }
        }
    }

    fn render_manage_view(&mut self, ui: &mut egui::Ui) {
        ui.heading("Create New Flashcard");

        ui.label("Question:");
        ui.text_edit_multiline(&mut self.new_question);
        ui.label("Answer:");
        ui.text_edit_multiline(&mut self.new_answer);
        ui.horizontal(|ui| {
            ui.label("Subject:");
            ui.text_edit_singleline(&mut self.new_subject);
        });

        if ui.button("Create Card").clicked() {
            self.handle_create();
        }

        ui.separator();

        ui.heading(format!("All Flashcards ({})", self.all_cards.len()));

        let mut action_delete: Option<Uuid> = None;

        egui::ScrollArea::vertical()
            .id_source("flashcards_list")
            .max_height(320.0)
            .show(ui, |ui| {
                if self.all_cards.is_empty() {
                    ui.label("No flashcards yet. Create one above!");
                }
                for card in &self.all_cards {
                    ui.group(|ui| {
                        ui.label(egui::RichText::new(&card.question).strong());
                        ui.label(&card.answer);
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(&card.subject).italics());
                            ui.label(format!("next review: {}", format_date(card.next_review_at)));
                            if ui.button("Delete").clicked() {
                                action_delete = Some(card.id);
                            }
                        });
                    });
                }
            });

        if let Some(id) = action_delete {
            match self.store.delete(id) {
                Ok(()) => self.refresh(),
                Err(err) => self.report_error("Failed to delete card", err),
            }
        }
    }

    fn handle_create(&mut self) {
        let now = self.clock.now();
        let card = match Card::new(&self.new_question, &self.new_answer, &self.new_subject, now) {
            Ok(card) => card,
            Err(_) => {
                self.show_message("All fields are required.".to_string());
                return;
            }
        };

        if let Err(err) = self.store.put(&card) {
            self.report_error("Failed to save card", err);
            return;
        }

        tracing::info!(card_id = %card.id, subject = %card.subject, "created card");
        self.new_question.clear();
        self.new_answer.clear();
        self.new_subject.clear();
        self.refresh();
    }

    /// Exports every card to a JSON file picked by the user
    fn handle_export(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name("flashcards.json")
            .add_filter("JSON files", &["json"])
            .save_file()
        {
            match export_json_to_path(&self.all_cards, &path) {
                Ok(()) => {
                    self.show_message(format!("Exported {} cards.", self.all_cards.len()));
                }
                Err(err) => self.report_error("Export failed", err),
            }
        }
    }

    /// Imports cards from a JSON file; cards with a known id replace the stored copy
    fn handle_import(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .pick_file()
        else {
            return;
        };

        let cards = match import_json(&path) {
            Ok(cards) => cards,
            Err(err) => {
                self.report_error("Import failed", err);
                return;
            }
        };

        if let Err(err) = self.store.put_all(&cards) {
            self.report_error("Import failed, no cards were changed", err);
            return;
        }

        self.refresh();
        self.show_message(format!("Imported {} cards.", cards.len()));
    }
}
