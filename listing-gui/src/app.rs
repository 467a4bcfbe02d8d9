use std::sync::Arc;

use eframe::egui::{self, Color32, RichText};
use listing_core::{
    CardView, Catalog, CatalogConfig, EventTarget, FavoriteMode, Key, UiEvent, FALLBACK_HOST_IMAGE,
    FALLBACK_IMAGE,
};
use tokio::runtime::Runtime;
use tracing::{info, warn};

const THUMB_HEIGHT: f32 = 180.0;
const HOST_AVATAR: f32 = 28.0;

pub struct AppInit {
    pub runtime: Arc<Runtime>,
    pub catalog: Catalog,
    pub config: CatalogConfig,
}

pub struct ListingApp {
    runtime: Arc<Runtime>,
    catalog: Catalog,
    config: CatalogConfig,
    search: String,
    export_feedback: Option<(bool, String)>,
}

impl ListingApp {
    pub fn new(init: AppInit) -> Self {
        Self {
            search: init.catalog.query().search.clone(),
            runtime: init.runtime,
            catalog: init.catalog,
            config: init.config,
            export_feedback: None,
        }
    }

    /// Passe un événement au catalogue, de façon synchrone pour l'UI.
    fn dispatch(&mut self, ctx: &egui::Context, event: UiEvent) {
        let outcome = self.runtime.block_on(self.catalog.handle(event));
        if outcome.prevent_default {
            ctx.input_mut(|i| {
                i.consume_key(egui::Modifiers::NONE, egui::Key::Space);
                i.consume_key(egui::Modifiers::NONE, egui::Key::Enter);
            });
        }
    }

    fn draw_toolbar(&mut self, ui: &mut egui::Ui, events: &mut Vec<UiEvent>) {
        ui.horizontal(|ui| {
            ui.heading(RichText::new("🏠 Annonces").size(18.0));
            ui.separator();

            let search = ui.add(
                egui::TextEdit::singleline(&mut self.search)
                    .hint_text("Rechercher par nom ou description")
                    .desired_width(280.0),
            );
            if search.changed() {
                events.push(UiEvent::SearchInput(self.search.clone()));
            }

            let current = self.catalog.mode();
            let mut selected = current;
            egui::ComboBox::from_id_source("favorite_mode")
                .selected_text(mode_label(selected))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut selected, FavoriteMode::All, mode_label(FavoriteMode::All));
                    ui.selectable_value(
                        &mut selected,
                        FavoriteMode::FavoritesOnly,
                        mode_label(FavoriteMode::FavoritesOnly),
                    );
                });
            if selected != current {
                events.push(UiEvent::ModeChanged(selected));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .small_button("Exporter HTML")
                    .on_hover_text("Enregistre les cartes affichées dans un fichier HTML")
                    .clicked()
                {
                    self.export_page();
                }
            });
        });

        ui.horizontal(|ui| {
            ui.label(RichText::new(self.catalog.status()).weak().size(12.0));
            if self.catalog.favorites().is_volatile() {
                ui.label(
                    RichText::new("• favoris non sauvegardés")
                        .color(Color32::from_rgb(255, 152, 0))
                        .size(12.0),
                );
            }
            if let Some((ok, msg)) = &self.export_feedback {
                let color = if *ok {
                    Color32::from_rgb(76, 175, 80)
                } else {
                    Color32::from_rgb(244, 67, 54)
                };
                ui.label(RichText::new(msg).color(color).size(12.0));
            }
        });
    }

    fn export_page(&mut self) {
        let path = self.config.storage_dir().join("listings.html");
        let html = self.catalog.render_html();
        let result = std::fs::create_dir_all(self.config.storage_dir())
            .and_then(|_| std::fs::write(&path, html));
        self.export_feedback = Some(match result {
            Ok(()) => {
                info!(path = %path.display(), "page exported");
                (true, format!("Exporté vers {}", path.display()))
            }
            Err(e) => {
                warn!(error = %e, path = %path.display(), "page export failed");
                (false, format!("Échec de l'export: {e}"))
            }
        });
    }

    fn draw_cards(&self, ui: &mut egui::Ui, events: &mut Vec<UiEvent>) {
        let cards = self.catalog.cards();
        if cards.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(50.0);
                ui.label(RichText::new("📭 Aucune annonce à afficher").size(16.0));
            });
            return;
        }

        let card_width = self.config.ui.card_width;
        let columns = ((ui.available_width() / (card_width + 12.0)).floor() as usize).max(1);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Grid::new("listing_grid")
                    .num_columns(columns)
                    .spacing([12.0, 12.0])
                    .show(ui, |ui| {
                        for (index, card) in cards.iter().enumerate() {
                            draw_card(ui, card, card_width, events);
                            if (index + 1) % columns == 0 {
                                ui.end_row();
                            }
                        }
                    });
            });
    }

    fn draw_preview(&self, ctx: &egui::Context, events: &mut Vec<UiEvent>) {
        let Some(preview) = self.catalog.modal().current() else {
            return;
        };
        if !preview.is_fallback() && image_failed(ctx, &preview.src) {
            events.push(UiEvent::PreviewImageFailed);
        }

        let mut open = true;
        egui::Window::new(preview.title.as_str())
            .id(egui::Id::new("image_preview_modal"))
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.add(egui::Image::new(preview.src.as_str()).max_size(egui::vec2(720.0, 480.0)));
                if !preview.caption.is_empty() {
                    ui.add_space(6.0);
                    ui.label(RichText::new(&preview.caption).weak());
                }
            });
        if !open {
            events.push(UiEvent::PreviewDismissed);
        }
    }
}

impl eframe::App for ListingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events = Vec::new();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, &mut events);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_cards(ui, &mut events);
        });
        self.draw_preview(ctx, &mut events);

        for event in events {
            self.dispatch(ctx, event);
        }
    }
}

fn mode_label(mode: FavoriteMode) -> &'static str {
    match mode {
        FavoriteMode::All => "Toutes",
        FavoriteMode::FavoritesOnly => "Favoris",
    }
}

fn image_failed(ctx: &egui::Context, uri: &str) -> bool {
    ctx.try_load_image(uri, egui::load::SizeHint::default()).is_err()
}

/// Image d'origine, ou l'image de secours si le chargement a échoué
fn image_or_fallback<'a>(ctx: &egui::Context, uri: &'a str, fallback: &'a str) -> &'a str {
    if image_failed(ctx, uri) {
        fallback
    } else {
        uri
    }
}

fn draw_card(ui: &mut egui::Ui, card: &CardView, width: f32, events: &mut Vec<UiEvent>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(width);
        ui.vertical(|ui| {
            let thumb_uri = image_or_fallback(ui.ctx(), &card.thumbnail, FALLBACK_IMAGE);
            let thumb = ui
                .add(
                    egui::Image::new(thumb_uri)
                        .fit_to_exact_size(egui::vec2(width, THUMB_HEIGHT))
                        .sense(egui::Sense::click()),
                )
                .on_hover_cursor(egui::CursorIcon::PointingHand);

            let activation = if thumb.has_focus() {
                ui.input(|i| {
                    if i.key_pressed(egui::Key::Enter) {
                        Some(Key::Enter)
                    } else if i.key_pressed(egui::Key::Space) {
                        Some(Key::Space)
                    } else {
                        None
                    }
                })
            } else {
                None
            };
            if let Some(key) = activation {
                events.push(UiEvent::KeyDown {
                    target: EventTarget::Thumbnail(card.preview()),
                    key,
                });
            } else if thumb.clicked() {
                events.push(UiEvent::Click(EventTarget::Thumbnail(card.preview())));
            }

            ui.horizontal(|ui| {
                ui.add(egui::Label::new(RichText::new(&card.title).strong().size(16.0)).wrap(true));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let glyph = if card.is_favorite { "♥" } else { "♡" };
                    let button = egui::Button::new(
                        RichText::new(glyph).color(Color32::from_rgb(220, 53, 69)),
                    );
                    if ui.add(button).on_hover_text("Basculer le favori").clicked() {
                        events.push(UiEvent::Click(EventTarget::FavoriteButton {
                            id: Some(card.id.clone()),
                        }));
                    }
                });
            });

            ui.horizontal(|ui| {
                ui.label(RichText::new(&card.price).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(format!("id: {}", card.id)).weak().size(11.0));
                });
            });

            ui.horizontal(|ui| {
                let host_uri = image_or_fallback(ui.ctx(), &card.host_photo, FALLBACK_HOST_IMAGE);
                ui.add(
                    egui::Image::new(host_uri)
                        .fit_to_exact_size(egui::vec2(HOST_AVATAR, HOST_AVATAR))
                        .rounding(HOST_AVATAR / 2.0),
                );
                ui.label(RichText::new(format!("Host: {}", card.host_name)).size(12.0));
            });

            egui::CollapsingHeader::new(card.summary())
                .id_source(("description", &card.id))
                .show(ui, |ui| {
                    let full = if card.has_description() {
                        card.description.as_str()
                    } else {
                        listing_core::render::NO_DESCRIPTION
                    };
                    ui.label(RichText::new(full).size(12.0));
                });

            ui.horizontal_wrapped(|ui| {
                for amenity in &card.amenities {
                    badge(ui, amenity);
                }
                if card.more_amenities > 0 {
                    badge(ui, &format!("+{} more", card.more_amenities));
                }
            });

            ui.add_space(4.0);
            let action = ui.add_enabled(
                card.link.is_some(),
                egui::Button::new(card.link_label()).min_size(egui::vec2(width, 0.0)),
            );
            if action.clicked() {
                if let Some(link) = &card.link {
                    if let Err(e) = webbrowser::open(link) {
                        warn!(error = %e, %link, "failed to open listing link");
                    }
                }
            }
        });
    });
}

fn badge(ui: &mut egui::Ui, text: &str) {
    egui::Frame::none()
        .stroke(egui::Stroke::new(1.0, Color32::from_gray(90)))
        .rounding(4.0)
        .inner_margin(egui::Margin::symmetric(4.0, 1.0))
        .show(ui, |ui| {
            ui.label(RichText::new(text).size(11.0));
        });
}
