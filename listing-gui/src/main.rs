mod app;

use std::sync::Arc;

use eframe::{egui, NativeOptions};
use listing_core::{Catalog, CatalogConfig, FavoriteStore};
use reqwest::{redirect, ClientBuilder};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use crate::app::{AppInit, ListingApp};

fn main() -> eframe::Result<()> {
    init_tracing();

    let runtime = Arc::new(Runtime::new().expect("failed to initialise Tokio runtime"));
    let config = CatalogConfig::load();
    let client = ClientBuilder::new()
        .redirect(redirect::Policy::limited(5))
        .user_agent("ListingBrowser/0.1")
        .build()
        .expect("failed to build HTTP client");

    // Favoris d'abord, puis le jeu de données : aucun événement avant la fin du chargement
    let favorites = runtime.block_on(FavoriteStore::load_from(config.favorites_path()));
    let mut catalog = Catalog::new(favorites);
    if let Err(err) = runtime.block_on(catalog.load(&client, &config.source)) {
        tracing::error!(%err, "listing browser started without data");
    }

    let window_size = config.ui.window_size;
    let init = AppInit {
        runtime,
        catalog,
        config,
    };

    eframe::run_native(
        "Listing Browser",
        NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(window_size)
                .with_min_inner_size([600.0, 500.0]),
            ..Default::default()
        },
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            install_emoji_friendly_fonts(&cc.egui_ctx);
            apply_font_size(&cc.egui_ctx, init.config.ui.font_size);
            Box::new(ListingApp::new(init))
        }),
    )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn apply_font_size(ctx: &egui::Context, size: f32) {
    let mut style = (*ctx.style()).clone();
    for style_name in [egui::TextStyle::Body, egui::TextStyle::Button] {
        if let Some(font) = style.text_styles.get_mut(&style_name) {
            font.size = size;
        }
    }
    ctx.set_style(style);
}

// ♥ / ♡ et les puces ne sont pas tous couverts par les polices embarquées d'egui
fn install_emoji_friendly_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();

    let candidates = [
        "/usr/share/fonts/truetype/noto/NotoColorEmoji.ttf",
        "/usr/share/fonts/truetype/noto/NotoEmoji-Regular.ttf",
        "/usr/share/fonts/opentype/noto/NotoSansSymbols2-Regular.otf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    ];

    let mut added = 0usize;
    for path in candidates {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        let name = format!("embedded-{added}");
        fonts
            .font_data
            .insert(name.clone(), egui::FontData::from_owned(bytes));
        for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
            fonts.families.entry(family).or_default().push(name.clone());
        }
        added += 1;
    }

    if added > 0 {
        ctx.set_fonts(fonts);
    }
}
