mod app;

use app::MyApp;
use spaced_cards::config::AppConfig;
use spaced_cards::logging::init_tracing;
use spaced_cards::{Card, SqliteCardStore};

fn main() -> eframe::Result<()> {
    let config = AppConfig::load().unwrap_or_else(|err| {
        eprintln!("Failed to load config, using defaults: {err}");
        AppConfig::default()
    });
    init_tracing(&config.log_level);

    let mut store = match SqliteCardStore::open(&config.database_path) {
        Ok(store) => store,
        Err(err) => {
            tracing::error!(%err, path = %config.database_path.display(), "failed to open card database");
            std::process::exit(1);
        }
    };

    if let Err(err) = seed_sample_cards(&mut store) {
        tracing::warn!(%err, "failed to create sample cards");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height]),
        ..Default::default()
    };
    eframe::run_native(
        "Flashcards",
        options,
        Box::new(move |_cc| Ok(Box::new(MyApp::new(store)))),
    )
}

/// Fills an empty database with a few cards so the first start has something to review.
fn seed_sample_cards(store: &mut SqliteCardStore) -> spaced_cards::Result<()> {
    use spaced_cards::CardStore;

    if store.count()? > 0 {
        return Ok(());
    }

    let now = store.review_clock()?.now();
    for (question, answer, subject) in [
        ("What is the capital of Japan?", "Tokyo", "Geography"),
        ("What is the chemical symbol for gold?", "Au", "Chemistry"),
        ("How do you say 'thank you' in Polish?", "dziękuję", "Polish"),
    ] {
        store.put(&Card::new(question, answer, subject, now)?)?;
    }

    tracing::info!(count = store.count()?, "sample cards created");
    Ok(())
}
