use dioxus::prelude::*;

mod startup;
mod ui;

use startup::Startup;
use ui::App;
use ui::components::ErrorScreen;

fn main() {
    // Initialize logging
    #[cfg(target_arch = "wasm32")]
    {
        // fails only when a logger is already installed
        let _ = console_log::init_with_level(log::Level::Info);
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .parse_default_env()
            .init();
    }

    log::info!("page-builder starting up!");

    #[cfg(not(target_arch = "wasm32"))]
    let startup = {
        let args: Vec<String> = std::env::args().collect();
        if args.len() > 2 {
            let program_name = args
                .first()
                .cloned()
                .unwrap_or_else(|| "page-builder".to_string());
            eprintln!("Usage: {program_name} [page.json]");
            std::process::exit(1);
        }
        let seed_arg = args.get(1).map(std::path::PathBuf::from);
        if let Some(path) = &seed_arg {
            log::info!("Using page from CLI argument: {}", path.display());
        }
        log::info!("Config path: {}", page_builder_config::Config::config_path().display());
        startup::resolve(page_builder_config::Config::load(), seed_arg)
    };

    // No filesystem in the browser: defaults and the built-in page
    #[cfg(target_arch = "wasm32")]
    let startup = startup::resolve(Ok(None), None);

    let builder = dioxus::LaunchBuilder::new().with_context(startup);

    #[cfg(feature = "desktop")]
    let builder = builder.with_cfg(make_window_config());

    builder.launch(app_root);
}

fn app_root() -> Element {
    let startup = use_context::<Startup>();

    match startup.page {
        Ok(map) => rsx! {
            App { map, settings: startup.settings }
        },
        Err(failure) => {
            log::error!("{}: {}", failure.title, failure.message);
            rsx! {
                ErrorScreen {
                    title: failure.title,
                    message: failure.message,
                    details: failure.details,
                }
            }
        }
    }
}

#[cfg(feature = "desktop")]
fn make_window_config() -> dioxus::desktop::Config {
    use dioxus::desktop::{Config, WindowBuilder};

    let window = WindowBuilder::new()
        .with_title("page-builder")
        .with_always_on_top(false);

    Config::default().with_window(window)
}
