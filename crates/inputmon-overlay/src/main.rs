//! Input Monitor entry point.
//!
//! Wires together the infrastructure services and opens the overlay window.
//! eframe must own the main thread, so the Tokio runtime is built by hand and
//! only hosts the Ctrl-C handler.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()          -- optional TOML, defaults otherwise
//!  └─ start services
//!       ├─ Ctrl-C handler     (Tokio task)
//!       ├─ lock-key poller    (input-monitor-leds thread)
//!       └─ OverlayApp         (main thread; starts the rdev hook and event pump)
//! ```

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context as _;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use inputmon_overlay::infrastructure::icons::load_icon_set;
use inputmon_overlay::infrastructure::input_capture::rdev_hook::RdevInputSource;
use inputmon_overlay::infrastructure::lock_state::spawn_lock_poller;
use inputmon_overlay::infrastructure::storage::config::{load_config, AppConfig};
use inputmon_overlay::infrastructure::ui_bridge::{native_options, OverlayApp, WINDOW_TITLE};

fn main() -> anyhow::Result<()> {
    // Must precede every thread that talks to the X server.
    #[cfg(target_os = "linux")]
    inputmon_overlay::infrastructure::lock_state::linux::init_xlib_threads();

    let loaded = load_config();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    // Initialise structured logging.  `RUST_LOG` wins over the config file.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.general.log_level))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = &loaded {
        warn!("using default configuration: {e}");
    }

    info!("Input Monitor starting");
    run(config)?;
    info!("Input Monitor stopped");
    Ok(())
}

fn run(config: AppConfig) -> anyhow::Result<()> {
    // Shutdown flag shared across all background services.
    let running = Arc::new(AtomicBool::new(true));

    // ── Ctrl-C / SIGTERM handler ──────────────────────────────────────────────
    let runtime = tokio::runtime::Runtime::new().context("failed to start Tokio runtime")?;
    let running_clone = Arc::clone(&running);
    runtime.spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            running_clone.store(false, Ordering::Relaxed);
        }
    });

    // ── Lock-key LEDs ─────────────────────────────────────────────────────────
    let leds = spawn_lock_poller(config.timing.led_poll_interval(), Arc::clone(&running));

    // ── Overlay window ────────────────────────────────────────────────────────
    let icons = load_icon_set(&config.icons);
    let options = native_options(&config.window);

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            Ok(Box::new(OverlayApp::new(
                cc,
                &config,
                Box::new(RdevInputSource::new()),
                leds,
                icons,
                running,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("overlay window failed: {e}"))?;

    runtime.shutdown_background();
    Ok(())
}
