use coinpnl::application::bootstrap;
use coinpnl::application::indicators::SharedIndicators;
use coinpnl::config::Config;
use coinpnl::interfaces::JournalApp;
use coinpnl::interfaces::design_system::DesignSystem;

use tracing::{Level, info};
use tracing_subscriber::prelude::*;

// A writer that sends logs to the UI via a crossbeam channel
struct ChannelWriter {
    sender: crossbeam_channel::Sender<String>,
}

impl std::io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf).to_string();
        let _ = self.sender.try_send(msg);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Clone)]
struct ChannelWriterFactory {
    sender: crossbeam_channel::Sender<String>,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for ChannelWriterFactory {
    type Writer = ChannelWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ChannelWriter {
            sender: self.sender.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // 0. Load Env (before starting anything)
    dotenvy::dotenv().ok();

    // 1. Logging: stdout + UI log panel
    let (log_tx, log_rx) = crossbeam_channel::unbounded();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    let ui_layer = tracing_subscriber::fmt::layer()
        .with_writer(ChannelWriterFactory { sender: log_tx })
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .with(ui_layer)
        .init();

    info!("Starting CoinPNL...");

    // 2. Config + journal (synchronous, owned by the UI thread)
    let config = Config::from_env()?;
    let journal = bootstrap::open_journal(&config)?;
    info!(
        "Loaded {} entries (base currency {})",
        journal.entries().len(),
        journal.settings().ccy
    );

    // 3. Indicator poller on a background Tokio runtime
    let indicators = SharedIndicators::default();
    if config.indicators.enabled {
        let service = bootstrap::indicator_service(&config.indicators).with_shared(indicators.clone());
        std::thread::spawn(move || {
            let rt = match tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    tracing::error!("Failed to build Tokio runtime: {}", e);
                    return;
                }
            };
            info!("Background runtime started.");
            rt.block_on(service.run());
        });
    } else {
        info!("Market indicators disabled");
    }

    // 4. Run UI (blocks main thread)
    let app = JournalApp::new(journal, indicators, log_rx, config.export_dir.clone());
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_title("CoinPNL Journal"),
        ..Default::default()
    };

    eframe::run_native(
        "CoinPNL Journal",
        native_options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(DesignSystem::theme());
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Eframe error: {}", e))?;

    Ok(())
}
