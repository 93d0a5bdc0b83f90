use crate::presentation::components::CapturedEvent;
use anyhow::{Context, Result};
use std::sync::mpsc::{Receiver, Sender, channel};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const CAPTURED_TARGETS: [&str; 3] = [
    "placement_dash::application",
    "placement_dash::infrastructure",
    "placement_dash::presentation",
];

/// Installs the global subscriber. Events from this crate are forwarded to
/// the returned receiver for the activity log.
pub fn init_log_capture() -> Result<Receiver<CapturedEvent>> {
    let (tx, rx) = channel();

    let capture_layer = CaptureLayer { sender: tx };

    let filter = if cfg!(feature = "verbose-logging") {
        LevelFilter::TRACE
    } else if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(capture_layer)
        .try_init()
        .context("Failed to install log capture")?;

    Ok(rx)
}

struct CaptureLayer {
    sender: Sender<CapturedEvent>,
}

impl<S> Layer<S> for CaptureLayer
where
    S: tracing::Subscriber,
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let target = metadata.target();

        if !CAPTURED_TARGETS.iter().any(|prefix| target.starts_with(prefix)) {
            return;
        }

        let mut visitor = LogVisitor {
            message: String::new(),
        };

        event.record(&mut visitor);

        if !visitor.message.is_empty() {
            let _ = self.sender.send(CapturedEvent {
                level: *metadata.level(),
                message: visitor.message,
            });
        }
    }
}

struct LogVisitor {
    message: String,
}

impl tracing::field::Visit for LogVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}
