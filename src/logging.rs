//! Diagnostic logging to stderr
//!
//! The level is chosen on the command line with `--debugLevel`, which is only
//! known while parsing, so the level filter sits behind a reload handle.

use std::sync::OnceLock;

use tracing::level_filters::LevelFilter;
use tracing::Subscriber;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, Layer, Registry};

static LEVEL_HANDLE: OnceLock<reload::Handle<LevelFilter, Registry>> = OnceLock::new();

/// Formatting layer shared by the binary and the test setup.
pub fn fmt_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE)
}

/// Map a `--debugLevel` value to a level filter.
pub fn level_for(debug_level: i32) -> LevelFilter {
    match debug_level {
        i32::MIN..=0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber at WARN level.
///
/// Does nothing if a subscriber is already installed.
pub fn init() {
    let (filter, handle) = reload::Layer::new(LevelFilter::WARN);
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer())
        .try_init()
        .is_ok();
    if installed {
        let _ = LEVEL_HANDLE.set(handle);
    }
}

/// Change the level of the subscriber installed by [`init`].
pub fn set_debug_level(debug_level: i32) {
    let Some(handle) = LEVEL_HANDLE.get() else {
        return;
    };
    let level = level_for(debug_level);
    if let Err(e) = handle.modify(|filter| *filter = level) {
        eprintln!("Error: cannot change log level: {e}");
        return;
    }
    tracing::debug!(debug_level, %level, "log level changed");
}
