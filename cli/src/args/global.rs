use std::io::IsTerminal;

use anyhow::Result;
use clap::Args;
use tracing::debug;
use tracing_glog::Glog;
use tracing_glog::GlogFields;
use tracing_glog::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;

use crate::render::OutputFormat;

const HEADING: Option<&str> = Some("Global Options");

/// Global arguments that apply to every run.
#[derive(Debug, Args, Clone)]
pub struct GlobalArgs {
    /// Filter directive for stderr logs
    #[clap(long, env = "RUST_LOG", default_value = "error", help_heading = HEADING)]
    pub log_level: String,

    /// How to print the trace
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Tree, help_heading = HEADING)]
    pub output: OutputFormat,
}

impl GlobalArgs {
    /// Initializes all [`tracing`] config. Logs go to stderr so they never mix
    /// with the trace itself.
    pub fn init_tracing(&self) -> Result<()> {
        let stderr_filter = EnvFilter::builder().parse_lossy(&self.log_level);
        let stderr_layer = tracing_subscriber::fmt::layer()
            .event_format(Glog::default().with_timer(LocalTime::default()))
            .fmt_fields(GlogFields::default())
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr)
            .with_filter(stderr_filter);

        let subscriber = Registry::default().with(stderr_layer);
        tracing::subscriber::set_global_default(subscriber)?;

        debug!("Initialized tracing");

        Ok(())
    }
}
