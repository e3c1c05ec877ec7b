use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info,sqlx=warn";

/// Install the global subscriber. Logs go to stderr so stdout stays
/// usable for `--json` output. `RUST_LOG` overrides the default filter.
pub fn init(verbose: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    if verbose {
      EnvFilter::new("debug,sqlx=warn")
    } else {
      EnvFilter::new(DEFAULT_FILTER)
    }
  });

  // A second init (tests, embedding) keeps the first subscriber
  let _ = tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
    .try_init();
}
