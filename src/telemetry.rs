use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// tracingの購読者を初期化する
///
/// `RUST_LOG` が設定されていればそれを優先し、なければ設定ファイルのレベルを
/// このクレートとsqlxに適用する。
pub fn init(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("shareit_bookings={},sqlx=warn", logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
