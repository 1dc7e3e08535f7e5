use anyhow::{Context, bail};
use shareit_bookings::{
    AppConfig,
    adapters::postgres::{PostgresBookingStore, PostgresItemCatalog, PostgresUserDirectory},
    application::{
        booking::{ListBookings, ServiceDependencies, find_owner_bookings, find_requester_bookings},
        item::{get_item_view, list_owner_items},
    },
    domain::{ItemId, UserId},
    telemetry,
};
use std::sync::Arc;

const USAGE: &str = "usage:
  shareit-bookings requester <user_id> <state> [<from> <size>]
  shareit-bookings owner <user_id> <state> [<from> <size>]
  shareit-bookings item <item_id> <user_id>
  shareit-bookings owner-items <user_id> [<from> <size>]";

fn parse_id(value: Option<&String>, name: &str) -> anyhow::Result<i64> {
    value
        .with_context(|| format!("missing {}\n{}", name, USAGE))?
        .parse()
        .with_context(|| format!("invalid {}", name))
}

fn parse_optional(value: Option<&String>, name: &str) -> anyhow::Result<Option<i64>> {
    value
        .map(|v| v.parse().with_context(|| format!("invalid {}", name)))
        .transpose()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    telemetry::init(&config.logging);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!("{}", USAGE);
    };

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::debug!("Database ready");

    let deps = ServiceDependencies {
        booking_store: Arc::new(PostgresBookingStore::new(pool.clone())),
        item_catalog: Arc::new(PostgresItemCatalog::new(pool.clone())),
        user_directory: Arc::new(PostgresUserDirectory::new(pool)),
    };

    let now = chrono::Utc::now();

    let output = match command.as_str() {
        "requester" | "owner" => {
            let query = ListBookings {
                actor: UserId::new(parse_id(args.get(1), "user_id")?),
                state: args
                    .get(2)
                    .cloned()
                    .unwrap_or_else(|| "ALL".to_string()),
                from: parse_optional(args.get(3), "from")?,
                size: parse_optional(args.get(4), "size")?,
                now,
            };
            let bookings = if command == "requester" {
                find_requester_bookings(&deps, query).await?
            } else {
                find_owner_bookings(&deps, query).await?
            };
            serde_json::to_string_pretty(&bookings)?
        }
        "item" => {
            let item_id = ItemId::new(parse_id(args.get(1), "item_id")?);
            let user_id = UserId::new(parse_id(args.get(2), "user_id")?);
            let view = get_item_view(&deps, item_id, user_id, now).await?;
            serde_json::to_string_pretty(&view)?
        }
        "owner-items" => {
            let owner_id = UserId::new(parse_id(args.get(1), "user_id")?);
            let from = parse_optional(args.get(2), "from")?;
            let size = parse_optional(args.get(3), "size")?;
            let views = list_owner_items(&deps, owner_id, from, size, now).await?;
            serde_json::to_string_pretty(&views)?
        }
        other => bail!("unknown command: {}\n{}", other, USAGE),
    };

    println!("{}", output);
    Ok(())
}
