use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use sqlx::mysql::MySqlPool;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod db;
mod models;
mod services;
mod trend;
mod utils;

use api::backend::BackendClient;
use config::Config;
use utils::{CommandRateLimiter, SessionCipher};

struct Handler;

struct BotData;

impl TypeMapKey for BotData {
    type Value = Instant;
}

struct DatabasePool;

impl TypeMapKey for DatabasePool {
    type Value = MySqlPool;
}

/// Anonymous backend client; commands derive authorized copies from it
struct Backend;

impl TypeMapKey for Backend {
    type Value = BackendClient;
}

struct Cipher;

impl TypeMapKey for Cipher {
    type Value = SessionCipher;
}

struct RateLimits;

impl TypeMapKey for RateLimits {
    type Value = Arc<CommandRateLimiter>;
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        commands::handle_message(&ctx, &msg).await;
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);

        debug!("Checking Discord rate limit status...");
        match ctx.http.get_current_user().await {
            Ok(_) => info!("No rate limit detected - Bot is fully ready!"),
            Err(e) => {
                let error_msg = e.to_string();
                if error_msg.contains("429") || error_msg.contains("rate limit") || error_msg.contains("Ratelimited") {
                    warn!("Bot is being rate limited by Discord! Error: {}", error_msg);
                } else {
                    warn!("Failed to check rate limit status: {}", error_msg);
                }
            }
        }
    }
}

fn init_tracing() {
    let mut filter = EnvFilter::from_default_env();
    for directive in ["mockinvest=debug", "serenity=warn"] {
        match directive.parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("Invalid log directive {}: {}", directive, e),
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    info!("🤖 Starting mock investment bot v{}...", env!("CARGO_PKG_VERSION"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            return;
        }
    };

    let cipher = match SessionCipher::from_hex(&config.session_key_hex) {
        Ok(cipher) => cipher,
        Err(e) => {
            error!("Invalid SESSION_ENCRYPTION_KEY: {}", e);
            return;
        }
    };

    info!("Initializing database...");
    let pool = match db::init_db(&config.database_url).await {
        Ok(p) => {
            info!("Database initialized successfully");
            p
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return;
        }
    };

    let backend = BackendClient::new(&config.backend_base_url, config.backend_rate_limit);
    info!("Game backend: {}", config.backend_base_url);

    let rate_limits = Arc::new(CommandRateLimiter::new(
        config.command_cooldown_secs,
        config.global_rate_limit,
    ));

    let intents = GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MESSAGES;

    let mut client = match Client::builder(&config.discord_token, intents)
        .event_handler(Handler)
        .await
    {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create client: {}", e);
            return;
        }
    };

    {
        let mut data = client.data.write().await;
        data.insert::<BotData>(Instant::now());
        data.insert::<DatabasePool>(pool);
        data.insert::<Backend>(backend);
        data.insert::<Cipher>(cipher);
        data.insert::<RateLimits>(rate_limits);
    }

    if let Err(e) = client.start().await {
        error!("Client error: {}", e);
    }
}
