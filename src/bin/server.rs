//! Chat relay server binary.
//!
//! Run with:
//! ```not_rust
//! JWT_SECRET=change-me cargo run --bin chat-relay-server -- --demo
//! ```

use std::sync::Arc;

use clap::Parser;

use chat_relay::{
    AppState,
    domain::Identity,
    infrastructure::repository::{
        InMemoryIdentityStore, InMemoryMessageStore, InMemoryPresenceRegistry,
    },
    logger::setup_logger,
    moderation::ProfanityPolicy,
    run_server,
    usecase::issue_token,
};

#[derive(Debug, Parser)]
#[command(name = "chat-relay-server", about = "Room-based chat relay server")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// HS256 secret shared with the credential subsystem
    #[arg(long, env = "JWT_SECRET")]
    jwt_secret: String,

    /// Seed demo identities and log ready-made connection tokens
    #[arg(long, default_value_t = false)]
    demo: bool,
}

#[tokio::main]
async fn main() {
    setup_logger("debug");
    let args = Args::parse();

    let identities = Arc::new(InMemoryIdentityStore::new());
    if args.demo {
        seed_demo_identities(&identities, &args.jwt_secret).await;
    }

    let state = Arc::new(AppState::new(
        Arc::new(InMemoryPresenceRegistry::new()),
        Arc::new(InMemoryMessageStore::new()),
        identities,
        args.jwt_secret,
        ProfanityPolicy::default(),
    ));

    let addr = format!("{}:{}", args.host, args.port);
    if let Err(e) = run_server(&addr, state).await {
        tracing::error!("server error: {e}");
        std::process::exit(1);
    }
}

/// Insert a couple of identities and log tokens that connect as them.
async fn seed_demo_identities(identities: &InMemoryIdentityStore, secret: &str) {
    let demo = [
        ("demo-alice", "Alice", "alice@example.com"),
        ("demo-bob", "Bob", "bob@example.com"),
    ];
    for (id, name, email) in demo {
        identities
            .insert(Identity::new(
                id.to_string(),
                name.to_string(),
                email.to_string(),
            ))
            .await;
        match issue_token(secret, id, 24 * 3600) {
            Ok(token) => tracing::info!("demo identity '{id}' token: {token}"),
            Err(e) => tracing::error!("failed to mint demo token for '{id}': {e}"),
        }
    }
}
