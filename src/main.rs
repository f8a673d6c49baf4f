use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use wa_relay::channels::discord::DiscordClient;
use wa_relay::channels::whatsapp::{start_event_poller, WhatsAppClient};
use wa_relay::config::load_config;
use wa_relay::relay::{Disposition, Relay};
use wa_relay::types::SourceEvent;
use wa_relay::RelayError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config();
    config.validate()?;

    let http = reqwest::Client::new();

    let discord = DiscordClient::new(http.clone(), config.discord.bot_token.clone());
    discord
        .connect()
        .await
        .map_err(RelayError::Connection)?;

    let whatsapp = WhatsAppClient::new(http, config.whatsapp.sidecar_url.clone());
    whatsapp
        .check_health()
        .await
        .map_err(RelayError::Connection)?;

    match whatsapp.list_joined_groups().await {
        Ok(groups) => {
            for group in groups {
                info!(name = %group.name, jid = %group.jid, "joined group");
            }
        }
        Err(err) => error!("could not list joined groups: {err}"),
    }

    let (tx, mut rx) = mpsc::channel::<SourceEvent>(100);
    let poller = tokio::spawn(start_event_poller(
        whatsapp.clone(),
        tx,
        config.whatsapp.poll_interval_seconds,
    ));

    info!(chat = %config.whatsapp.chat_id, channel = %config.discord.channel_id, "relay running");

    let relay = Arc::new(Relay::new(config, whatsapp, discord));
    let consumer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            // One task per event: a slow Discord send must not hold up the
            // next event's classification.
            let relay = relay.clone();
            tokio::spawn(async move {
                match relay.handle_event(event).await {
                    Ok(Disposition::Forwarded { sends }) => {
                        debug!(sends, "forwarded message");
                    }
                    Ok(Disposition::Ignored(reason)) => {
                        debug!(reason, "ignored event");
                    }
                    Err(err) => error!("relay error: {err}"),
                }
            });
        }
    });

    shutdown_signal().await;
    info!("shutting down");
    poller.abort();
    consumer.abort();

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
