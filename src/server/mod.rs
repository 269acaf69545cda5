pub mod protocol;

use crate::config::Config;
use crate::creature::Creature;
use crate::simulation::SimulationState;
use axum::{
    extract::{ws::WebSocket, State as AxumState, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
    Router,
};
use futures_util::{SinkExt, StreamExt};
use protocol::{ClientMessage, ServerMessage};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{interval, Duration};
use tower_http::services::ServeDir;

#[derive(Clone)]
struct AppState {
    state: Arc<RwLock<SimulationState>>,
    config: Config,
}

/// Serve render frames to external viewers: `/ws` streams
/// position/radius/color snapshots at the configured rate, the static
/// directory holds whatever renderer consumes them.
pub async fn run_server(
    config: Config,
    state: Arc<RwLock<SimulationState>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.server.address, config.server.port);

    let app_state = AppState {
        state,
        config: config.clone(),
    };

    let app = Router::new()
        .route("/ws", get(websocket_handler))
        .nest_service("/", ServeDir::new("static"))
        .with_state(app_state);

    log::info!("HTTP server with WebSocket listening on: {}", addr);
    log::info!("WebSocket endpoint: ws://{}/ws", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn websocket_handler(
    ws: WebSocketUpgrade,
    AxumState(state): AxumState<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_websocket(socket, state))
}

async fn handle_websocket(socket: WebSocket, app_state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let mut update_interval = interval(Duration::from_millis(
        1000 / app_state.config.server.update_rate_hz.max(1),
    ));

    loop {
        tokio::select! {
            _ = update_interval.tick() => {
                let message = {
                    let state = app_state.state.read().await;
                    let creatures: Vec<&Creature> = state.world.creatures().collect();
                    ServerMessage::frame(state.metrics(), &creatures)
                };

                if let Ok(json) = serde_json::to_string(&message) {
                    if sender.send(axum::extract::ws::Message::Text(json)).await.is_err() {
                        log::info!("Client disconnected");
                        break;
                    }
                }
            }

            Some(msg) = receiver.next() => {
                match msg {
                    Ok(axum::extract::ws::Message::Text(text)) => {
                        if let Ok(ClientMessage::GetState) = serde_json::from_str::<ClientMessage>(&text) {
                            let message = {
                                let state = app_state.state.read().await;
                                let creatures: Vec<&Creature> = state.world.creatures().collect();
                                ServerMessage::full_state(state.metrics(), state.world.bounds(), &creatures)
                            };

                            if let Ok(json) = serde_json::to_string(&message) {
                                let _ = sender.send(axum::extract::ws::Message::Text(json)).await;
                            }
                        }
                    }
                    Ok(axum::extract::ws::Message::Close(_)) => {
                        log::info!("Client requested close");
                        break;
                    }
                    Err(e) => {
                        log::error!("WebSocket error: {}", e);
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    log::info!("WebSocket connection closed");
}
