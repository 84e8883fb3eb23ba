use crate::frames::Outbound;
use crate::session::Session;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use voxdesk_action::Dispatcher;
use voxdesk_core::{AppConfig, SessionError};
use voxdesk_engine::{EngineRegistry, Recognizer};

pub struct ServerState {
    config: AppConfig,
    engines: EngineRegistry,
    dispatcher: Arc<Dispatcher>,
    next_session_id: AtomicU64,
}

impl ServerState {
    pub fn new(config: AppConfig, engines: EngineRegistry, dispatcher: Dispatcher) -> Self {
        Self {
            config,
            engines,
            dispatcher: Arc::new(dispatcher),
            next_session_id: AtomicU64::new(1),
        }
    }
}

pub fn router(state: Arc<ServerState>) -> Router {
    Router::new().route("/ws", get(ws_upgrade)).with_state(state)
}

async fn ws_upgrade(
    State(state): State<Arc<ServerState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// One connection, one task, one recognizer. Frames are handled strictly in
/// arrival order; a blocking provider call holds up this session only.
/// Returning from here drops (and thereby closes) the socket on every exit
/// path.
async fn handle_socket(mut socket: WebSocket, state: Arc<ServerState>) {
    let session_id = state.next_session_id.fetch_add(1, Ordering::Relaxed);

    let recognizer = match Recognizer::create(
        &state.engines,
        &state.config.recognizer.engine,
        state.config.recognizer.engine_config(),
    )
    .await
    {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(session_id, "recognizer construction failed: {e}");
            return;
        }
    };

    let greeting = Outbound::Greeting {
        text: state.config.server.greeting.clone(),
    };
    if socket
        .send(Message::Text(greeting.to_json().into()))
        .await
        .is_err()
    {
        recognizer.shutdown().await;
        return;
    }

    tracing::info!(session_id, engine = %recognizer.engine_name(), "session open");

    let mut session = Session::new(
        session_id,
        recognizer,
        Arc::clone(&state.dispatcher),
        state.config.recognizer.sample_rate,
    );

    let reason = loop {
        let msg = match socket.recv().await {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => break SessionError::Transport(e.to_string()).to_string(),
            None => break "client disconnected".to_string(),
        };

        let outbound = match msg {
            Message::Binary(data) => session.on_audio(data.to_vec()).await,
            Message::Text(raw) => match session.on_text(raw.as_str()).await {
                Ok(frame) => Some(frame),
                Err(e) => break e.to_string(),
            },
            Message::Close(_) => break "client closed".to_string(),
            // axum answers pings on its own
            Message::Ping(_) | Message::Pong(_) => None,
        };

        if let Some(frame) = outbound {
            if let Err(e) = socket.send(Message::Text(frame.to_json().into())).await {
                break SessionError::Transport(e.to_string()).to_string();
            }
        }
    };

    tracing::info!(session_id, reason = %reason, "session closed");
    session.shutdown().await;
}
