//! Gateway calls, one per backend endpoint
//!
//! Every call sends one request and maps the answer:
//! - 200 is success and the body is decoded as JSON when there is one
//! - any other status becomes [`ClientError::Status`] with the raw body
//! - room, player and game-state listings swallow transport failures and
//!   answer with an empty value instead
//!
//! There are no retries, backoff or timeouts at this layer.

use std::sync::Arc;

use hexagram_core::protocol::{
    AddUserRequest, ChatRequest, CreateRoomRequest, MoveRequest, ReadyRequest, UpdateRoomRequest,
};
use hexagram_core::{
    Cell, Color, CreatedRoom, GameState, Move, Player, RoomDesc, TokenBundle, USER_TOKEN_HEADER,
};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::events::RoomEvents;
use crate::session::Session;

/// Gateway to the game backend
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    session: Arc<Session>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, session: Arc<Session>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            session,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    // ------------------------------------------------------------------
    // Identity
    // ------------------------------------------------------------------

    /// Register a player name and store the issued session
    pub async fn add_user(&self, name: &str) -> Result<TokenBundle> {
        let request = self
            .request(Method::POST, "/add")
            .json(&AddUserRequest {
                name: name.to_string(),
            });
        let bundle: TokenBundle = decode(send(request).await?).await?;
        self.session.process_token(&bundle)?;
        Ok(bundle)
    }

    /// Exchange the current token for a fresh one.
    ///
    /// Any failure logs the user out: all stored identity fields are removed.
    pub async fn refresh_token(&self) -> Result<TokenBundle> {
        match self.fetch_refreshed_token().await {
            Ok(bundle) => {
                self.session.process_token(&bundle)?;
                Ok(bundle)
            }
            Err(e) => {
                tracing::warn!("Token refresh failed, clearing session: {}", e);
                if let Err(clear_err) = self.session.clear() {
                    tracing::error!("Session not fully cleared: {}", clear_err);
                }
                Err(e)
            }
        }
    }

    async fn fetch_refreshed_token(&self) -> Result<TokenBundle> {
        let request = self.authed(Method::POST, "/refresh")?;
        decode(send(request).await?).await
    }

    /// Drop the stored session
    pub fn logout(&self) -> Result<()> {
        self.session.clear()
    }

    // ------------------------------------------------------------------
    // Rooms
    // ------------------------------------------------------------------

    pub async fn create_room(&self, room_name: &str) -> Result<CreatedRoom> {
        let request = self
            .authed(Method::POST, "/room")?
            .json(&CreateRoomRequest {
                room_name: room_name.to_string(),
            });
        decode(send(request).await?).await
    }

    /// All rooms; an unreachable server yields an empty list
    pub async fn list_rooms(&self) -> Result<Vec<RoomDesc>> {
        let result: Result<Vec<RoomDesc>> = async {
            let response = send(self.request(Method::GET, "/room")).await?;
            decode(response).await
        }
        .await;
        default_on_transport("list rooms", result)
    }

    /// Look up a room; `None` when the server does not know it
    pub async fn resolve_room(&self, room_id: &str) -> Result<Option<RoomDesc>> {
        let request = self.request(Method::GET, &format!("/room/{}", room_id));
        decode(send(request).await?).await
    }

    /// Players seated in a room; an unreachable server yields an empty list
    pub async fn list_players(&self, room_id: &str) -> Result<Vec<Player>> {
        let result: Result<Vec<Player>> = async {
            let request = self
                .request(Method::GET, "/players")
                .query(&[("room_id", room_id)]);
            decode(send(request).await?).await
        }
        .await;
        default_on_transport("list players", result)
    }

    /// Board occupation of a room; an unreachable server yields `None`
    pub async fn game_state(&self, room_id: &str) -> Result<Option<GameState>> {
        let result: Result<Option<GameState>> = async {
            let request = self
                .request(Method::GET, "/game-state")
                .query(&[("room_id", room_id)]);
            decode(send(request).await?).await
        }
        .await;
        default_on_transport("game state", result)
    }

    // ------------------------------------------------------------------
    // Play
    // ------------------------------------------------------------------

    /// Ask the server whether a path is a legal move.
    ///
    /// 200 means legal and 406 means illegal; other statuses are errors.
    pub async fn validate_path(&self, room_id: &str, path: &[Cell]) -> Result<bool> {
        let request = self
            .authed(Method::POST, &format!("/validate/{}", room_id))?
            .json(path);
        match send(request).await {
            Ok(_) => Ok(true),
            Err(ClientError::Status { status, .. }) if status == StatusCode::NOT_ACCEPTABLE.as_u16() => {
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn make_move(&self, room_id: &str, mv: &Move) -> Result<()> {
        let request = self
            .authed(Method::POST, &format!("/move/{}", room_id))?
            .json(&MoveRequest::new(mv.path.clone()));
        send(request).await.map(drop)
    }

    pub async fn send_chat(&self, room_id: &str, message: &str) -> Result<()> {
        let request = self
            .authed(Method::POST, &format!("/chat/{}", room_id))?
            .json(&ChatRequest {
                message: message.to_string(),
            });
        send(request).await.map(drop)
    }

    pub async fn set_ready(&self, room_id: &str) -> Result<()> {
        let request = self
            .authed(Method::POST, &format!("/chat/{}", room_id))?
            .json(&ReadyRequest { set_ready: true });
        send(request).await.map(drop)
    }

    pub async fn start_game(&self, room_id: &str) -> Result<()> {
        self.update_room(room_id, UpdateRoomRequest::start()).await
    }

    pub async fn leave_room(&self, room_id: &str) -> Result<()> {
        self.update_room(room_id, UpdateRoomRequest::leave()).await
    }

    pub async fn change_color(&self, room_id: &str, new_color: Color) -> Result<()> {
        self.update_room(room_id, UpdateRoomRequest::color_change(new_color))
            .await
    }

    async fn update_room(&self, room_id: &str, body: UpdateRoomRequest) -> Result<()> {
        let request = self
            .authed(Method::POST, &format!("/update/{}", room_id))?
            .json(&body);
        send(request).await.map(drop)
    }

    /// Open the room's live update channel with the current token
    pub async fn subscribe(&self, room_id: &str) -> Result<RoomEvents> {
        let token = self.session.token().ok_or(ClientError::NotLoggedIn)?;
        RoomEvents::open(&self.http, &self.config, room_id, &token).await
    }

    /// Backend liveness
    pub async fn health(&self) -> Result<bool> {
        let response = self.request(Method::GET, "/health").send().await?;
        Ok(response.status() == StatusCode::OK)
    }

    // ------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!("{} {}", method, path);
        self.http.request(method, self.config.url(path))
    }

    /// Request carrying the session token
    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let token = self.session.token().ok_or(ClientError::NotLoggedIn)?;
        Ok(self.request(method, path).header(USER_TOKEN_HEADER, token))
    }
}

/// Send and reject anything but 200
async fn send(request: RequestBuilder) -> Result<Response> {
    let response = request.send().await?;
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::debug!("Rejected with {}: {}", status, body);
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn default_on_transport<T: Default>(what: &str, result: Result<T>) -> Result<T> {
    match result {
        Err(ClientError::Transport(e)) => {
            tracing::error!("Could not {}: {}", what, e);
            Ok(T::default())
        }
        other => other,
    }
}
