//! SSE stream handlers
//!
//! Each connection walks one path: snapshot from the persistence collaborator,
//! then the live feed from the hub, with tagged keepalive records on idle.
//! Dropping the connection drops the subscription, which unregisters it from
//! the hub.

use crate::auth::Role;
use crate::routes::error_response;
use crate::state::{topics, AppState, Envelope};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::sse::{Event, Sse},
    response::IntoResponse,
    Json,
};
use bluesignal_broadcast::StreamEvent;
use futures::stream::{self, Stream, StreamExt};
use serde::Deserialize;
use std::convert::Infallible;
use tracing::error;

#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    /// Streaming clients cannot set headers, so the token travels as a query
    /// parameter
    pub token: Option<String>,
}

/// SSE stream of verified artifacts for the authority dashboard
pub async fn hotspots_stream(
    State(state): State<AppState>,
    Query(query): Query<StreamQuery>,
) -> impl IntoResponse {
    match authorize(&state, &query, Some(Role::Authority)) {
        Ok(()) => {}
        Err(response) => return response.into_response(),
    }
    open_stream(state, topics::HOTSPOTS).await.into_response()
}

/// SSE stream of new posts for any authenticated client
pub async fn posts_stream(
    State(state): State<AppState>,
    Query(query): Query<StreamQuery>,
) -> impl IntoResponse {
    match authorize(&state, &query, None) {
        Ok(()) => {}
        Err(response) => return response.into_response(),
    }
    open_stream(state, topics::POSTS).await.into_response()
}

fn authorize(
    state: &AppState,
    query: &StreamQuery,
    required_role: Option<Role>,
) -> Result<(), (StatusCode, Json<serde_json::Value>)> {
    let token = query
        .token
        .as_deref()
        .ok_or_else(|| error_response(StatusCode::UNAUTHORIZED, "no token provided"))?;

    let identity = state
        .auth
        .authenticate(token)
        .map_err(|_| error_response(StatusCode::UNAUTHORIZED, "invalid token"))?;

    if let Some(role) = required_role {
        if identity.role != role {
            return Err(error_response(StatusCode::FORBIDDEN, "insufficient role"));
        }
    }
    Ok(())
}

async fn open_stream(
    state: AppState,
    topic: &'static str,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // Snapshot is taken at subscribe time; reconnection restarts from a
    // fresh one, there is no resume-from-offset.
    let snapshot = match state.store.snapshot(topic).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!(topic, "snapshot failed, seeding empty: {e}");
            Vec::new()
        }
    };

    let subscription = state.hub.subscribe(topic);
    let keepalive = state.keepalive;

    let first = stream::once(async move { envelope_event(&Envelope::Snapshot(snapshot)) });
    let live = stream::unfold(subscription, move |mut subscription| async move {
        match subscription.next(keepalive).await {
            StreamEvent::Message(envelope) => Some((envelope_event(&envelope), subscription)),
            StreamEvent::Keepalive => Some((envelope_event(&Envelope::Keepalive), subscription)),
            StreamEvent::Closed => None,
        }
    });

    Sse::new(first.chain(live))
}

fn envelope_event(envelope: &Envelope) -> Result<Event, Infallible> {
    match Event::default().json_data(envelope) {
        Ok(event) => Ok(event),
        Err(e) => {
            error!("failed to serialize stream envelope: {e}");
            Ok(Event::default().data("{\"type\":\"keepalive\"}"))
        }
    }
}
