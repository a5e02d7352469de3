use axum::{
    extract::{Extension, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;

use crate::api::AppState;
use crate::auth::AuthUser;

/// Streams the caller's own board and task changes.
pub async fn events_handler(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.events_tx.subscribe();
    let user_id = auth_user.user_id;

    let event_stream = BroadcastStream::new(rx).filter_map(move |result| match result {
        Ok(event) if event.user_id() == user_id => match Event::default().json_data(&event) {
            Ok(sse_event) => Some(Ok(sse_event)),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode board event");
                None
            }
        },
        Ok(_) => None,
        // Lagged receivers skip what they missed.
        Err(_) => None,
    });

    Sse::new(event_stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
