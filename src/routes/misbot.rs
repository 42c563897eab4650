use {
    crate::{
        models::{RelayOutcome, RelayRequest},
        state::AppState,
    },
    rocket::{State, post, serde::json::Json},
};

/// Always 200: relay failures are carried in the body as `{"error": ...}`.
#[post("/misbot", data = "<input>")]
pub async fn misbot(input: Json<RelayRequest>, state: &State<AppState>) -> Json<RelayOutcome> {
    Json(state.relay.ask(&input).await)
}
