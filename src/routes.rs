pub mod images;
pub mod media;
pub mod misbot;
pub mod text;
pub mod videos;

use rocket::{get, http::Status, options, serde::json::Json};

pub const ROOT_MESSAGE: &str = "AI Fact-Checker Backend is running successfully!";

#[get("/")]
pub fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": ROOT_MESSAGE }))
}

#[get("/health")]
pub fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "factcheck-backend",
    }))
}

/// Answers CORS preflight for every path; the headers come from the `Cors` fairing.
#[options("/<_..>")]
pub fn preflight() -> Status {
    Status::NoContent
}
