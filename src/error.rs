use {
    rocket::{
        Request, catch,
        http::Status,
        response::{self, Responder},
        serde::json::Json,
    },
    serde::Serialize,
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),
}

impl AppError {
    pub fn invalid_input(detail: impl Into<String>) -> Self {
        AppError::InvalidInput(detail.into())
    }

    pub fn status(&self) -> Status {
        match self {
            AppError::InvalidInput(_) => Status::BadRequest,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        tracing::debug!(error = %self, path = %req.uri(), "rejecting request");
        let body = ErrorBody {
            detail: self.to_string(),
        };
        rocket::response::status::Custom(status, Json(body)).respond_to(req)
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Renders framework-level failures (unknown route, unparseable JSON body,
/// panics) in the same `{detail}` shape as handler errors.
#[catch(default)]
pub fn default_catcher(status: Status, req: &Request<'_>) -> (Status, Json<ErrorBody>) {
    let detail = match status.code {
        404 => format!("No route for {} {}", req.method(), req.uri().path()),
        422 => "Request body could not be parsed".to_owned(),
        _ => status.reason().unwrap_or("Unknown error").to_owned(),
    };
    (status, Json(ErrorBody { detail }))
}
