use {
    crate::{
        error,
        fairings::{Cors, RequestTrace},
        routes,
        state::{AppState, GeminiConfig},
    },
    rocket::{
        Build, Rocket, catchers,
        data::{ByteUnit, Limits, ToByteUnit},
        routes,
    },
};

/// Uploads are accepted whole; nothing inspects them beyond the filename.
fn media_limit() -> ByteUnit {
    256.mebibytes()
}

pub fn build(state: AppState) -> Rocket<Build> {
    let limits = Limits::default()
        .limit("file", media_limit())
        .limit("data-form", media_limit());
    let figment = rocket::Config::figment().merge(("limits", limits));

    rocket::custom(figment)
        .manage(state)
        .attach(Cors)
        .attach(RequestTrace)
        .mount(
            "/",
            routes![
                routes::index,
                routes::health,
                routes::preflight,
                routes::text::test_ai,
                routes::images::test_image,
                routes::videos::test_video,
                routes::misbot::misbot,
            ],
        )
        .register("/", catchers![error::default_catcher])
}

pub fn run() -> color_eyre::Result<Rocket<Build>> {
    let gemini = GeminiConfig::from_env();
    if gemini.api_key.is_some() {
        tracing::info!(model = %gemini.model, api_base = %gemini.api_base, "relay configured");
    } else {
        tracing::warn!("GEMINI_API_KEY not set, /misbot will answer with an error");
    }

    let state = AppState::new(gemini)?;
    Ok(build(state))
}
