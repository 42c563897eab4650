use {
    crate::{analysis, error::AppResult, models::VideoReport, routes::media},
    rocket::{FromForm, form::Form, fs::TempFile, post, serde::json::Json},
};

#[derive(FromForm)]
pub struct VideoUpload<'r> {
    pub video: Option<TempFile<'r>>,
}

#[post("/testvideo", data = "<upload>")]
pub fn test_video(upload: Option<Form<VideoUpload<'_>>>) -> AppResult<Json<VideoReport>> {
    let filename = upload
        .as_ref()
        .and_then(|form| form.video.as_ref())
        .and_then(media::display_name);
    analysis::analyze_video(&mut rand::rng(), filename).map(Json)
}
