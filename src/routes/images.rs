use {
    crate::{analysis, error::AppResult, models::ImageReport, routes::media},
    rocket::{FromForm, form::Form, fs::TempFile, post, serde::json::Json},
};

#[derive(FromForm)]
pub struct ImageUpload<'r> {
    pub image: Option<TempFile<'r>>,
}

/// A body that is not a readable form lands here as `None` and is reported
/// the same way as a form without an `image` field.
#[post("/testimage", data = "<upload>")]
pub fn test_image(upload: Option<Form<ImageUpload<'_>>>) -> AppResult<Json<ImageReport>> {
    let filename = upload
        .as_ref()
        .and_then(|form| form.image.as_ref())
        .and_then(media::display_name);
    analysis::analyze_image(&mut rand::rng(), filename).map(Json)
}
