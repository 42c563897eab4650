use {
    crate::{
        analysis,
        error::AppResult,
        models::{TextInput, TextReport},
    },
    rocket::{post, serde::json::Json},
};

#[post("/testai/<model_name>", data = "<input>")]
pub fn test_ai(model_name: &str, input: Json<TextInput>) -> AppResult<Json<TextReport>> {
    analysis::analyze_text(&mut rand::rng(), model_name, &input.text).map(Json)
}
