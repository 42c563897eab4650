use rocket::fs::TempFile;

/// The filename as the client sent it. Only ever echoed back in a JSON body,
/// never used to touch the filesystem.
pub fn display_name<'a>(file: &'a TempFile<'_>) -> Option<&'a str> {
    file.raw_name()
        .map(|name| name.dangerous_unsafe_unsanitized_raw().as_str())
        .filter(|name| !name.is_empty())
}
