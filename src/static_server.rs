use http::header::CONTENT_TYPE;
use http::StatusCode;
use rust_embed::RustEmbed;
use mime_guess::from_path;
use crate::core::errors::ApiError;
use crate::Response;

#[derive(RustEmbed)]
#[folder = "static"]
pub struct Assets;

pub fn asset_text(name: &str) -> anyhow::Result<String> {
    let file = Assets::get(name)
        .ok_or_else(|| anyhow::anyhow!("Asset {} not embedded", name))?;
    Ok(String::from_utf8(file.data.into_owned())?)
}

pub fn serve_static(path: &str) -> anyhow::Result<Response> {
    let file_path = path.trim_start_matches('/');

    let Some(file) = Assets::get(file_path) else {
        log::warn!("no static asset for {}", path);
        return Ok(ApiError::NotFound("File not found".to_string()).into());
    };

    let mime = from_path(file_path).first_or_octet_stream();

    Ok(http::Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, mime.as_ref())
        .body(file.data.into_owned())?)
}
