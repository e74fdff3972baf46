use html_escape::encode_text;
use regex::{Captures, Regex};
use std::sync::OnceLock;
use crate::static_server::asset_text;

fn placeholder_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"PAGE_HEAD|PAGE_TITLE|NAV_BAR|PAGE_MAIN").expect("Regex should compile")
    })
}

/// Wrap page content in `static/layout.html`.
///
/// `head` is inserted raw into `<head>`; everything else is pre-rendered HTML
/// except `title`, which is escaped. Placeholders are filled in a single pass
/// over the template, so inserted text is never matched again.
pub fn render_page(title: &str, head: &str, nav: &str, main: &str) -> anyhow::Result<String> {
    let template = asset_text("layout.html")?;
    let title = encode_text(title);

    let html = placeholder_regex().replace_all(&template, |caps: &Captures| match &caps[0] {
        "PAGE_HEAD" => head.to_string(),
        "PAGE_TITLE" => title.to_string(),
        "NAV_BAR" => nav.to_string(),
        _ => main.to_string(),
    });

    Ok(html.into_owned())
}

/// Spinner shown while fixture data has not "arrived"; the page reloads
/// itself until it has.
pub fn loading_head() -> &'static str {
    r#"<meta http-equiv="refresh" content="1">"#
}

pub fn render_loading() -> &'static str {
    r#"<div class="loading" role="status" aria-label="Loading"><span class="spinner"></span></div>"#
}

pub fn render_empty(message: &str) -> String {
    format!(r#"<div class="empty-state"><p>{}</p></div>"#, encode_text(message))
}
