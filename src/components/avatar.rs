use html_escape::{encode_double_quoted_attribute, encode_text};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AvatarSize {
    Sm,
    Md,
    Lg,
    Xl,
}

impl AvatarSize {
    fn class(self) -> &'static str {
        match self {
            AvatarSize::Sm => "avatar-sm",
            AvatarSize::Md => "avatar-md",
            AvatarSize::Lg => "avatar-lg",
            AvatarSize::Xl => "avatar-xl",
        }
    }
}

/// Uppercased first character of `username`, or `?` when there is none.
pub fn initial(username: &str) -> String {
    username
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

/// Round avatar with an initial underneath the image. If the image is
/// missing or fails to load, the initial is what shows. `alt` falls back to
/// the username.
pub fn render_avatar(
    src: Option<&str>,
    username: &str,
    alt: Option<&str>,
    size: AvatarSize,
    extra_class: Option<&str>,
) -> String {
    let mut classes = format!("avatar avatar-ring {}", size.class());
    if let Some(extra) = extra_class.filter(|c| !c.is_empty()) {
        classes.push(' ');
        classes.push_str(extra);
    }

    let image = match src.filter(|s| !s.is_empty()) {
        Some(src) => format!(
            r#"<img class="avatar-image" src="{}" alt="{}" onerror="this.remove()">"#,
            encode_double_quoted_attribute(src),
            encode_double_quoted_attribute(alt.unwrap_or(username)),
        ),
        None => String::new(),
    };

    format!(
        r#"<span class="{}"><span class="avatar-fallback">{}</span>{}</span>"#,
        encode_double_quoted_attribute(&classes),
        encode_text(&initial(username)),
        image,
    )
}
