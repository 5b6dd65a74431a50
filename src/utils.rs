use axum::http::HeaderValue;
use color_eyre::Result;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const COOKIE_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 30;

pub fn cookie(name: &str, value: &str, secure: bool) -> Result<HeaderValue> {
    let secure = if secure { "; Secure" } else { "" };
    let cookie = format!(
        "{name}={value}; HttpOnly; Max-Age={COOKIE_MAX_AGE_SECS}; Path=/; SameSite=Strict{secure}"
    );
    Ok(cookie.parse()?)
}

pub fn clear_cookie(name: &str, secure: bool) -> Result<HeaderValue> {
    let secure = if secure { "; Secure" } else { "" };
    let cookie = format!("{name}=; HttpOnly; Max-Age=0; Path=/; SameSite=Strict{secure}");
    Ok(cookie.parse()?)
}
