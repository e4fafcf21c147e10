use crate::model::AppId;
use regex::Regex;

lazy_static::lazy_static! {
    static ref APP_ID_PARAM: Regex = Regex::new(r"id=([A-Za-z0-9._]+)")
        .expect("app id pattern is valid");
}

/// Extract the `id` query parameter from a Play Store link.
///
/// `https://play.google.com/store/apps/details?id=com.mobile.legends&hl=en`
/// resolves to `com.mobile.legends`. The first `id=` followed by at least
/// one valid character wins, wherever it appears; otherwise `None`.
pub fn resolve_app_id(input: &str) -> Option<AppId> {
    APP_ID_PARAM
        .captures(input.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| AppId::new(m.as_str()))
}
