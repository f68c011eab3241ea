use js_sys::Date;
use shared::START_TIME_PLACEHOLDER;
use wasm_bindgen::JsValue;

/// Current wall-clock time in whole seconds since the Unix epoch.
pub fn now_unix_seconds() -> i64 {
    (Date::now() / 1000.0).floor() as i64
}

/// Formats a start time with the browser's locale, or the placeholder when
/// there is none.
pub fn format_start_time(start_time_seconds: Option<i64>) -> String {
    match start_time_seconds {
        Some(seconds) => {
            let date = Date::new(&JsValue::from_f64(seconds as f64 * 1000.0));
            String::from(date.to_locale_string("default", &JsValue::UNDEFINED))
        }
        None => START_TIME_PLACEHOLDER.to_string(),
    }
}
