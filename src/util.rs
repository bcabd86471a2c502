// Logging and formatting helpers.
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

pub fn clog(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&JsValue::from_str(msg));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

pub fn cwarn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(msg));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

pub fn format_zoom(percent: i64) -> String {
    format!("{}%", percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_label() {
        assert_eq!(format_zoom(100), "100%");
        assert_eq!(format_zoom(250), "250%");
    }
}
