//! Saving downloaded bytes as a file on the user's device.

use gloo::file::{Blob, ObjectUrl};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

/// Time the browser gets to start reading a clicked object URL
const REVOKE_DELAY_MS: u32 = 60_000;

/// Hand `bytes` to the browser as a file download named `file_name`.
///
/// A transient anchor pointing at an object URL is clicked and removed.
/// The URL is revoked a while later, since the download starts after the
/// click returns.
pub fn save_file(bytes: &[u8], file_name: &str, mime_type: &str) -> Result<(), String> {
    let blob = Blob::new_with_options(bytes, Some(mime_type));
    let url = ObjectUrl::from(blob);

    let document = gloo::utils::document();
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("Failed to create link: {:?}", e))?
        .dyn_into()
        .map_err(|_| "Created element is not an anchor".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(file_name);

    let body = gloo::utils::body();
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to attach link: {:?}", e))?;
    anchor.click();
    anchor.remove();
    revoke_later(url);

    Ok(())
}

/// Keep `url` alive until the delay passes, then revoke it
fn revoke_later(url: ObjectUrl) {
    Timeout::new(REVOKE_DELAY_MS, move || drop(url)).forget();
}
