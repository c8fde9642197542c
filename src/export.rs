use std::io::Cursor;

use crate::canvas::Canvas;
use crate::error::ExportError;

/// Encode the canvas as a PNG image.
pub fn encode_png(canvas: &Canvas) -> Result<Vec<u8>, ExportError> {
    let image = canvas.to_rgba_image().ok_or(ExportError::EmptyCanvas)?;
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

/// Save the canvas under `file_name`.
///
/// Natively this writes into the working directory; in the browser it
/// triggers a client-side download.
pub fn save_png(canvas: &Canvas, file_name: &str) -> Result<(), ExportError> {
    let bytes = encode_png(canvas)?;
    log::info!("exporting {} bytes as {file_name}", bytes.len());
    deliver(&bytes, file_name)
}

#[cfg(not(target_arch = "wasm32"))]
fn deliver(bytes: &[u8], file_name: &str) -> Result<(), ExportError> {
    std::fs::write(file_name, bytes)?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn deliver(bytes: &[u8], file_name: &str) -> Result<(), ExportError> {
    use eframe::wasm_bindgen::JsCast as _;

    let web_err = |err: eframe::wasm_bindgen::JsValue| ExportError::Web(format!("{err:?}"));

    let window = web_sys::window().ok_or_else(|| ExportError::Web("no window".to_owned()))?;
    let document = window
        .document()
        .ok_or_else(|| ExportError::Web("no document".to_owned()))?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(web_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(web_err)?;

    let link = document
        .create_element("a")
        .map_err(web_err)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| ExportError::Web("not an anchor element".to_owned()))?;
    link.set_href(&url);
    link.set_download(file_name);
    link.click();

    web_sys::Url::revoke_object_url(&url).map_err(web_err)?;
    Ok(())
}
