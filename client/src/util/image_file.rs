//! Reading uploaded image files into embeddable data URLs.

#[cfg(test)]
#[path = "image_file_test.rs"]
mod image_file_test;

#[cfg(feature = "csr")]
use editor::model::EncodedImage;

/// `accept` attribute for image file inputs.
pub const IMAGE_ACCEPT: &str = "image/*";

pub fn is_image_mime(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}

/// First selected file of a file input, if any.
#[cfg(feature = "csr")]
pub fn first_file(input: &web_sys::HtmlInputElement) -> Option<web_sys::File> {
    input.files()?.get(0)
}

/// Read an image file into a data URL.
///
/// # Errors
///
/// Returns a user-facing message if the file is not an image or cannot be read.
#[cfg(feature = "csr")]
pub async fn read_image(file: &web_sys::File) -> Result<EncodedImage, String> {
    let mime = file.type_();
    if !is_image_mime(&mime) {
        return Err(format!("{} is not an image", file.name()));
    }
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("could not read {}: {e:?}", file.name()))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    log::debug!("read {} ({} bytes)", file.name(), bytes.len());
    Ok(EncodedImage::from_bytes(&mime, &bytes))
}
