//! Hands finished exports to the user: a save dialog on native targets, a
//! browser download on the web.

use thiserror::Error;

use crate::export::ExportArtifact;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("could not write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("browser download failed: {0}")]
    Browser(String),
}

/// Whether the artifact reached the user or they dismissed the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Saved,
    Cancelled,
}

pub struct FileHandler;

impl FileHandler {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn deliver(artifact: &ExportArtifact) -> Result<Delivery, DeliveryError> {
        let extension = artifact.file_name.rsplit('.').next().unwrap_or_default();
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(artifact.file_name.as_str())
            .add_filter(artifact.mime_type, &[extension])
            .save_file()
        else {
            return Ok(Delivery::Cancelled);
        };
        std::fs::write(&path, &artifact.bytes)?;
        log::info!("Wrote {}", path.display());
        Ok(Delivery::Saved)
    }

    #[cfg(target_arch = "wasm32")]
    pub fn deliver(artifact: &ExportArtifact) -> Result<Delivery, DeliveryError> {
        use eframe::wasm_bindgen::JsCast;

        let js_err = |err: eframe::wasm_bindgen::JsValue| DeliveryError::Browser(format!("{err:?}"));

        let bytes = js_sys::Uint8Array::from(artifact.bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&bytes);
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(artifact.mime_type);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| DeliveryError::Browser("no document".to_owned()))?;
        let anchor = document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| DeliveryError::Browser("could not create a link".to_owned()))?;
        anchor.set_href(&url);
        anchor.set_download(&artifact.file_name);
        anchor.click();
        web_sys::Url::revoke_object_url(&url).map_err(js_err)?;
        log::info!("Downloaded {}", artifact.file_name);
        Ok(Delivery::Saved)
    }
}
