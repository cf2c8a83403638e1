//! Browser HTTP transport for the music API.
//!
//! `GET /api/music` goes through `gloo-net`. The upload uses a raw
//! `XMLHttpRequest` because `fetch` exposes no upload progress.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use gloo_net::http::Request;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, File, FormData, ProgressEvent, XmlHttpRequest};

use uploader_core::{PendingFile, ProgressSender, Reply, Transport, TransportError};

/// [`Transport`] backed by the browser's networking.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

impl Transport for BrowserTransport {
    type Payload = File;

    async fn get(&self, url: &str) -> Result<Reply, TransportError> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| TransportError::Network(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(format!("Failed to read body: {}", e)))?;

        Ok(Reply::new(status, body))
    }

    async fn post_multipart(
        &self,
        url: &str,
        field: &str,
        file: &PendingFile<File>,
        progress: ProgressSender,
    ) -> Result<Reply, TransportError> {
        let form_data = FormData::new().map_err(|e| js_error("Failed to create FormData", e))?;
        form_data
            .append_with_blob_and_filename(field, &file.payload, &file.name)
            .map_err(|e| js_error("Failed to append file", e))?;

        let xhr = XmlHttpRequest::new().map_err(|e| js_error("Failed to create request", e))?;
        xhr.open_with_async("POST", url, true)
            .map_err(|e| js_error("Failed to open request", e))?;
        let upload = xhr.upload().map_err(|e| js_error("No upload target", e))?;

        // Resolved once by whichever of load/error/abort fires first.
        let (done_tx, done_rx) = oneshot::channel::<Result<(), String>>();
        let done_tx = Rc::new(RefCell::new(Some(done_tx)));

        let on_progress = Closure::wrap(Box::new(move |event: ProgressEvent| {
            if event.length_computable() {
                progress.report(event.loaded() as u64, event.total() as u64);
            }
        }) as Box<dyn FnMut(ProgressEvent)>);

        let load_tx = done_tx.clone();
        let on_load = Closure::wrap(Box::new(move |_: Event| {
            if let Some(tx) = load_tx.borrow_mut().take() {
                let _ = tx.send(Ok(()));
            }
        }) as Box<dyn FnMut(Event)>);

        let error_tx = done_tx.clone();
        let on_error = Closure::wrap(Box::new(move |event: Event| {
            if let Some(tx) = error_tx.borrow_mut().take() {
                let _ = tx.send(Err(format!("request {}", event.type_())));
            }
        }) as Box<dyn FnMut(Event)>);

        upload.set_onprogress(Some(on_progress.as_ref().unchecked_ref()));
        xhr.set_onload(Some(on_load.as_ref().unchecked_ref()));
        xhr.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        xhr.set_onabort(Some(on_error.as_ref().unchecked_ref()));

        xhr.send_with_opt_form_data(Some(&form_data))
            .map_err(|e| js_error("Failed to send request", e))?;

        let outcome = done_rx
            .await
            .unwrap_or_else(|_| Err("request dropped".to_string()));

        // Detach before the closures (and the progress sender they own) drop.
        upload.set_onprogress(None);
        xhr.set_onload(None);
        xhr.set_onerror(None);
        xhr.set_onabort(None);
        drop(on_progress);

        outcome.map_err(TransportError::Network)?;

        let status = xhr.status().map_err(|e| js_error("Failed to read status", e))?;
        let body = xhr
            .response_text()
            .map_err(|e| js_error("Failed to read body", e))?
            .unwrap_or_default();

        Ok(Reply::new(status, body))
    }
}

fn js_error(context: &str, value: JsValue) -> TransportError {
    TransportError::Network(format!("{}: {:?}", context, value))
}
