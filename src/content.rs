/// Content script: message listener running inside the Redmine page

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::dom::{DomPage, install_hidden_style};
use crate::messages::{Reply, Request, Response, route};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["chrome", "runtime", "onMessage"], js_name = addListener)]
    fn add_message_listener(listener: &Closure<dyn FnMut(JsValue, JsValue, js_sys::Function) -> JsValue>);
}

pub fn start() -> Result<(), JsValue> {
    let page = DomPage::current().ok_or("content script has no document")?;

    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        install_hidden_style(&document)?;
    }

    let listener = Closure::<dyn FnMut(JsValue, JsValue, js_sys::Function) -> JsValue>::new(
        move |message: JsValue, _sender: JsValue, send_response: js_sys::Function| {
            handle_message(page.clone(), message, send_response)
        },
    );
    add_message_listener(&listener);
    // The listener lives as long as the page
    listener.forget();

    log::info!("Redmine Formatter content script ready");
    Ok(())
}

/// Answer one runtime message. Returns `true` when the response will be
/// sent asynchronously and `undefined` otherwise.
pub fn handle_message(page: DomPage, message: JsValue, send_response: js_sys::Function) -> JsValue {
    let request: Request = match serde_wasm_bindgen::from_value(message) {
        Ok(request) => request,
        Err(e) => {
            log::debug!("Ignoring unrecognized message: {}", e);
            return JsValue::UNDEFINED;
        }
    };

    match route(page, request) {
        Reply::Immediate(response) => {
            respond(&send_response, &response);
            JsValue::UNDEFINED
        }
        Reply::Deferred(pending) => {
            spawn_local(async move {
                let response = pending.await;
                respond(&send_response, &response);
            });
            JsValue::TRUE
        }
    }
}

fn respond(send_response: &js_sys::Function, response: &Response) {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let value = match response.serialize(&serializer) {
        Ok(value) => value,
        Err(e) => {
            log::error!("Failed to serialize response: {}", e);
            return;
        }
    };

    if let Err(e) = send_response.call1(&JsValue::NULL, &value) {
        log::error!("sendResponse failed: {:?}", e);
    }
}
