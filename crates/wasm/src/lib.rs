use msgstyle_render::{MessageRenderer, Options, RenderContext, StylingError};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

fn parse_options(config: JsValue) -> Result<Options, JsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(Options::default());
    }
    serde_wasm_bindgen::from_value(config).map_err(|e| {
        let err = StylingError::invalid_config(e.to_string());
        JsError::new(&err.to_string())
    })
}

/// Renders one message body to sanitized styling markup.
///
/// `config` is an optional object such as `{ enableStyling: true, sanitize: true }`.
/// Missing fields use their defaults; a malformed object throws.
///
/// # Example (JavaScript)
///
/// ```javascript
/// import { renderMessage } from 'msgstyle-wasm';
///
/// renderMessage('*bold* and _italic_');
/// ```
#[wasm_bindgen(js_name = "renderMessage")]
pub fn render_message(text: &str, config: JsValue) -> Result<String, JsError> {
    let renderer = MessageRenderer::new(parse_options(config)?);
    Ok(renderer.render(text, RenderContext::root(&())).into_string())
}

/// Returns true if `text` contains any styling marker character.
///
/// A `false` result means `renderMessage` would only escape the text.
#[wasm_bindgen(js_name = "containsDirectives")]
pub fn contains_directives(text: &str) -> bool {
    msgstyle_core::contains_directives(text)
}

/// Renders several message bodies with the same options, in order.
#[wasm_bindgen(js_name = "renderMessages")]
pub fn render_messages(texts: Vec<String>, config: JsValue) -> Result<Vec<String>, JsError> {
    let renderer = MessageRenderer::new(parse_options(config)?);
    Ok(texts
        .iter()
        .map(|text| renderer.render(text, RenderContext::root(&())).into_string())
        .collect())
}
