#![cfg(target_arch = "wasm32")]

use js_sys::{Object, Reflect};
use msgstyle_wasm::{contains_directives, render_message, render_messages};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn config(key: &str, value: JsValue) -> JsValue {
    let object = Object::new();
    Reflect::set(&object, &JsValue::from_str(key), &value).expect("set config field");
    object.into()
}

#[wasm_bindgen_test]
fn renders_with_default_options() {
    let html = render_message("*bold*", JsValue::UNDEFINED).expect("render should succeed");
    assert_eq!(
        html,
        r#"<span class="styling-directive">*</span><b>bold</b><span class="styling-directive">*</span>"#
    );

    let html = render_message("plain", JsValue::NULL).expect("render should succeed");
    assert_eq!(html, "plain");
}

#[wasm_bindgen_test]
fn styling_can_be_disabled() {
    let cfg = config("enableStyling", JsValue::FALSE);
    let html = render_message("*not bold* <b>", cfg).expect("render should succeed");
    assert_eq!(html, "*not bold* &lt;b&gt;");
}

#[wasm_bindgen_test]
fn invalid_config_is_an_error() {
    let cfg = config("sanitize", JsValue::from_str("yes"));
    assert!(render_message("*x*", cfg).is_err());
}

#[wasm_bindgen_test]
fn precheck() {
    assert!(contains_directives("> quote"));
    assert!(!contains_directives("nothing here"));
}

#[wasm_bindgen_test]
fn renders_many_in_order() {
    let out = render_messages(
        vec!["_a_".to_string(), "b".to_string(), "~c~".to_string()],
        JsValue::UNDEFINED,
    )
    .expect("render should succeed");
    assert_eq!(out.len(), 3);
    assert!(out[0].contains("<i>a</i>"));
    assert_eq!(out[1], "b");
    assert!(out[2].contains("<del>c</del>"));
}
