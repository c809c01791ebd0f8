// Browser tests for the DOM wiring. Run with
// `wasm-pack test --headless --chrome` (or --firefox).
#![cfg(target_arch = "wasm32")]

use js_sys::Promise;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Document, window};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    window().unwrap().document().unwrap()
}

async fn sleep(ms: i32) {
    let promise = Promise::new(&mut |resolve, _| {
        window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn mount_fixture(doc: &Document) {
    let body = doc.body().unwrap();
    body.set_inner_html(
        r##"
        <div id="loader">
          <div class="loader-progress"></div><span class="loader-percent">0%</span>
        </div>
        <nav id="navbar"><button id="nav-toggle"></button>
          <ul id="nav-menu"><li><a class="nav-link active" href="#home">Home</a></li></ul>
        </nav>
        <section id="home"><span class="typing-text"></span></section>
        <form id="contact-form"><button type="submit">Send</button></form>
        "##,
    );
}

#[wasm_bindgen_test]
fn unknown_config_keys_are_rejected() {
    assert!(folio_fx::start_site_with_config(r#"{"noSuchKey": 1}"#).is_err());
}

#[wasm_bindgen_test]
async fn page_boots_loads_and_shows_toasts() {
    let doc = document();
    mount_fixture(&doc);
    let fast = r#"{
        "loader": {"tickMs": 1, "maxIncrement": 100, "settleMs": 1},
        "notification": {"enterDelayMs": 1, "dwellMs": 20, "exitMs": 5}
    }"#;
    folio_fx::start_site_with_config(fast).unwrap();

    assert!(folio_fx::show_notification("hello", "info"));
    assert_eq!(doc.query_selector_all(".notification").unwrap().length(), 1);

    sleep(200).await;
    assert!(folio_fx::page_loaded());
    let loader = doc.get_element_by_id("loader").unwrap();
    assert!(loader.class_list().contains("fade-out"));
    let percent = doc.query_selector(".loader-percent").unwrap().unwrap();
    assert_eq!(percent.text_content().as_deref(), Some("100%"));
    assert_eq!(doc.query_selector_all(".notification").unwrap().length(), 0);
}

fn focus_styles(doc: &Document) -> u32 {
    let styles = doc.query_selector_all("head style").unwrap();
    (0..styles.length())
        .filter_map(|i| styles.get(i)?.text_content())
        .filter(|text| text.contains(".keyboard-navigation"))
        .count() as u32
}

#[wasm_bindgen_test]
fn broken_feature_does_not_stop_later_ones() {
    let doc = document();
    doc.body().unwrap().set_inner_html(
        r#"<div id="contact-form"><button type="submit">Send</button></div>"#,
    );
    let before = focus_styles(&doc);

    // The contact form is not a <form>, so its wiring fails; the keyboard
    // focus styles are installed after it and must still appear.
    folio_fx::start_site().unwrap();
    assert_eq!(focus_styles(&doc), before + 1);
}
