//! Browser smoke tests for the WASM bindings

#![cfg(target_arch = "wasm32")]

use page_flip::{WasmBook, WasmFlip};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn book_navigation() {
    let mut book = WasmBook::new(r#"{"display": "double"}"#, 800.0, 600.0)
        .ok()
        .expect("book");
    for _ in 0..4 {
        let content = book.create_content();
        assert!(book.add_page(content, None).is_ok());
    }

    assert_eq!(book.page_count(), 4);
    assert_eq!(book.view(), vec![1, 2]);
    assert!(book.next());
    assert_eq!(book.view(), vec![3, 4]);
    assert!(book.set_display("triple").is_err());
    assert!(book.set_page(9).is_err());

    let patches = book.take_patches().ok().expect("patches");
    assert!(patches.starts_with('['));
}

#[wasm_bindgen_test]
fn flip_turn() {
    let mut flip = WasmFlip::new("{}", 400.0, 300.0).ok().expect("flip");
    assert!(flip.start(390.0, 10.0));
    assert!(flip.move_to(300.0, 60.0));
    assert!(flip.end());
    assert!(flip.flip("xx").is_err());
    let patches = flip.take_patches().ok().expect("patches");
    assert!(patches.contains("scheduleTimer"));
}
