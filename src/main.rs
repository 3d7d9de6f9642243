//! Page-Flip CLI (for testing purposes only)
//! The main interface is through WASM bindings.

fn main() {
    println!("Page-Flip Core");
    println!("==============");
    println!();
    println!("This is a library crate. To use it:");
    println!();
    println!("  1. Build WASM: wasm-pack build --target web");
    println!("  2. Create a WasmFlip or WasmBook, apply the JSON patches from");
    println!("     takePatches() to your elements, and forward pointer events.");
    println!();
    println!("For testing the core library:");
    println!("  cargo test");
}
