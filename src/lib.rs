//! ClearLabel Core: Brand Scanner + In-Place Annotation Engine
//!
//! A Rust/WASM implementation of the ClearLabel page scanner.
//!
//! # Architecture
//!
//! ## Scanner Components
//! - `dictionary.rs` - Dictionary: brands, name variants, category memberships
//! - `dom.rs` - DocumentTree: the seam between the scanner and a live document
//! - `memory.rs` - MemoryDocument: arena-backed tree (host-side scans, tests)
//! - `browser.rs` - BrowserDocument: `web-sys` backed tree for the content script
//! - `visibility.rs` - VisibilityFilter: which text nodes are eligible for scanning
//! - `matcher.rs` - Matcher: longest-first, non-overlapping brand matching
//! - `annotator.rs` - Annotator: wraps matches in place, reverts them losslessly
//! - `controller.rs` - ScanController: Inactive/Active state machine + aggregation
//! - `request.rs` - Request/Response: tagged messages from the extension
//! - `wasm.rs` - BrandScanner: JS bindings and async host bootstrap
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { bootstrap } from 'clearlabel-core';
//!
//! await init();
//!
//! // Host object supplies the dictionary and stored preferences
//! const scanner = await bootstrap({
//!   getDictionary: () => fetch(chrome.runtime.getURL('brandList.json')).then(r => r.json()),
//!   getEnabledCategories: () => chrome.storage.local.get(['enabledCategories']).then(r => r.enabledCategories),
//!   getAutoScanEnabled: () => chrome.storage.local.get(['autoScanEnabled']).then(r => r.autoScanEnabled),
//! });
//!
//! chrome.runtime.onMessage.addListener((message, sender, sendResponse) => {
//!   sendResponse(scanner.handleMessage(message));
//! });
//! ```

pub mod scanner;

pub use scanner::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("clearlabel-core v{}", env!("CARGO_PKG_VERSION"))
}
