
#[cfg(target_arch = "wasm32")]
mod browser_tests;
