//! WASM bindings: `BrandScanner` over the live page, and the async bootstrap
//! that pulls dictionary and preferences from the extension host.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use super::browser::BrowserDocument;
use super::config::ScannerConfig;
use super::controller::{DetectedBrand, DetectedResult, Preferences, ScanController};
use super::dictionary::Dictionary;
use super::error::ParseError;
use super::request::Request;

/// Brand scanner bound to `document.body`
#[wasm_bindgen]
pub struct BrandScanner {
    controller: ScanController<BrowserDocument>,
}

#[wasm_bindgen]
impl BrandScanner {
    /// Create a scanner with an optional configuration object
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<BrandScanner, JsValue> {
        let config: ScannerConfig = if config.is_null() || config.is_undefined() {
            ScannerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };
        config
            .validate()
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;

        let document = BrowserDocument::from_window().map_err(|e| JsValue::from_str(&format!("{}", e)))?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("Document has no body"))?;

        Ok(Self {
            controller: ScanController::new(document, body, config),
        })
    }

    /// Install a dictionary payload (object, legacy array, or JSON string)
    #[wasm_bindgen(js_name = hydrateDictionary)]
    pub fn hydrate_dictionary(&mut self, raw: JsValue) -> Result<(), JsValue> {
        let dictionary = dictionary_from_js(raw).map_err(|e| JsValue::from_str(&format!("Failed to parse dictionary: {}", e)))?;
        self.controller.hydrate(dictionary);
        Ok(())
    }

    /// Install dictionary and stored preferences together; runs the auto-scan
    /// if enabled. A malformed dictionary falls back to an empty one.
    #[wasm_bindgen(js_name = initialize)]
    pub fn initialize(&mut self, dictionary: JsValue, preferences: JsValue) -> Result<JsValue, JsValue> {
        let preferences: Preferences = if preferences.is_null() || preferences.is_undefined() {
            Preferences::default()
        } else {
            serde_wasm_bindgen::from_value(preferences)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse preferences: {}", e)))?
        };
        let detected = self.controller.initialize(dictionary_from_js(dictionary), preferences);
        to_js(&detected)
    }

    #[wasm_bindgen(js_name = onToggleScan)]
    pub fn on_toggle_scan(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.controller.toggle_scan())
    }

    #[wasm_bindgen(js_name = onUpdateCategories)]
    pub fn on_update_categories(&mut self, categories: JsValue) -> Result<JsValue, JsValue> {
        let categories: Vec<String> = serde_wasm_bindgen::from_value(categories)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse categories: {}", e)))?;
        to_js(&self.controller.update_categories(categories))
    }

    #[wasm_bindgen(js_name = onQueryDetected)]
    pub fn on_query_detected(&self) -> Result<JsValue, JsValue> {
        to_js(&self.controller.query_detected())
    }

    #[wasm_bindgen(js_name = onUpdateAutoScan)]
    pub fn on_update_auto_scan(&mut self, enabled: bool) -> Result<JsValue, JsValue> {
        to_js(&self.controller.update_auto_scan(enabled))
    }

    /// Dispatch an extension message such as `{ type: "toggle_highlighting" }`
    #[wasm_bindgen(js_name = handleMessage)]
    pub fn handle_message(&mut self, message: JsValue) -> Result<JsValue, JsValue> {
        let request: Request = serde_wasm_bindgen::from_value(message)
            .map_err(|e| JsValue::from_str(&format!("Unknown message: {}", e)))?;
        let response = self.controller.handle(request);
        serde_wasm_bindgen::to_value(&response)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Register `callback(detected)`, invoked on every state change
    #[wasm_bindgen(js_name = setDetectionListener)]
    pub fn set_detection_listener(&mut self, callback: js_sys::Function) {
        let sink = move |detected: &[DetectedBrand]| match serde_wasm_bindgen::to_value(&detected) {
            Ok(value) => {
                if let Err(e) = callback.call1(&JsValue::NULL, &value) {
                    web_sys::console::error_1(&e);
                }
            }
            Err(e) => {
                web_sys::console::error_1(&format!("[BrandScanner] Serialization failed: {}", e).into());
            }
        };
        self.controller.set_sink(Box::new(sink));
    }

    /// "inactive" or "active"
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.controller.state().name().to_string()
    }

    #[wasm_bindgen(js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.controller.is_ready()
    }

    #[wasm_bindgen(js_name = getStats)]
    pub fn get_stats(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.controller.last_stats())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Entity count per dictionary category, in dictionary order
    #[wasm_bindgen(js_name = getCategoryCounts)]
    pub fn get_category_counts(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.controller.category_counts())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Distinct brand names currently annotated on the page
    #[wasm_bindgen(js_name = getAnnotatedBrands)]
    pub fn get_annotated_brands(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.controller.annotated_brands())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

/// Build a scanner from a host object exposing `getDictionary`,
/// `getEnabledCategories` and `getAutoScanEnabled` (each may return a
/// Promise). Fetch failures fall back to defaults and are logged.
#[wasm_bindgen]
pub async fn bootstrap(host: JsValue, config: JsValue) -> Result<BrandScanner, JsValue> {
    let mut scanner = BrandScanner::new(config)?;

    let dictionary = match call_host(&host, "getDictionary").await {
        Ok(raw) => dictionary_from_js(raw),
        Err(e) => Err(ParseError::Payload(format!("getDictionary failed: {:?}", e))),
    };

    let enabled_categories = match call_host(&host, "getEnabledCategories").await {
        Ok(value) if value.is_null() || value.is_undefined() => None,
        Ok(value) => match serde_wasm_bindgen::from_value::<Vec<String>>(value) {
            Ok(categories) => Some(categories),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring malformed enabled categories");
                None
            }
        },
        Err(e) => {
            tracing::warn!(error = ?e, "getEnabledCategories failed");
            None
        }
    };

    let auto_scan_enabled = match call_host(&host, "getAutoScanEnabled").await {
        Ok(value) => value.as_bool(),
        Err(e) => {
            tracing::warn!(error = ?e, "getAutoScanEnabled failed");
            None
        }
    };

    scanner.controller.initialize(
        dictionary,
        Preferences {
            enabled_categories,
            auto_scan_enabled,
        },
    );
    Ok(scanner)
}

/// Call `host[name]()` and await the result. A missing function yields `undefined`.
async fn call_host(host: &JsValue, name: &str) -> Result<JsValue, JsValue> {
    let value = js_sys::Reflect::get(host, &JsValue::from_str(name))?;
    let Some(function) = value.dyn_ref::<js_sys::Function>() else {
        return Ok(JsValue::UNDEFINED);
    };
    let returned = function.call0(host)?;
    JsFuture::from(js_sys::Promise::resolve(&returned)).await
}

fn dictionary_from_js(raw: JsValue) -> Result<Dictionary, ParseError> {
    if raw.is_null() || raw.is_undefined() {
        return Err(ParseError::Payload("no dictionary returned".to_string()));
    }
    if let Some(text) = raw.as_string() {
        return Dictionary::load(&text);
    }
    let value: serde_json::Value =
        serde_wasm_bindgen::from_value(raw).map_err(|e| ParseError::Payload(e.to_string()))?;
    Dictionary::from_value(value)
}

fn to_js(detected: &DetectedResult) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(detected).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
