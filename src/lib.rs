/// TabFlow - Chrome Extension for grouping tabs by domain
/// Built with Rust + WASM + Yew

pub mod actions;
pub mod activity;
pub mod background;
pub mod chrome;
pub mod config;
pub mod domain;
pub mod error;
pub mod grouping;
pub mod operations;
pub mod priority;
pub mod services;
pub mod storage;
pub mod suggestions;
pub mod tab_data;
pub mod ui;

#[cfg(test)]
mod testing;

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::background::{Background, Command, InstallReason};
use crate::chrome::{ChromeShell, ChromeStore, ChromeTabs, SystemClock};
use crate::tab_data::TabInfo;

type ChromeBackground = Background<ChromeStore, ChromeTabs, ChromeShell, SystemClock>;

thread_local! {
    static BACKGROUND: Rc<ChromeBackground> =
        Rc::new(Background::new(ChromeStore, ChromeTabs, ChromeShell, SystemClock));
}

fn background() -> Rc<ChromeBackground> {
    BACKGROUND.with(Rc::clone)
}

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export core domain functions for JavaScript access
#[wasm_bindgen]
pub fn extract_domain(url: &str) -> String {
    domain::domain_key(url).unwrap_or_else(|| "invalid".to_string())
}

#[wasm_bindgen]
pub fn housekeeping_period_minutes() -> u32 {
    config::HOUSEKEEPING_PERIOD_MINUTES
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Service worker event handlers. Each one logs its own failure so a broken
// event never takes down the others.

#[wasm_bindgen]
pub async fn on_installed(reason: String) {
    if let Err(e) = background().on_installed(InstallReason::parse(&reason)).await {
        log::error!("Error initializing storage: {}", e);
    }
}

#[wasm_bindgen]
pub async fn on_tab_updated(tab_id: i32, complete: bool, tab: JsValue) {
    let tab: TabInfo = match serde_wasm_bindgen::from_value(tab) {
        Ok(tab) => tab,
        Err(e) => {
            log::warn!("Ignoring update of tab {}: {}", tab_id, e);
            return;
        }
    };
    if let Err(e) = background().on_tab_updated(tab_id, complete, &tab).await {
        log::error!("Error updating tab activity: {}", e);
    }
}

#[wasm_bindgen]
pub async fn on_tab_activated(tab_id: i32) {
    if let Err(e) = background().on_tab_activated(tab_id).await {
        log::error!("Error updating tab activity: {}", e);
    }
}

#[wasm_bindgen]
pub async fn on_tab_removed(tab_id: i32) {
    if let Err(e) = background().on_tab_removed(tab_id).await {
        log::error!("Error handling tab removal: {}", e);
    }
}

#[wasm_bindgen]
pub async fn on_command(command: String) {
    let Some(command) = Command::parse(&command) else {
        log::warn!("Unknown command: {}", command);
        return;
    };
    if let Err(e) = background().on_command(command).await {
        log::error!("Error running command {:?}: {}", command, e);
    }
}

#[wasm_bindgen]
pub async fn on_alarm(name: String) {
    if let Err(e) = background().on_alarm(&name).await {
        log::error!("Error during cleanup: {}", e);
    }
}

#[wasm_bindgen]
pub async fn sync_tabs() -> Result<JsValue, JsValue> {
    let response = background().sync_tabs().await;
    Ok(serde_wasm_bindgen::to_value(&response)?)
}
