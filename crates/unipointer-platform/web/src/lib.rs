//! Web platform adapter for Unipointer
//!
//! Binds the gesture engine to DOM elements through `wasm-bindgen`.
//!
//! ```no_run
//! use unipointer_core::GestureConfig;
//!
//! let document = web_sys::window().unwrap().document().unwrap();
//! let slider = document.get_element_by_id("slider").unwrap();
//! let handle = unipointer_platform_web::attach(
//!     &slider,
//!     GestureConfig::default().on_end(|_, _, displacement, velocity| {
//!         log::info!("swiped {displacement:?} at {velocity:?}");
//!     }),
//! )
//! .unwrap();
//! # drop(handle);
//! ```

mod error;
mod host;
mod translate;

pub use error::WebHostError;
pub use host::{probe_capabilities, WebHost};
pub use translate::{apply_effects, translate};

use unipointer_core::{GestureConfig, GestureHandle};
use web_sys::EventTarget;

/// Attaches a gesture engine to `surface` using the global window.
///
/// The listeners stay installed for as long as the returned handle lives.
pub fn attach(
    surface: &EventTarget,
    config: GestureConfig,
) -> Result<GestureHandle<WebHost>, WebHostError> {
    let host = WebHost::new()?;
    GestureHandle::attach(host, surface.clone(), config)
}
