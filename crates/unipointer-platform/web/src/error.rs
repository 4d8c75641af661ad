use std::fmt;

use wasm_bindgen::JsValue;

/// Failures of the browser host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebHostError {
    /// No global `window` (e.g. inside a worker).
    NoWindow,
    NoDocument,
    /// `addEventListener` threw.
    Subscribe { event: &'static str, message: String },
}

impl WebHostError {
    pub(crate) fn subscribe(event: &'static str, error: JsValue) -> Self {
        let message = error
            .as_string()
            .unwrap_or_else(|| format!("{error:?}"));
        WebHostError::Subscribe { event, message }
    }
}

impl fmt::Display for WebHostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebHostError::NoWindow => write!(f, "no global window exists"),
            WebHostError::NoDocument => write!(f, "window has no document"),
            WebHostError::Subscribe { event, message } => {
                write!(f, "failed to listen for {event}: {message}")
            }
        }
    }
}

impl std::error::Error for WebHostError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_event() {
        let err = WebHostError::Subscribe {
            event: "pointermove",
            message: "InvalidStateError".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to listen for pointermove: InvalidStateError"
        );
        assert_eq!(WebHostError::NoWindow.to_string(), "no global window exists");
    }
}
