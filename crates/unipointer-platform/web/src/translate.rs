//! Native DOM event to [`RawEvent`] translation.
//!
//! The event name decides which DOM interface is read, so environments that
//! lack a constructor (no `TouchEvent` on desktop Firefox, no `PointerEvent`
//! on old Safari) are never probed with `instanceof` for it.

use unipointer_core::{PointerButtons, PointerType, RawEvent, RawEventKind};
use unipointer_geometry::Point;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, MouseEvent, PointerEvent, TouchEvent};

/// Translates `event`, delivered for the listener named `name`.
///
/// Returns `None` for names no backend uses.
pub fn translate(name: &str, event: &web_sys::Event) -> Option<RawEvent> {
    let kind = RawEventKind::from_event_name(name)?;
    let raw = if name.starts_with("touch") {
        event
            .dyn_ref::<TouchEvent>()
            .map(|touch| translate_touch(kind, touch))
    } else if name.starts_with("pointer") {
        event
            .dyn_ref::<PointerEvent>()
            .map(|pointer| translate_pointer(kind, pointer))
    } else if name.starts_with("MSPointer") {
        Some(translate_legacy_pointer(kind, event))
    } else if name.starts_with("mouse") {
        event
            .dyn_ref::<MouseEvent>()
            .map(|mouse| translate_mouse(kind, mouse))
    } else {
        None
    };
    Some(raw.unwrap_or_else(|| RawEvent::new(kind, None)))
}

fn translate_touch(kind: RawEventKind, event: &TouchEvent) -> RawEvent {
    let touches = event.touches();
    let position = if lists_tracked_contact(kind) {
        touches
            .get(0)
            .map(|touch| Point::new(touch.client_x() as f32, touch.client_y() as f32))
    } else {
        None
    };
    let raw = RawEvent::touch(kind, position, touches.length() as usize);
    // Only WebKit reports a gesture scale on touch events.
    match number_property(event, "scale") {
        Some(scale) => raw.with_scale(scale as f32),
        None => raw,
    }
}

/// `touches` holds the tracked contact only while it is down. On end and
/// cancel it lists the remaining fingers, whose position must not be
/// reported as the release point.
fn lists_tracked_contact(kind: RawEventKind) -> bool {
    matches!(kind, RawEventKind::Start | RawEventKind::Move)
}

fn translate_pointer(kind: RawEventKind, event: &PointerEvent) -> RawEvent {
    let position = Point::new(event.client_x() as f32, event.client_y() as f32);
    RawEvent::pointer(kind, position, PointerType::from_name(&event.pointer_type()))
        .with_primary(event.is_primary())
        .with_buttons(PointerButtons::from_bits(event.buttons()))
}

/// `MSPointerEvent` has no web-sys binding; its fields are read reflectively.
fn translate_legacy_pointer(kind: RawEventKind, event: &web_sys::Event) -> RawEvent {
    let position = match (
        number_property(event, "clientX"),
        number_property(event, "clientY"),
    ) {
        (Some(x), Some(y)) => Some(Point::new(x as f32, y as f32)),
        _ => None,
    };
    let is_primary = property(event, "isPrimary")
        .and_then(|value| value.as_bool())
        .unwrap_or(true);
    let buttons = number_property(event, "buttons")
        .map(|bits| PointerButtons::from_bits(bits as u16))
        .unwrap_or_default();
    let mut raw = RawEvent::new(kind, position)
        .with_primary(is_primary)
        .with_buttons(buttons);
    let pointer_type = property(event, "pointerType").and_then(|value| legacy_pointer_type(&value));
    if let Some(pointer_type) = pointer_type {
        raw = raw.with_pointer_type(pointer_type);
    }
    raw
}

/// IE10 reports numeric pointer types, IE11 strings.
fn legacy_pointer_type(value: &JsValue) -> Option<PointerType> {
    if let Some(code) = value.as_f64() {
        return Some(PointerType::from_legacy_code(code as u32));
    }
    value.as_string().map(|name| PointerType::from_name(&name))
}

fn translate_mouse(kind: RawEventKind, event: &MouseEvent) -> RawEvent {
    let position = Point::new(event.client_x() as f32, event.client_y() as f32);
    RawEvent::mouse(kind, position).with_buttons(PointerButtons::from_bits(event.buttons()))
}

/// Applies the effects the engine recorded on `raw` to the native event.
pub fn apply_effects(event: &web_sys::Event, raw: &RawEvent) {
    if raw.is_default_prevented() {
        event.prevent_default();
    }
    if raw.is_blur_requested() {
        let target = event.target().and_then(|target| target.dyn_into::<HtmlElement>().ok());
        if let Some(element) = target {
            if let Err(err) = element.blur() {
                log::debug!("blur failed: {err:?}");
            }
        }
    }
}

fn property(object: &JsValue, name: &str) -> Option<JsValue> {
    js_sys::Reflect::get(object, &JsValue::from_str(name))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

fn number_property(object: &JsValue, name: &str) -> Option<f64> {
    property(object, name).and_then(|value| value.as_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_release_position_is_not_read_from_remaining_contacts() {
        assert!(lists_tracked_contact(RawEventKind::Start));
        assert!(lists_tracked_contact(RawEventKind::Move));
        assert!(!lists_tracked_contact(RawEventKind::End));
        assert!(!lists_tracked_contact(RawEventKind::Cancel));
    }
}
