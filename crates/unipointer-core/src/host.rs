//! Collaborator interface to the hosting event system.
//!
//! A host owns the native listener registry: it maps `(target, event name)`
//! subscriptions to native listeners, translates native events into
//! [`RawEvent`]s, invokes the handler, then applies the effects the engine
//! recorded on the event (default-action suppression, blur).

use std::rc::Rc;

use crate::backend::Capabilities;
use crate::event::RawEvent;

pub type EventHandler = Rc<dyn Fn(&RawEvent)>;

/// Opaque token identifying one native listener registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

pub trait EventHost {
    /// Something listeners can be attached to: the surface or the document.
    type Target: Clone + 'static;
    type Error: std::error::Error + 'static;

    /// Probes which native pointer backends the environment supports.
    fn capabilities(&self) -> Capabilities;

    /// Document-wide scope that keeps receiving events once the pointer
    /// leaves the surface.
    fn document(&self) -> Self::Target;

    fn subscribe(
        &self,
        target: &Self::Target,
        event: &'static str,
        handler: EventHandler,
    ) -> Result<SubscriptionId, Self::Error>;

    /// Removes a registration. Unknown ids are ignored. Hosts must tolerate
    /// being called from inside the handler being removed.
    fn unsubscribe(&self, subscription: SubscriptionId);
}
