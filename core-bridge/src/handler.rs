//! Capability handler abstraction.

use bridge_traits::platform::PlatformSendSync;

use crate::types::{CapabilityError, CapabilityRequest, CapabilityResult};

/// Outcome produced by a handler for a single call.
pub type HandlerOutcome = std::result::Result<CapabilityResult, CapabilityError>;

/// Host-side function that answers one named capability.
///
/// Handlers run synchronously on whatever thread the host delivered the call
/// on, so they must return quickly. Host failures are reported as
/// [`CapabilityError`] values, never as panics.
///
/// Closures with the matching signature are handlers too:
///
/// ```ignore
/// registry.register_fn("ping", |_request| {
///     Ok(CapabilityResult::new().with_field("reply", "pong"))
/// })?;
/// ```
pub trait CapabilityHandler: PlatformSendSync {
    fn handle(&self, request: &CapabilityRequest) -> HandlerOutcome;
}

impl<F> CapabilityHandler for F
where
    F: Fn(&CapabilityRequest) -> HandlerOutcome + PlatformSendSync,
{
    fn handle(&self, request: &CapabilityRequest) -> HandlerOutcome {
        self(request)
    }
}
