// Typed lifecycle dispatch between a host and its observers.
// Observers run in registration order; BeforeRedraw reaches all of them before layout.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::controller::ErrorOverlayController;
use crate::error::OverlayResult;
use crate::host::Host;
use crate::types::ErrorInput;

/// Lifecycle moments a host reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A fault was detected; carries a catalog code or a formatted message.
    ErrorRaised(ErrorInput),
    /// Layout is about to be recomputed.
    BeforeRedraw,
}

/// Receives host lifecycle events.
pub trait HostObserver<H: Host> {
    fn on_error_raised(&mut self, host: &mut H, input: &ErrorInput) -> OverlayResult<()>;

    fn on_before_redraw(&mut self, host: &mut H) -> OverlayResult<()>;
}

impl<H: Host> HostObserver<H> for ErrorOverlayController<H> {
    fn on_error_raised(&mut self, host: &mut H, input: &ErrorInput) -> OverlayResult<()> {
        ErrorOverlayController::on_error_raised(self, host, input)
    }

    fn on_before_redraw(&mut self, host: &mut H) -> OverlayResult<()> {
        ErrorOverlayController::on_before_redraw(self, host)
    }
}

/// Shared observer, so the host can keep querying it after registration.
impl<H: Host, O: HostObserver<H>> HostObserver<H> for Rc<RefCell<O>> {
    fn on_error_raised(&mut self, host: &mut H, input: &ErrorInput) -> OverlayResult<()> {
        self.borrow_mut().on_error_raised(host, input)
    }

    fn on_before_redraw(&mut self, host: &mut H) -> OverlayResult<()> {
        self.borrow_mut().on_before_redraw(host)
    }
}

/// Ordered observer list owned by a host.
pub struct EventDispatcher<H: Host> {
    observers: Vec<Box<dyn HostObserver<H>>>,
}

impl<H: Host> EventDispatcher<H> {
    pub fn new() -> Self {
        EventDispatcher {
            observers: Vec::new(),
        }
    }

    pub fn register(&mut self, observer: Box<dyn HostObserver<H>>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver `event` to every observer in order.
    ///
    /// `ErrorRaised` stops at the first error. `BeforeRedraw` reaches every
    /// observer regardless, and the first error is returned afterwards.
    pub fn dispatch(&mut self, host: &mut H, event: &HostEvent) -> OverlayResult<()> {
        debug!(
            host = host.id().as_u64(),
            ?event,
            observers = self.observers.len(),
            "dispatch"
        );
        match event {
            HostEvent::ErrorRaised(input) => {
                for observer in &mut self.observers {
                    observer.on_error_raised(host, input)?;
                }
                Ok(())
            }
            HostEvent::BeforeRedraw => {
                let mut first_error = None;
                for observer in &mut self.observers {
                    if let Err(err) = observer.on_before_redraw(host) {
                        if first_error.is_none() {
                            first_error = Some(err);
                        } else {
                            warn!(error = %err, "observer failed before redraw");
                        }
                    }
                }
                first_error.map_or(Ok(()), Err)
            }
        }
    }

    /// Run a redraw: `BeforeRedraw` to every observer, then `layout`.
    ///
    /// Layout runs even when an observer fails to tear down; the failure is
    /// returned next to the layout result.
    pub fn redraw<T, F>(&mut self, host: &mut H, layout: F) -> (T, OverlayResult<()>)
    where
        F: FnOnce(&mut H) -> T,
    {
        let teardown = self.dispatch(host, &HostEvent::BeforeRedraw);
        (layout(host), teardown)
    }
}

impl<H: Host> Default for EventDispatcher<H> {
    fn default() -> Self {
        Self::new()
    }
}
