use super::{DeliveryChannel, OutboundMessage};
use crate::error::{QuoteError, Result};
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory delivery channel for testing.
///
/// Records every delivered message in a shared outbox; keep a handle
/// from [`outbox`](Self::outbox) before boxing the channel. Can be
/// constructed failing to exercise the fallback chain.
pub struct MemoryChannel {
    label: &'static str,
    outbox: Rc<RefCell<Vec<OutboundMessage>>>,
    fail_with: Option<String>,
}

impl MemoryChannel {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            outbox: Rc::new(RefCell::new(Vec::new())),
            fail_with: None,
        }
    }

    /// A channel that rejects every message with the given reason.
    pub fn failing(label: &'static str, reason: &str) -> Self {
        Self {
            label,
            outbox: Rc::new(RefCell::new(Vec::new())),
            fail_with: Some(reason.to_string()),
        }
    }

    pub fn outbox(&self) -> Rc<RefCell<Vec<OutboundMessage>>> {
        Rc::clone(&self.outbox)
    }
}

impl DeliveryChannel for MemoryChannel {
    fn name(&self) -> &'static str {
        self.label
    }

    fn deliver(&self, message: &OutboundMessage) -> Result<()> {
        if let Some(reason) = &self.fail_with {
            return Err(QuoteError::Delivery(reason.clone()));
        }
        self.outbox.borrow_mut().push(message.clone());
        Ok(())
    }
}
