//! # Dispatch Layer
//!
//! Batch delivery of composed quote requests. Channels are an explicit
//! ordered list of [`DeliveryChannel`] trait objects tried in sequence
//! per recipient; the first success wins. A recipient for which every
//! channel fails is recorded and the batch moves on — there is no
//! partial-batch abort and no retry beyond the chain itself.
//!
//! When not a single recipient could be reached, the composed messages
//! are serialized to a timestamped backup file next to the store so no
//! work is lost, and the summary records its location.

use crate::compose::compose;
use crate::error::{QuoteError, Result};
use crate::model::{is_valid_email, Product, Supplier};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

pub mod channels;
pub mod memory;

/// One message ready for the mail client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub to: String,
    pub cc: Option<String>,
    pub subject: String,
    pub body: String,
}

/// One way of driving the local mail client.
pub trait DeliveryChannel {
    /// Short channel name for failure reporting.
    fn name(&self) -> &'static str;

    /// Attempt to deliver one message.
    fn deliver(&self, message: &OutboundMessage) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct SendFailure {
    pub supplier: String,
    pub reason: String,
}

/// Per-batch outcome aggregation.
#[derive(Debug, Default)]
pub struct SendSummary {
    /// Suppliers reached, in send order.
    pub delivered: Vec<String>,
    pub failed: Vec<SendFailure>,
    /// Set when every recipient failed and a backup artifact was written.
    pub backup: Option<PathBuf>,
}

impl SendSummary {
    pub fn all_failed(&self) -> bool {
        self.delivered.is_empty() && !self.failed.is_empty()
    }
}

pub struct Dispatcher {
    channels: Vec<Box<dyn DeliveryChannel>>,
    subject: String,
    send_delay: Duration,
    backup_dir: PathBuf,
}

impl Dispatcher {
    pub fn new(
        channels: Vec<Box<dyn DeliveryChannel>>,
        subject: impl Into<String>,
        send_delay: Duration,
        backup_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            channels,
            subject: subject.into(),
            send_delay,
            backup_dir: backup_dir.into(),
        }
    }

    /// Send one composed message per supplier, sharing the product list.
    ///
    /// Recipients with an empty or malformed email are recorded as
    /// failures without attempting delivery. A fixed delay is inserted
    /// between consecutive sends so the mail client is not overwhelmed;
    /// it has no correctness role.
    pub fn send_batch(
        &self,
        template: &str,
        suppliers: &[Supplier],
        products: &[Product],
        cc: Option<&str>,
    ) -> Result<SendSummary> {
        let mut summary = SendSummary::default();
        let mut composed: Vec<(Supplier, String)> = Vec::with_capacity(suppliers.len());

        for (i, supplier) in suppliers.iter().enumerate() {
            if i > 0 && !self.send_delay.is_zero() {
                thread::sleep(self.send_delay);
            }

            let body = compose(template, &supplier.name, products);
            composed.push((supplier.clone(), body.clone()));

            let email = supplier.email.trim();
            if email.is_empty() || !is_valid_email(email) {
                summary.failed.push(SendFailure {
                    supplier: supplier.name.clone(),
                    reason: format!("invalid recipient address '{}'", email),
                });
                continue;
            }

            let message = OutboundMessage {
                to: email.to_string(),
                cc: cc.map(str::to_string).filter(|c| !c.is_empty()),
                subject: self.subject.clone(),
                body,
            };

            match self.try_channels(&message) {
                Ok(()) => summary.delivered.push(supplier.name.clone()),
                Err(reason) => summary.failed.push(SendFailure {
                    supplier: supplier.name.clone(),
                    reason,
                }),
            }
        }

        if summary.all_failed() {
            summary.backup = Some(self.write_backup(&composed)?);
        }
        Ok(summary)
    }

    /// Try each channel in order; collapse the per-channel errors into
    /// one reason string when all fail.
    fn try_channels(&self, message: &OutboundMessage) -> std::result::Result<(), String> {
        let mut reasons = Vec::new();
        for channel in &self.channels {
            match channel.deliver(message) {
                Ok(()) => return Ok(()),
                Err(e) => reasons.push(format!("{}: {}", channel.name(), e)),
            }
        }
        if reasons.is_empty() {
            reasons.push("no delivery channels configured".to_string());
        }
        Err(reasons.join("; "))
    }

    /// Serialize all composed messages to a timestamped file, one block
    /// per recipient.
    fn write_backup(&self, composed: &[(Supplier, String)]) -> Result<PathBuf> {
        fs::create_dir_all(&self.backup_dir)?;
        let filename = format!(
            "quote-backup-{}.txt",
            Utc::now().format("%Y-%m-%d_%H-%M-%S")
        );
        let path = self.backup_dir.join(filename);

        let mut out = String::new();
        for (supplier, body) in composed {
            out.push_str(&format!("=== {} <{}> ===\n", supplier.name, supplier.email));
            out.push_str(body);
            out.push_str("\n\n");
        }
        fs::write(&path, out).map_err(QuoteError::Io)?;
        Ok(path)
    }
}

/// Backup location for a given store file: its parent directory.
pub fn backup_dir_for(store_path: &Path) -> PathBuf {
    crate::store::workbook::parent_dir(store_path)
}
