use crate::config::QuoteConfig;
use crate::dispatch::SendSummary;
use crate::model::{Product, Supplier};

pub mod add;
pub mod config;
pub mod delete;
pub mod init;
pub mod list;
pub mod search;
pub mod send;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub products: Vec<Product>,
    pub suppliers: Vec<Supplier>,
    pub removed: usize,
    pub summary: Option<SendSummary>,
    pub config: Option<QuoteConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    pub fn with_suppliers(mut self, suppliers: Vec<Supplier>) -> Self {
        self.suppliers = suppliers;
        self
    }

    pub fn with_removed(mut self, removed: usize) -> Self {
        self.removed = removed;
        self
    }

    pub fn with_summary(mut self, summary: SendSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_config(mut self, config: QuoteConfig) -> Self {
        self.config = Some(config);
        self
    }
}
