//! # Quotekit Architecture
//!
//! Quotekit is a **UI-agnostic quoting library**. This is not a CLI application that happens
//! to have some library code—it's a library that happens to have a CLI client.
//!
//! It keeps a small purchasing catalog (products and suppliers) and turns a selection of
//! both into one quote-request email per supplier, handed to the local mail client.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, wired by main.rs)                      │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic                                      │
//! │  - Operates on Rust types, returns Rust types               │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                ┌─────────────┴─────────────┐
//!                ▼                           ▼
//! ┌───────────────────────────┐ ┌───────────────────────────────┐
//! │  Storage Layer (store/)   │ │  Dispatch Layer (dispatch/)   │
//! │  - StoreBackend trait     │ │  - DeliveryChannel trait      │
//! │  - Workbook, Sqlite,      │ │  - Mail client automation,    │
//! │    Gallery (production),  │ │    compose-script fallback    │
//! │    MemBackend (testing)   │ │  - MemoryChannel (testing)    │
//! └───────────────────────────┘ └───────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, commands, storage, dispatch), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//! - **Never** assumes a terminal environment
//!
//! This means the same core could serve a REST API, a desktop shell, or any other UI.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): Thorough unit tests of business logic
//!    against `MemBackend` and `MemoryChannel`. This is where the lion's
//!    share of testing lives.
//!
//! 2. **Backends** (`store/*.rs`): Roundtrip tests against real files in
//!    temp directories.
//!
//! 3. **CLI** (thin `main.rs` + `tests/`): End-to-end runs of the binary
//!    against a temp store.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and the three persistence backends
//! - [`dispatch`]: Delivery channels, batch sending and the backup artifact
//! - [`compose`]: Template loading and message composition
//! - [`model`]: Core data types (`Product`, `Supplier`, `RecordKind`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod compose;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod store;
