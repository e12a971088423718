//! # Complab Architecture
//!
//! Complab is a **local component library**: a filesystem-backed store of UI
//! components (React, Vue, HTML, Flutter and friends) that can be imported from
//! folders, loose files or pasted snippets, then listed, read, edited, exported
//! and deleted. It is a library that happens to have a CLI client.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs, cli/)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Parses import kinds, gathers config                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)  +  Classifier (classify/)   │
//! │  - Business logic, returns CmdResult                        │
//! │  - Framework / main file / language inference               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: The Disk Is the Truth
//!
//! Nothing is cached between calls. Every operation re-reads the store, and a
//! caller holding a list must re-fetch it after any mutating call.
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits the
//! process. Diagnostics go through `tracing`; the binary decides where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`classify`]: Import classification rules and folder/file intake
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`ComponentMeta`, `Component`, `StoredEntry`)
//! - [`config`]: Configuration management
//! - [`init`]: Store root and config directory resolution
//! - [`error`]: Error types

pub mod api;
pub mod classify;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod store;
