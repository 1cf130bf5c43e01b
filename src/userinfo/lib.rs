//! # Userinfo Architecture
//!
//! Userinfo is a **UI-agnostic record manager**: a form that adds and edits user
//! records (name, age, email, phone), a validator that guards the form, and a
//! searchable table over the stored records. The terminal client shipped in the
//! binary is one way to drive it, nothing more.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Reads intent lines, renders the view, handles terminal   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session Layer (session.rs, form.rs)                        │
//! │  - Applies one Intent at a time                             │
//! │  - Owns the form state machine and the search box           │
//! │  - Produces serializable View snapshots                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (display indexes → RecordIds)          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - add / update / delete / list logic                       │
//! │  - Refuses records that fail validation                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait, InMemoryStore                           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//!
//! Records are keyed by an immutable [`model::RecordId`] handed out by the store.
//! Users see a 1-based display index (the row number in the full list); the API
//! resolves it to an id before anything is mutated. See [`index`].
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Everything in this library takes Rust values and returns Rust values. Nothing
//! here writes to stdout or stderr, calls `std::process::exit`, or assumes a
//! terminal. Diagnostics go through the `log` facade only.
//!
//! ## Module Overview
//!
//! - [`session`]: Top-level UI state and the `Intent` reducer
//! - [`form`]: Create/edit form state machine
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Storage abstraction and the in-memory store
//! - [`validation`]: Per-field validation schema
//! - [`search`]: Case-insensitive, OR-across-fields table filter
//! - [`index`]: Display indexing
//! - [`model`]: Core data types (`Record`, `Entry`, `Field`, `RecordId`)
//! - [`config`]: Client configuration
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod form;
pub mod index;
pub mod model;
pub mod search;
pub mod session;
pub mod store;
pub mod validation;
