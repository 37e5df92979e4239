//! # Introduction
//!
//! snipgallery stores the example programs shown in a code-example gallery and
//! reproduces, deterministically, what each runnable one prints when executed.
//!
//! ## Pipeline
//!
//! ```text
//! Catalog → Snippet → DemoProgram → Machine (Terminal + Heap) → Outcome
//! ```
//!
//! 1. [`catalog`] — immutable [`catalog::Snippet`]s embedded at compile time.
//! 2. [`demo`] — one Rust routine per runnable snippet, plus
//!    [`demo::run`] and [`demo::check_determinism`].
//! 3. [`runtime`] — the [`runtime::Machine`] a demo drives: `printf`,
//!    `malloc`, `free`, and scoped `int` buffers.
//! 4. [`memory`] — the simulated [`memory::heap::Heap`] with tombstones, so
//!    stale accesses after `free` are reported instead of silently succeeding.
//! 5. [`terminal`] — output capture.
//! 6. [`record`] — the `Person` record and its display templates.
//!
//! Snippet text is never parsed or executed; it is only stored and shown.

pub mod catalog;
pub mod config;
pub mod demo;
pub mod memory;
pub mod record;
pub mod runtime;
pub mod terminal;
