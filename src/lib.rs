//! # Gamestui
//!
//! A terminal client for browsing game listings hosted by a ledger program.
//! Games are discovered batch by batch, newest first, classified by
//! lifecycle and grouped into Open, Closed and Settled buckets.
//!
//! ## Modules
//!
//! - [`domain`] - Game records, lifecycle classification and buckets
//! - [`engine`] - The batched pagination session over a [`fetcher::GameFetcher`]
//! - [`fetcher`] - Transport implementations (JSON-RPC and in-memory)
//! - [`components`] - UI components
//! - [`config`] - Configuration management

#![deny(warnings)]
#![allow(dead_code)]

pub mod action;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod domain;
pub mod engine;
pub mod fetcher;
pub mod mode;
pub mod text;
pub mod tui;
pub mod utils;
pub mod widgets;

/// Result type used throughout the library
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
