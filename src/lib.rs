//! Pagewright Library
//!
//! This library provides the configuration and editing engine behind the
//! Pagewright site editor: the typed site configuration, snapshot-producing
//! mutations, style resolution, bounded undo history, portable sync codes and
//! the editing session that ties them to durable storage.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod models;
pub mod services;
