//! formsuite - model-driven forms for web applications
//!
//! Builds HTML forms from declared model fields, binds model values into
//! them and writes validated submissions back. On top of that sit the
//! registration and payment test forms, a serial-number generator and
//! user-panel list pages.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//! - **cli**: Command-line interface
//!
//! # Architecture
//! - `forms`: Form builder, field declarations and validation
//! - `serial`: Serial-number generator
//! - `scaffolding`: Generic menu and user-panel list pages
//! - `plugins`: Concrete forms and list pages
//! - `services`: Narrow interfaces to users, captcha, payment apis, localization
//! - `api`: HTTP services and middleware
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod forms;
pub mod plugins;
pub mod runtime;
pub mod scaffolding;
pub mod serial;
pub mod services;
pub mod system;
pub mod utils;
