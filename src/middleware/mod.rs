// ABOUTME: HTTP middleware module
// ABOUTME: Bearer token extraction feeding the session gate
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! HTTP-layer middleware and extractors.

pub mod auth;

pub use auth::AuthenticatedUser;
