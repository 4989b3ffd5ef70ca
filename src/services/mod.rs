// ABOUTME: Service layer module for business logic above the database
// ABOUTME: Routes delegate here; services enforce authorization and batch semantics
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Business logic services. Route handlers stay thin and delegate here.

pub mod content;

pub use content::{CollectionItems, ContentService, PortfolioDraft};
