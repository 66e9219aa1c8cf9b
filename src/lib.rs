//! Core library exports for the product intake service.
//!
//! This crate exposes the question catalog, forms, repositories, routes and
//! service layers used by the multi-step product submission application.

pub mod catalog;
pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod report;
pub mod repository;
pub mod routes;
pub mod services;
