//! Realty Concierge - Conversational Property Search
//!
//! A dialog engine that classifies buyer messages, accumulates their
//! preferences across turns and answers with matching listings. Free-form
//! replies and natural-language search go through an ordered multi-model
//! gateway; everything else is deterministic.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
