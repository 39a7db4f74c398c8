//! Carevoice — voice-command interpretation and AI-assisted structured
//! extraction for a clinical-records application.
//!
//! A transcribed command string enters the
//! [`pipeline::orchestrator::CommandOrchestrator`], which classifies intent,
//! extracts slots, resolves existing records through the fuzzy matcher,
//! applies the store mutation and derives notifications. Unclassified or
//! explanatory commands are delegated to the AI extraction pipeline instead.
//!
//! The record store, the generative text service and the notification sink
//! are collaborators behind traits ([`store::RecordStore`],
//! [`pipeline::ai::AiService`], [`notifier::NotificationSink`]); the crate
//! ships an in-memory store, a SQLite-backed store and a Gemini client.

pub mod config;
pub mod models;
pub mod store;
pub mod pipeline;
pub mod notifier;
