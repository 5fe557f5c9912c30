//! Redesign Studio - AI room redesign service
//!
//! A user uploads a room photo and picks a style. The service asks an AI model
//! for a structural analysis of the room, then for a redesigned image
//! conditioned on that analysis, saves the result to the user's history, and
//! charges one credit.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
