//! Mastodon API clients and services for communicating with Mastodon
//! instances over HTTP.

pub mod client;
pub mod service;
pub mod status;

pub use client::Mastodonian;
