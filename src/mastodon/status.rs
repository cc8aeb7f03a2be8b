//! A "status" in the Mastodon sense.
//!
//! In the Mastodon API, a "status" is any post that can appear in a
//! timeline. This module maps the JSON returned by the API onto Rust data
//! structures, keeping only the fields this tool actually consumes.

use crate::count::Month;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// A Mastodon user account.
#[derive(Debug, Deserialize)]
pub struct Account {
    id: String,
    acct: String,
    username: String,
    #[serde(default)]
    display_name: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    statuses_count: u64,
}

impl Account {
    /// Parses a text response from the Mastodon API into account data.
    ///
    /// `json` is the result of a call to `/api/v1/accounts/lookup` or
    /// `/api/v1/accounts/verify_credentials`; both return the same record
    /// shape.
    pub fn parse(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// The account's opaque server-side identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The webfinger-style handle, without the leading `@`.
    pub fn acct(&self) -> &str {
        &self.acct
    }

    /// The account's local username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The account's display name, which may be empty.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The date on which the account was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The number of statuses the account has posted, as reported by the
    /// server.
    pub fn statuses_count(&self) -> u64 {
        self.statuses_count
    }
}

/// A single post.
#[derive(Debug, Deserialize)]
pub struct Status {
    id: String,
    #[serde(default)]
    created_at: Option<String>,
}

impl Status {
    /// Parses one page of an account's statuses.
    ///
    /// `json` is the result of a call to
    /// `/api/v1/accounts/{id}/statuses`, which returns an array of status
    /// records.
    pub fn parse_batch(json: &str) -> Result<Vec<Self>, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// The status's opaque server-side identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The calendar month the status was created in.
    ///
    /// Returns `None` when the record lacks a usable creation timestamp,
    /// either because the field is missing entirely or because it does not
    /// parse as an RFC 3339 datetime. Callers decide what to do with such
    /// records; they are never silently assigned to a bucket.
    pub fn month(&self) -> Option<Month> {
        let raw = self.created_at.as_deref()?;
        let datetime = DateTime::parse_from_rfc3339(raw).ok()?;
        Some(Month::of(&datetime.with_timezone(&Utc)))
    }
}

/// An error parsing API data.
#[derive(Debug, Error)]
pub enum Error {
    /// The response was not the JSON shape the API documents.
    #[error("malformed API response: {0}")]
    Json(#[from] serde_json::Error),
}
