// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! HTTPS connector for the Mastodon API.
//!
//! Service structures in this module provide a low-level way to interact
//! with the Mastodon API over HTTPS, essentially a specialized HTTPS client
//! specifically for Mastodon.

use crate::http::{HTTPError, HTTPResult, HTTPService, Page};
use reqwest::{Client, RequestBuilder, header};

/// The largest page size the statuses endpoint will honor.
const PAGE_LIMIT: u32 = 40;

/// A service for retrieving information about Mastodon accounts.
///
/// Using this trait, clients can implement different ways of connecting
/// to the Mastodon API, such as an actual connector for production code,
/// and a mocked connector for testing purposes.
pub trait Service {
    /// True if requests made by this service carry a bearer credential.
    fn authenticated(&self) -> bool;

    /// Looks up the account with the given handle and returns the raw
    /// JSON account record.
    fn lookup(&self, acct: &str) -> impl Future<Output = HTTPResult<String>> + Send;

    /// Looks up the account that owns the bearer credential and returns
    /// the raw JSON account record.
    fn verify_credentials(&self) -> impl Future<Output = HTTPResult<String>> + Send;

    /// Fetches the first page of an account's statuses.
    fn statuses(&self, account_id: &str) -> impl Future<Output = HTTPResult<Page>> + Send;

    /// Fetches a continuation page at the opaque locator supplied by a
    /// previous page's metadata.
    fn page(&self, url: &str) -> impl Future<Output = HTTPResult<Page>> + Send;
}

/// A service that contacts a Mastodon instance directly to retrieve
/// information.
pub struct MastodonService {
    client: Client,
    base: String,
    token: Option<String>,
}

impl MastodonService {
    /// Creates a new Mastodon service for the given instance.
    ///
    /// `instance` is the hostname of the Mastodon server, e.g.
    /// `mastodon.social`. When `token` is present, every request made by
    /// the service carries it as a bearer credential, which widens result
    /// visibility to the account's non-public posts.
    pub fn new(instance: &str, token: Option<String>) -> Self {
        let client = Self::client();
        let base = format!("https://{instance}");
        Self {
            client,
            base,
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    fn statuses_query() -> String {
        // Replies count as authored posts; boosts of other people's posts
        // do not.
        format!("?limit={PAGE_LIMIT}&exclude_replies=false&exclude_reblogs=true")
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends a GET request to a Mastodon API endpoint and returns the body
    /// along with the next-page locator, if the response named one.
    async fn get(&self, url: &str) -> HTTPResult<Page> {
        let resp = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(HTTPError::Request)?;

        if !resp.status().is_success() {
            return Err(HTTPError::Http(resp.status()));
        }

        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .ok_or(HTTPError::MissingContentType)?
            .to_str()?;
        if !content_type.starts_with("application/json") {
            return Err(HTTPError::UnexpectedContentType(content_type.to_string()));
        }

        let next = resp
            .headers()
            .get(header::LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(next_link);
        let body = resp.text().await.map_err(HTTPError::Body)?;
        Ok(Page { body, next })
    }
}

impl HTTPService for MastodonService {}

impl Service for MastodonService {
    fn authenticated(&self) -> bool {
        self.token.is_some()
    }

    async fn lookup(&self, acct: &str) -> HTTPResult<String> {
        let url = self.url(&format!("/api/v1/accounts/lookup?acct={acct}"));
        Ok(self.get(&url).await?.body)
    }

    async fn verify_credentials(&self) -> HTTPResult<String> {
        let url = self.url("/api/v1/accounts/verify_credentials");
        Ok(self.get(&url).await?.body)
    }

    async fn statuses(&self, account_id: &str) -> HTTPResult<Page> {
        let query = Self::statuses_query();
        let url = self.url(&format!("/api/v1/accounts/{account_id}/statuses{query}"));
        self.get(&url).await
    }

    async fn page(&self, url: &str) -> HTTPResult<Page> {
        self.get(url).await
    }
}

/// Extracts the URL of the `next` relation from a `Link` header value.
///
/// The header carries one or more `<url>; rel="relation"` entries separated
/// by commas. The returned URL is used verbatim as the next page locator; a
/// header with no `next` relation means the traversal is at its end.
fn next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|entry| {
        let (target, params) = entry.split_once(';')?;
        let target = target.trim().strip_prefix('<')?.strip_suffix('>')?;
        params
            .split(';')
            .any(|param| param.trim() == r#"rel="next""#)
            .then(|| target.to_string())
    })
}
