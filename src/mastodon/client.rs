// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Clients for reading data from the Mastodon API.

use crate::count::MonthCounter;
use crate::http;
use crate::mastodon::service::{MastodonService, Service};
use crate::mastodon::status::{self, Account, Status};
use std::fmt;
use thiserror::Error;

/// Represents a Mastodon user.
pub struct Mastodonian<S> {
    account: Account,
    service: S,
}

impl<S> fmt::Debug for Mastodonian<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mastodonian {{ acct = {}, id = {} }}",
            self.account.acct(),
            self.account.id()
        )
    }
}

impl Mastodonian<MastodonService> {
    /// Creates a new client for retrieving information about a Mastodon
    /// user, connecting to the given `instance` over HTTPS.
    ///
    /// When `username` is present the account is resolved with a public
    /// handle lookup; otherwise the account owning `token` is resolved via
    /// the credential-verification endpoint. Supplying neither is a
    /// configuration error, detected before any request is made.
    ///
    /// Returns an [`enum@Error`] if the account cannot be resolved.
    pub async fn new(
        instance: &str,
        username: Option<String>,
        token: Option<String>,
    ) -> Result<Self, Error> {
        let service = MastodonService::new(instance, token);
        Self::new_with_service(username, service).await
    }
}

impl<S: Service> Mastodonian<S> {
    /// Creates a new client for retrieving information about a Mastodon
    /// user.
    ///
    /// `service` is the actual service implementation that will be used to
    /// retrieve information about the user.
    ///
    /// Returns an [`enum@Error`] if the account cannot be resolved.
    pub(crate) async fn new_with_service(
        username: Option<String>,
        service: S,
    ) -> Result<Self, Error> {
        let account = match username {
            Some(name) => Account::parse(&service.lookup(&name).await?)?,
            None if service.authenticated() => {
                Account::parse(&service.verify_credentials().await?)?
            }
            None => return Err(Error::Configuration),
        };
        Ok(Self { account, service })
    }

    /// The resolved account record.
    pub fn account(&self) -> &Account {
        &self.account
    }

    /// The user's handle.
    pub fn acct(&self) -> String {
        self.account.acct().to_string()
    }

    /// The user's status history as a lazy sequence of pages.
    ///
    /// The sequence is finite and not restartable; call
    /// [`StatusPages::next`] until it returns `None`.
    pub fn statuses(&self) -> StatusPages<'_, S> {
        StatusPages::new(&self.service, self.account.id())
    }

    /// Walks the user's entire status history and buckets every post by
    /// the calendar month it was created in.
    ///
    /// Pages are fetched strictly one at a time. A page failure stops the
    /// walk but keeps everything counted so far; the resulting
    /// [`Activity`] records the interruption so callers can distinguish
    /// partial totals from complete ones.
    pub async fn activity(&self) -> Activity {
        let mut months = MonthCounter::new();
        let mut skipped = 0;
        let mut interrupted = None;

        let mut pages = self.statuses();
        while let Some(result) = pages.next().await {
            match result {
                Ok(batch) => {
                    for status in &batch {
                        match status.month() {
                            Some(month) => months.observe(month),
                            None => skipped += 1,
                        }
                    }
                }
                Err(err) => {
                    interrupted = Some(err);
                    break;
                }
            }
        }

        Activity {
            months,
            skipped,
            interrupted,
        }
    }
}

/// A lazy sequence of an account's status pages.
///
/// Each call to [`next`](StatusPages::next) fetches one page and advances
/// to the locator named by that page's response metadata. The sequence
/// ends when a response names no further page, when a page comes back
/// empty, or when a page request fails; in every case, batches already
/// yielded stand.
pub struct StatusPages<'a, S> {
    service: &'a S,
    state: State,
}

enum State {
    Start(String),
    Next(String),
    Done,
}

impl<'a, S: Service> StatusPages<'a, S> {
    fn new(service: &'a S, account_id: &str) -> Self {
        Self {
            service,
            state: State::Start(String::from(account_id)),
        }
    }

    /// Advances to the next batch of statuses.
    ///
    /// Returns `None` once the sequence is over. A failed page yields its
    /// error exactly once, after which the sequence is over as well.
    pub async fn next(&mut self) -> Option<Result<Vec<Status>, FetchError>> {
        let result = match &self.state {
            State::Start(account_id) => self.service.statuses(account_id).await,
            State::Next(url) => self.service.page(url).await,
            State::Done => return None,
        };

        let page = match result {
            Ok(page) => page,
            Err(err) => {
                self.state = State::Done;
                return Some(Err(err.into()));
            }
        };

        let batch = match Status::parse_batch(&page.body) {
            Ok(batch) => batch,
            Err(err) => {
                self.state = State::Done;
                return Some(Err(err.into()));
            }
        };

        // An empty page means the history is exhausted, even if the
        // server still advertised a next locator.
        if batch.is_empty() {
            self.state = State::Done;
            return None;
        }

        self.state = match page.next {
            Some(url) => State::Next(url),
            None => State::Done,
        };
        Some(Ok(batch))
    }
}

/// The outcome of a full history walk.
#[derive(Debug)]
pub struct Activity {
    months: MonthCounter,
    skipped: usize,
    interrupted: Option<FetchError>,
}

impl Activity {
    /// Posts bucketed by calendar month.
    pub fn months(&self) -> &MonthCounter {
        &self.months
    }

    /// The total number of posts counted.
    pub fn total(&self) -> usize {
        self.months.total()
    }

    /// The number of records skipped because they lacked a usable
    /// creation timestamp.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// The error that cut the walk short, if any.
    ///
    /// When present, the bucket counts are a lower bound on the account's
    /// real activity, not a complete picture.
    pub fn interrupted(&self) -> Option<&FetchError> {
        self.interrupted.as_ref()
    }

    /// True if the walk ran to natural exhaustion.
    pub fn is_complete(&self) -> bool {
        self.interrupted.is_none()
    }
}

/// A client error raised while resolving an account.
#[derive(Debug, Error)]
pub enum Error {
    /// There is no account to resolve.
    #[error("no account to look up: supply a username or an access token")]
    Configuration,

    /// An error from the underlying HTTP service.
    #[error("Service error: {0}")]
    Service(#[from] http::HTTPError),

    /// An error parsing data.
    #[error("Parse error: {0}")]
    Parse(#[from] status::Error),
}

/// An error raised by a single page request mid-walk.
///
/// Unlike [`enum@Error`], a fetch error does not abort the run: the walk
/// stops, and whatever was already counted is reported as a partial
/// result.
#[derive(Debug, Error)]
pub enum FetchError {
    /// An error from the underlying HTTP service.
    #[error("Service error: {0}")]
    Service(#[from] http::HTTPError),

    /// An error parsing a page of data.
    #[error("Parse error: {0}")]
    Parse(#[from] status::Error),
}
