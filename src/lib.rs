// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! utootwhen is a command-line tool for charting when a Mastodon user
//! posts. It walks the user's entire posting history, one page at a time,
//! counts the posts made in each calendar month, and presents the counts
//! as a textual histogram in the terminal. Boosts of other people's posts
//! are not counted; replies are.
//!
//! # Examples
//!
//! (In all examples, replace `mastodon_user` with the actual username of
//! a Mastodon account.)
//!
//! Chart a user's posting history by month:
//!
//! ```bash
//! utootwhen mastodon_user
//! ```
//!
//! Chart the posting history of a user on another instance:
//!
//! ```bash
//! utootwhen -i fosstodon.org mastodon_user
//! ```
//!
//! Show only the number of posts made this month:
//!
//! ```bash
//! utootwhen -c mastodon_user
//! ```
//!
//! Chart your own history, including non-public posts, without naming
//! yourself (the account is resolved from the access token):
//!
//! ```bash
//! utootwhen -t 'access token'
//! ```
//!
//! Get usage and help for the tool:
//!
//! ```bash
//! utootwhen --help
//! ```
//!
//! # Access Token Setup
//!
//! utootwhen works on public accounts with no setup at all. To count posts
//! with restricted visibility, or to look up the account a token belongs
//! to, supply an access token:
//!
//! 1. On your instance, open Preferences → Development and create a new
//!    application with the `read` scope.
//! 2. Copy the application's access token.
//! 3. Pass it with `-t`, or store it in your shell's
//!    `$MASTODON_ACCESS_TOKEN` environment variable. Follow your shell's
//!    procedure for configuring environment variables, but generally this
//!    involves running
//!
//!    ```bash
//!    $ export MASTODON_ACCESS_TOKEN='copied access token'
//!    ```
//!
//!    In your shell session or in your shell's configuration ("rc") file
//!    (e.g., `~/.bashrc` or `~/.zshrc`).
//!
//! A token passed with `-t` always wins over the environment variable.
//!
//! # License
//!
//! utootwhen is licensed under the terms of the [Apache License 2.0].
//! Please see the LICENSE file accompanying this source code or visit the
//! previous link for more information on licensing.
//!
//! [Apache License 2.0]: https://www.apache.org/licenses/LICENSE-2.0

pub mod cli;
pub mod clock;
pub mod conf;
pub mod count;
pub mod http;
pub mod mastodon;
pub mod view;

#[cfg(test)]
mod test_utils;
