//! Environment and configuration utilities.

use std::env;

/// The environment variable consulted for an access token when none is
/// passed on the command line.
pub const TOKEN_VAR: &str = "MASTODON_ACCESS_TOKEN";

/// Resolves the access token to use for API requests.
///
/// Sources are consulted in order: the `--token` command-line argument,
/// then the [`TOKEN_VAR`] environment variable. The first non-empty value
/// wins; an empty string in either spot is treated as unset. Returns `None`
/// when no source yields a token, in which case requests are made without
/// authentication.
///
/// # Examples
///
/// A token passed as an argument takes precedence over the environment:
///
/// ```
/// use utootwhen::conf::access_token;
/// # use temp_env::with_var;
/// # with_var("MASTODON_ACCESS_TOKEN", Some("from-env"), || {
/// let token = access_token(Some(String::from("from-arg")));
/// assert_eq!(token.as_deref(), Some("from-arg"));
/// # });
/// ```
///
/// Without an argument, the environment variable is used:
///
/// ```
/// use utootwhen::conf::access_token;
/// # use temp_env::with_var;
/// # with_var("MASTODON_ACCESS_TOKEN", Some("from-env"), || {
/// let token = access_token(None);
/// assert_eq!(token.as_deref(), Some("from-env"));
/// # });
/// ```
///
/// When neither source is set, there is no token:
///
/// ```
/// use utootwhen::conf::access_token;
/// # use temp_env::with_var_unset;
/// # with_var_unset("MASTODON_ACCESS_TOKEN", || {
/// assert_eq!(access_token(None), None);
/// # });
/// ```
///
/// An empty value does not count as a token:
///
/// ```
/// use utootwhen::conf::access_token;
/// # use temp_env::with_var;
/// # with_var("MASTODON_ACCESS_TOKEN", Some(""), || {
/// assert_eq!(access_token(Some(String::new())), None);
/// # });
/// ```
pub fn access_token(arg: Option<String>) -> Option<String> {
    [arg, env::var(TOKEN_VAR).ok()]
        .into_iter()
        .flatten()
        .find(|token| !token.is_empty())
}
