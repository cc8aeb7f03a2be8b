use crate::clock::{Clock, DateTime, Utc};
use crate::count::Month;
use crate::http::{HTTPError, HTTPResult, Page};
use crate::mastodon::Mastodonian;
use crate::mastodon::service::Service;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

pub fn do_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn load_data(file: &str) -> String {
    fs::read_to_string(format!("tests/data/{file}.json")).expect("could not find test data")
}

/// Parses a `YYYY-MM` key into a [`Month`].
pub fn month(key: &str) -> Month {
    let datetime = DateTime::parse_from_rfc3339(&format!("{key}-01T00:00:00Z"))
        .expect("invalid month key")
        .with_timezone(&Utc);
    Month::of(&datetime)
}

/// A service that answers from fixture files instead of the network.
///
/// Responses live in `tests/data/{resource}_{suffix}.json`. Status pages
/// are numbered `statuses_{suffix}_1.json`, `statuses_{suffix}_2.json`,
/// and so on; a page's next locator points at the following fixture, and
/// the last fixture on disk is the last page.
pub struct TestService<'a> {
    suffix: &'a str,
    authenticated: bool,
}

impl<'a> TestService<'a> {
    pub fn new(suffix: &'a str) -> Self {
        Self {
            suffix,
            authenticated: false,
        }
    }

    /// A service that acts as if it holds a bearer credential.
    pub fn logged_in(suffix: &'a str) -> Self {
        Self {
            suffix,
            authenticated: true,
        }
    }

    fn page_at(&self, path: &str) -> HTTPResult<Page> {
        let body = fs::read_to_string(path).expect("could not find test data");
        let next = next_fixture(path).filter(|successor| Path::new(successor).exists());
        Ok(Page { body, next })
    }
}

fn next_fixture(path: &str) -> Option<String> {
    let (stem, n) = path.strip_suffix(".json")?.rsplit_once('_')?;
    let n: u32 = n.parse().ok()?;
    Some(format!("{stem}_{}.json", n + 1))
}

impl<'a> Service for TestService<'a> {
    fn authenticated(&self) -> bool {
        self.authenticated
    }

    async fn lookup(&self, _acct: &str) -> HTTPResult<String> {
        Ok(load_data(&format!("lookup_{}", self.suffix)))
    }

    async fn verify_credentials(&self) -> HTTPResult<String> {
        Ok(load_data(&format!("verify_credentials_{}", self.suffix)))
    }

    async fn statuses(&self, _account_id: &str) -> HTTPResult<Page> {
        self.page_at(&format!("tests/data/statuses_{}_1.json", self.suffix))
    }

    async fn page(&self, url: &str) -> HTTPResult<Page> {
        self.page_at(url)
    }
}

/// A service whose responses are scripted in advance.
///
/// Every call consumes the next scripted response; a call with nothing
/// scripted panics, which doubles as proof that no request was made where
/// none was expected.
pub struct SequenceService {
    authenticated: bool,
    account: Mutex<Option<HTTPResult<String>>>,
    pages: Mutex<VecDeque<HTTPResult<Page>>>,
}

impl SequenceService {
    pub fn pages(account: HTTPResult<String>, pages: Vec<HTTPResult<Page>>) -> Self {
        Self {
            authenticated: false,
            account: Mutex::new(Some(account)),
            pages: Mutex::new(VecDeque::from(pages)),
        }
    }

    /// A service with no credential and nothing scripted at all.
    pub fn unauthenticated() -> Self {
        Self {
            authenticated: false,
            account: Mutex::new(None),
            pages: Mutex::new(VecDeque::new()),
        }
    }

    /// A service whose account lookup fails with an HTTP error.
    pub fn failing_lookup() -> Self {
        Self::pages(Err(HTTPError::Http(StatusCode::SERVICE_UNAVAILABLE)), vec![])
    }

    /// A service that serves one good page of two January 2024 posts and
    /// then fails the continuation request.
    pub fn failing_second_page() -> Self {
        Self::pages(
            Ok(load_data("lookup_ellen")),
            vec![
                Ok(Page {
                    body: String::from(PAGE_2024_01),
                    next: Some(String::from("https://mastodon.social/unreachable")),
                }),
                Err(HTTPError::Http(StatusCode::BAD_GATEWAY)),
            ],
        )
    }

    /// A service that serves a single page on which one record has no
    /// creation timestamp.
    pub fn with_malformed_item() -> Self {
        let body = r#"[
          {"id": "3", "created_at": "2024-02-01T10:00:00.000Z"},
          {"id": "2"},
          {"id": "1", "created_at": "2024-01-05T08:00:00.000Z"}
        ]"#;
        Self::pages(
            Ok(load_data("lookup_ellen")),
            vec![Ok(Page {
                body: String::from(body),
                next: None,
            })],
        )
    }

    fn next_page(&self) -> HTTPResult<Page> {
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected page request")
    }
}

const PAGE_2024_01: &str = r#"[
  {"id": "111000000000000002", "created_at": "2024-01-20T09:00:00.000Z"},
  {"id": "111000000000000001", "created_at": "2024-01-05T08:00:00.000Z"}
]"#;

impl Service for SequenceService {
    fn authenticated(&self) -> bool {
        self.authenticated
    }

    async fn lookup(&self, _acct: &str) -> HTTPResult<String> {
        self.account
            .lock()
            .unwrap()
            .take()
            .expect("unexpected lookup request")
    }

    async fn verify_credentials(&self) -> HTTPResult<String> {
        self.account
            .lock()
            .unwrap()
            .take()
            .expect("unexpected verify_credentials request")
    }

    async fn statuses(&self, _account_id: &str) -> HTTPResult<Page> {
        self.next_page()
    }

    async fn page(&self, _url: &str) -> HTTPResult<Page> {
        self.next_page()
    }
}

pub struct FrozenClock {
    datetime: DateTime<Utc>,
}

impl FrozenClock {
    pub fn new(datetime: DateTime<Utc>) -> Self {
        FrozenClock { datetime }
    }
}

impl Default for FrozenClock {
    fn default() -> Self {
        let datetime = DateTime::parse_from_rfc3339("2025-05-23T10:13:00Z")
            .expect("invalid date supplied")
            .with_timezone(&Utc);
        Self::new(datetime)
    }
}

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<Utc> {
        self.datetime
    }
}

impl Mastodonian<TestService<'static>> {
    /// Returns a valid Mastodonian with a five-post history spread over
    /// two pages that can be used for testing purposes.
    pub async fn test() -> Self {
        Mastodonian::new_with_service(Some(String::from("ellen")), TestService::new("ellen"))
            .await
            .unwrap()
    }

    /// Returns the same Mastodonian as [`test`](Self::test), resolved
    /// through the credential-verification path instead of a handle
    /// lookup.
    pub async fn test_authenticated() -> Self {
        Mastodonian::new_with_service(None, TestService::logged_in("ellen"))
            .await
            .unwrap()
    }

    /// Returns a valid Mastodonian that has never posted.
    pub async fn test_empty() -> Self {
        Mastodonian::new_with_service(Some(String::from("newbie")), TestService::new("newbie"))
            .await
            .unwrap()
    }
}
