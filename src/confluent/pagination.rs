//! Cursor pagination over Confluent Cloud list endpoints
//!
//! List responses carry a `metadata.next` link. An unset or empty link marks
//! the last page; otherwise the link must embed a `page_token` query
//! parameter, which is sent back on the following request.

use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::future::Future;
use url::Url;

/// Query parameter carrying the continuation cursor
pub const PAGE_TOKEN_QUERY_PARAMETER: &str = "page_token";

/// Query parameter carrying the requested page size
pub const PAGE_SIZE_QUERY_PARAMETER: &str = "page_size";

/// Base that relative "next" links are resolved against; only the query is read
const RELATIVE_LINK_BASE: &str = "http://localhost/";

/// Pagination metadata of a list response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMetadata {
    /// Absent or null on the last page
    #[serde(default)]
    pub next: Option<String>,
}

impl ListMetadata {
    /// Token for the next page, or `None` once pagination is complete
    pub fn next_page_token(&self) -> Result<Option<String>> {
        match self.next.as_deref() {
            None | Some("") => Ok(None),
            Some(next) => extract_page_token(next).map(Some),
        }
    }
}

/// One page of a list response
#[derive(Debug, Clone, Deserialize)]
pub struct ListPage<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub metadata: ListMetadata,
}

/// Extract the `page_token` value from a "next page" URL
pub fn extract_page_token(next_page_url: &str) -> Result<String> {
    let url = match Url::parse(next_page_url) {
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(RELATIVE_LINK_BASE).and_then(|base| base.join(next_page_url))
        }
        parsed => parsed,
    }
    .map_err(|e| anyhow!("could not parse {:?} into URL, {}", next_page_url, e))?;

    url.query_pairs()
        .find(|(key, _)| key == PAGE_TOKEN_QUERY_PARAMETER)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            anyhow!(
                "could not parse the value for {:?} query parameter from {:?}",
                PAGE_TOKEN_QUERY_PARAMETER,
                next_page_url
            )
        })
}

/// Fetch every page, in order, and concatenate their items.
///
/// `fetch` receives `None` for the first page and the extracted token for each
/// continuation. Any failure aborts the whole collection; no partial result is
/// returned.
pub async fn collect_all_pages<T, F, Fut>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<ListPage<T>>>,
{
    let mut items = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = fetch(page_token.take()).await?;
        pages += 1;
        items.extend(page.data);

        match page.metadata.next_page_token()? {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    tracing::debug!("Collected {} items across {} pages", items.len(), pages);
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    fn page(data: Vec<&'static str>, next: Option<&str>) -> ListPage<&'static str> {
        ListPage {
            data,
            metadata: ListMetadata {
                next: next.map(str::to_string),
            },
        }
    }

    /// Serve canned pages and record the token each call was made with
    async fn run(
        pages: Vec<ListPage<&'static str>>,
    ) -> (Result<Vec<&'static str>>, Vec<Option<String>>) {
        let queue = RefCell::new(VecDeque::from(pages));
        let calls = RefCell::new(Vec::new());
        let result = collect_all_pages(|token| {
            calls.borrow_mut().push(token);
            let next = queue.borrow_mut().pop_front();
            async move { next.ok_or_else(|| anyhow!("no more canned pages")) }
        })
        .await;
        (result, calls.into_inner())
    }

    #[test]
    fn test_extract_page_token() {
        let token = extract_page_token(
            "https://api.confluent.cloud/iam/v2/service-accounts?page_size=99&page_token=UvmDWOB1iwfAIBPj6EYb",
        )
        .unwrap();
        assert_eq!(token, "UvmDWOB1iwfAIBPj6EYb");
    }

    #[test]
    fn test_extract_page_token_decodes_value() {
        let token = extract_page_token("https://example.com/list?page_token=a%2Bb%3D").unwrap();
        assert_eq!(token, "a+b=");
    }

    #[test]
    fn test_extract_page_token_missing_parameter() {
        let url = "https://api.confluent.cloud/iam/v2/service-accounts?page_size=99";
        let err = extract_page_token(url).unwrap_err().to_string();
        assert!(err.contains("\"page_token\""));
        assert!(err.contains(url));
    }

    #[test]
    fn test_extract_page_token_empty_parameter() {
        assert!(extract_page_token("https://example.com/list?page_token=").is_err());
    }

    #[test]
    fn test_extract_page_token_relative_link() {
        let token =
            extract_page_token("/iam/v2/service-accounts?page_size=99&page_token=TOK2").unwrap();
        assert_eq!(token, "TOK2");
    }

    #[test]
    fn test_extract_page_token_relative_link_without_token() {
        let link = "/iam/v2/service-accounts?page_size=99";
        let err = extract_page_token(link).unwrap_err().to_string();
        assert!(err.contains("\"page_token\""));
        assert!(err.contains(link));
    }

    #[test]
    fn test_extract_page_token_unparseable_url() {
        let err = extract_page_token("http://[::1").unwrap_err().to_string();
        assert!(err.starts_with("could not parse \"http://[::1\" into URL"));
    }

    #[test]
    fn test_metadata_terminal_states() {
        let unset = ListMetadata::default();
        assert_eq!(unset.next_page_token().unwrap(), None);

        let empty = ListMetadata {
            next: Some(String::new()),
        };
        assert_eq!(empty.next_page_token().unwrap(), None);
    }

    #[test]
    fn test_list_page_deserializes_null_and_missing_next() {
        let with_null: ListPage<serde_json::Value> =
            serde_json::from_str(r#"{"data": [], "metadata": {"next": null}}"#).unwrap();
        assert!(with_null.metadata.next.is_none());

        let without_metadata: ListPage<serde_json::Value> =
            serde_json::from_str(r#"{"data": [{"id": "sa-1"}]}"#).unwrap();
        assert!(without_metadata.metadata.next.is_none());
        assert_eq!(without_metadata.data.len(), 1);
    }

    #[tokio::test]
    async fn test_two_pages_in_order() {
        let (result, calls) = run(vec![
            page(vec!["A", "B"], Some("https://x.test/list?page_token=TOK2")),
            page(vec!["C"], None),
        ])
        .await;

        assert_eq!(result.unwrap(), vec!["A", "B", "C"]);
        assert_eq!(calls, vec![None, Some("TOK2".to_string())]);
    }

    #[tokio::test]
    async fn test_empty_first_page() {
        let (result, calls) = run(vec![page(vec![], None)]).await;
        assert!(result.unwrap().is_empty());
        assert_eq!(calls.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_next_link_terminates() {
        let (result, calls) = run(vec![
            page(vec!["A"], Some("https://x.test/list?page_token=T")),
            page(vec!["B"], Some("")),
        ])
        .await;
        assert_eq!(result.unwrap(), vec!["A", "B"]);
        assert_eq!(calls.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_token_discards_prior_pages() {
        let (result, calls) = run(vec![
            page(vec!["A"], Some("https://x.test/list?page_token=T2")),
            page(vec!["B"], Some("https://x.test/list?page_size=99")),
            page(vec!["C"], None),
        ])
        .await;

        let err = result.unwrap_err().to_string();
        assert!(err.contains("page_token"));
        assert_eq!(calls.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_error_propagates() {
        let (result, calls) = run(vec![page(
            vec!["A"],
            Some("https://x.test/list?page_token=T2"),
        )])
        .await;
        assert!(result.is_err());
        assert_eq!(calls.len(), 2);
    }
}
