//! Tag queries and purge

use crate::store::SecretStore;
use hoard_core::{Error, Result, Tags};
use tracing::{debug, error, info};

/// Parse `key=value` into a tag pair
pub fn parse_tag(pair: &str) -> Result<(String, String)> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| Error::validation(format!("tag filter '{}' must look like key=value", pair)))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(Error::validation(format!("tag filter '{}' has an empty key", pair)));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Parse a list of `key=value` pairs into a filter
pub fn parse_filter<T: AsRef<str>>(pairs: &[T]) -> Result<Tags> {
    pairs.iter().map(|pair| parse_tag(pair.as_ref())).collect()
}

/// Whether `tags` carries every key/value in `filter`
pub fn tags_match(tags: &Tags, filter: &Tags) -> bool {
    filter
        .iter()
        .all(|(key, value)| tags.get(key).is_some_and(|v| v == value))
}

/// Names of every secret whose tags are a superset of `filter`.
///
/// Walks all listing pages; an empty filter matches everything.
pub async fn matching<S>(store: &S, filter: &Tags) -> Result<Vec<String>>
where
    S: SecretStore + ?Sized,
{
    let mut names = Vec::new();
    let mut token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = store.list_page(token.take()).await.map_err(|e| {
            error!(error = %e, "failed to list secrets");
            Error::remote(format!("list secrets failed: {}", e))
        })?;
        pages += 1;

        names.extend(
            page.entries
                .into_iter()
                .filter(|entry| tags_match(&entry.tags, filter))
                .map(|entry| entry.name),
        );

        match page.next_token {
            Some(next) if !next.is_empty() => token = Some(next),
            _ => break,
        }
    }

    debug!(pages, matched = names.len(), "tag query finished");
    Ok(names)
}

/// Delete every secret matching `filter`, stopping at the first failure.
///
/// Returns the deleted names. An empty filter is refused.
pub async fn purge<S>(store: &S, filter: &Tags, force: bool) -> Result<Vec<String>>
where
    S: SecretStore + ?Sized,
{
    if filter.is_empty() {
        return Err(Error::validation("refusing to purge with an empty tag filter"));
    }

    let names = matching(store, filter).await?;
    let mut deleted = Vec::with_capacity(names.len());

    for name in names {
        store.delete(&name, force).await.map_err(|e| {
            error!(identity = %name, error = %e, "failed to delete secret");
            e.into_error(&name)
        })?;
        info!(identity = %name, force, "secret deleted");
        deleted.push(name);
    }

    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{EntrySummary, ListPage, MockSecretStore, StoreError};

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn entry(name: &str, pairs: &[(&str, &str)]) -> EntrySummary {
        EntrySummary {
            name: name.to_string(),
            tags: tags(pairs),
        }
    }

    #[test]
    fn test_parse_tag() {
        assert_eq!(
            parse_tag("environment=dev").unwrap(),
            ("environment".to_string(), "dev".to_string())
        );
        assert_eq!(parse_tag("note=a=b").unwrap().1, "a=b");
        assert!(parse_tag("environment").is_err());
        assert!(parse_tag("=dev").is_err());
    }

    #[test]
    fn test_tags_match_is_and() {
        let stored = tags(&[("a", "1"), ("b", "2"), ("c", "3")]);
        assert!(tags_match(&stored, &tags(&[("a", "1"), ("b", "2")])));
        assert!(!tags_match(&stored, &tags(&[("a", "1"), ("b", "9")])));
        assert!(!tags_match(&stored, &tags(&[("d", "4")])));
        assert!(tags_match(&stored, &Tags::new()));
    }

    #[tokio::test]
    async fn test_matching_walks_pages() {
        let mut store = MockSecretStore::new();
        store
            .expect_list_page()
            .withf(|token| token.is_none())
            .times(1)
            .returning(|_| {
                Ok(ListPage {
                    entries: vec![entry("one", &[("environment", "dev")])],
                    next_token: Some("page-2".to_string()),
                })
            });
        store
            .expect_list_page()
            .withf(|token| token.as_deref() == Some("page-2"))
            .times(1)
            .returning(|_| {
                Ok(ListPage {
                    entries: vec![
                        entry("two", &[("environment", "dev")]),
                        entry("three", &[("environment", "prod")]),
                    ],
                    next_token: None,
                })
            });

        let names = matching(&store, &tags(&[("environment", "dev")])).await.unwrap();
        assert_eq!(names, vec!["one".to_string(), "two".to_string()]);
    }

    #[tokio::test]
    async fn test_purge_refuses_empty_filter() {
        let mut store = MockSecretStore::new();
        store.expect_list_page().never();
        store.expect_delete().never();

        let err = purge(&store, &Tags::new(), true).await.unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[tokio::test]
    async fn test_purge_stops_on_first_failure() {
        let mut store = MockSecretStore::new();
        store.expect_list_page().returning(|_| {
            Ok(ListPage {
                entries: vec![
                    entry("one", &[("source", "secret-hoard")]),
                    entry("two", &[("source", "secret-hoard")]),
                    entry("three", &[("source", "secret-hoard")]),
                ],
                next_token: None,
            })
        });
        store
            .expect_delete()
            .withf(|name, force| name == "one" && *force)
            .times(1)
            .returning(|_, _| Ok(()));
        store
            .expect_delete()
            .withf(|name, _| name == "two")
            .times(1)
            .returning(|_, _| Err(StoreError::Remote("AccessDenied".to_string())));
        store
            .expect_delete()
            .withf(|name, _| name == "three")
            .never();

        let err = purge(&store, &tags(&[("source", "secret-hoard")]), true)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("two"));
    }
}
