//! Combined GraphQL queries, one per batch of repositories.
//!
//! Each member of a batch is addressed by a positional alias (`r0`, `r1`, …)
//! so a single round-trip resolves the whole batch.

use crate::repos::RepositoryRef;
use serde::Serialize;

/// Topic labels requested per repository. Only the first page is read.
pub const TOPICS_PER_REPO: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryPayload {
    pub query: String,
}

#[derive(Debug)]
pub struct Batch<'a> {
    pub index: usize,
    pub repos: &'a [RepositoryRef],
    pub payload: QueryPayload,
}

pub fn alias(position: usize) -> String {
    format!("r{position}")
}

/// Build the combined query for `repos`. Owner and name are embedded as
/// escaped string literals.
pub fn build_query(repos: &[RepositoryRef]) -> serde_json::Result<QueryPayload> {
    let mut query = String::from("{");
    for (i, repo) in repos.iter().enumerate() {
        let owner = serde_json::to_string(&repo.owner)?;
        let name = serde_json::to_string(&repo.name)?;
        query.push_str(&format!(
            " {}: repository(owner: {owner}, name: {name}) {{ \
             name stargazerCount description owner {{ login }} \
             repositoryTopics(first: {TOPICS_PER_REPO}) {{ nodes {{ topic {{ name }} }} }} }}",
            alias(i)
        ));
    }
    query.push_str(" }");
    Ok(QueryPayload { query })
}

/// Split `repos` into contiguous chunks of at most `batch_size` and build
/// one query for each.
pub fn batches(repos: &[RepositoryRef], batch_size: usize) -> serde_json::Result<Vec<Batch<'_>>> {
    repos
        .chunks(batch_size.max(1))
        .enumerate()
        .map(|(index, chunk)| {
            Ok(Batch {
                index,
                repos: chunk,
                payload: build_query(chunk)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn repos(n: usize) -> Vec<RepositoryRef> {
        (0..n)
            .map(|i| RepositoryRef::new("owner", format!("repo-{i}")))
            .collect()
    }

    #[test]
    fn forty_fit_in_one_batch() {
        let repos = repos(40);
        let batches = batches(&repos, 40).unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].repos.len(), 40);
    }

    #[test]
    fn forty_one_need_two() {
        let repos = repos(41);
        let batches = batches(&repos, 40).unwrap();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].repos.len(), 40);
        assert_eq!(batches[1].repos, &repos[40..]);
        assert_eq!(batches[1].index, 1);
    }

    #[test]
    fn empty_input_has_no_batches() {
        assert!(batches(&[], 40).unwrap().is_empty());
    }

    #[test]
    fn aliases_restart_per_batch() {
        let repos = repos(3);
        let batches = batches(&repos, 2).unwrap();
        let second = &batches[1].payload.query;
        assert!(second.contains("r0: repository(owner: \"owner\", name: \"repo-2\")"));
        assert!(!second.contains("r1:"));
    }

    #[test]
    fn query_shape() {
        let payload = build_query(&[RepositoryRef::new("acme", "todo-app")]).unwrap();
        assert_eq!(
            payload.query,
            "{ r0: repository(owner: \"acme\", name: \"todo-app\") { \
             name stargazerCount description owner { login } \
             repositoryTopics(first: 5) { nodes { topic { name } } } } }"
        );
    }

    #[test]
    fn quotes_are_escaped() {
        let payload = build_query(&[RepositoryRef::new("a\"b", "c")]).unwrap();
        assert!(payload.query.contains(r#"owner: "a\"b""#));
    }

    #[test]
    fn payload_serializes_as_query_object() {
        let payload = QueryPayload {
            query: "{ }".to_string(),
        };
        assert_eq!(serde_json::to_string(&payload).unwrap(), r#"{"query":"{ }"}"#);
    }
}
