//! GraphQL documents for the calls REST does not offer.

use serde_json::{Value, json};

pub const REPOSITORY_ID: &str = r#"
query RepositoryId($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    id
  }
}
"#;

pub const ISSUE_ID: &str = r#"
query IssueId($owner: String!, $name: String!, $number: Int!) {
  repository(owner: $owner, name: $name) {
    issue(number: $number) {
      id
    }
  }
}
"#;

pub const TRANSFER_ISSUE: &str = r#"
mutation TransferIssue($issueId: ID!, $repositoryId: ID!) {
  transferIssue(input: { issueId: $issueId, repositoryId: $repositoryId }) {
    issue {
      id
      number
      url
      state
      title
      locked
      labels(first: 100) {
        nodes {
          name
          description
          color
        }
      }
    }
  }
}
"#;

/// Request body for a GraphQL call.
pub fn payload(query: &str, variables: Value) -> Value {
    json!({
        "query": query,
        "variables": variables,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_carries_query_and_variables() {
        let body = payload(REPOSITORY_ID, json!({"owner": "octo", "name": "hello"}));
        assert_eq!(body["query"], REPOSITORY_ID);
        assert_eq!(body["variables"]["owner"], "octo");
    }

    #[test]
    fn transfer_mutation_returns_labels() {
        assert!(TRANSFER_ISSUE.contains("transferIssue"));
        assert!(TRANSFER_ISSUE.contains("labels(first: 100)"));
    }
}
