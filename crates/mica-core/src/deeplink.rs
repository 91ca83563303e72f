use crate::notebooks::Notebook;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeepLinkParams {
    pub notebook_id: Option<String>,
    pub repo: Option<String>,
    pub branch: Option<String>,
}

impl DeepLinkParams {
    /// Parses a raw query string (`k=v&k=v`, optional leading `?`).
    /// Values stay percent-encoded as transmitted; unknown keys are
    /// ignored.
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "notebookID" => params.notebook_id = Some(value.to_string()),
                "repo" => params.repo = Some(value.to_string()),
                "branch" => params.branch = Some(value.to_string()),
                _ => {}
            }
        }
        params
    }

    /// Percent-decoded `(repo, branch)` pair. `None` when either part is
    /// missing or fails to decode; a malformed deep link never faults.
    pub fn decoded_source(&self) -> Option<(String, String)> {
        let repo = self.repo.as_deref()?;
        let branch = self.branch.as_deref()?;
        let repo = urlencoding::decode(repo).ok()?;
        let branch = urlencoding::decode(branch).ok()?;
        Some((repo.into_owned(), branch.into_owned()))
    }
}

/// Matches deep-link parameters against the known notebooks. A supplied
/// `notebook_id` is authoritative: when it misses there is no fallback
/// to the remote-source pair.
pub fn resolve_notebook<'a>(
    notebooks: &'a [Notebook],
    params: &DeepLinkParams,
) -> Option<&'a Notebook> {
    if let Some(id) = params.notebook_id.as_deref() {
        return notebooks.iter().find(|notebook| notebook.id == id);
    }
    let (repo, branch) = params.decoded_source()?;
    notebooks
        .iter()
        .find(|notebook| notebook.matches_source(&repo, &branch))
}

#[cfg(test)]
mod tests {
    use super::{resolve_notebook, DeepLinkParams};
    use crate::notebooks::Notebook;

    fn notebook(id: &str, git_url: Option<&str>, git_branch: Option<&str>) -> Notebook {
        Notebook {
            id: id.to_string(),
            name: id.to_string(),
            git_url: git_url.map(str::to_string),
            git_branch: git_branch.map(str::to_string),
            created_at: 0,
        }
    }

    #[test]
    fn from_query_extracts_known_keys() {
        let params = DeepLinkParams::from_query("?notebookID=abc&repo=r&branch=b&extra=1");
        assert_eq!(params.notebook_id.as_deref(), Some("abc"));
        assert_eq!(params.repo.as_deref(), Some("r"));
        assert_eq!(params.branch.as_deref(), Some("b"));
    }

    #[test]
    fn resolve_prefers_notebook_id_over_source_pair() {
        let notebooks = vec![
            notebook("by-source", Some("git@example.com/a"), Some("main")),
            notebook("by-id", None, None),
        ];
        let params = DeepLinkParams {
            notebook_id: Some("by-id".to_string()),
            repo: Some("git%40example.com%2Fa".to_string()),
            branch: Some("main".to_string()),
        };
        let found = resolve_notebook(&notebooks, &params).expect("resolve");
        assert_eq!(found.id, "by-id");
    }

    #[test]
    fn resolve_does_not_fall_back_when_id_misses() {
        let notebooks = vec![notebook("nb", Some("git@example.com/a"), Some("main"))];
        let params = DeepLinkParams {
            notebook_id: Some("missing".to_string()),
            repo: Some("git%40example.com%2Fa".to_string()),
            branch: Some("main".to_string()),
        };
        assert!(resolve_notebook(&notebooks, &params).is_none());
    }

    #[test]
    fn resolve_matches_decoded_source_pair() {
        let notebooks = vec![notebook("nb", Some("git@example.com/a"), Some("main"))];
        let params = DeepLinkParams {
            notebook_id: None,
            repo: Some("git%40example.com%2Fa".to_string()),
            branch: Some("main".to_string()),
        };
        let found = resolve_notebook(&notebooks, &params).expect("resolve");
        assert_eq!(found.id, "nb");
    }

    #[test]
    fn resolve_treats_decode_failure_as_no_match() {
        let notebooks = vec![notebook("nb", Some("git@example.com/a"), Some("main"))];
        let params = DeepLinkParams {
            notebook_id: None,
            repo: Some("%FF".to_string()),
            branch: Some("main".to_string()),
        };
        assert!(resolve_notebook(&notebooks, &params).is_none());
    }

    #[test]
    fn resolve_requires_both_repo_and_branch() {
        let notebooks = vec![notebook("nb", Some("git@example.com/a"), Some("main"))];
        let params = DeepLinkParams {
            notebook_id: None,
            repo: Some("git%40example.com%2Fa".to_string()),
            branch: None,
        };
        assert!(resolve_notebook(&notebooks, &params).is_none());
    }
}
