/// Paths exempt from authentication.
///
/// Configured entries arrive with inconsistent leading slashes, so entries and
/// probed paths are both normalized before comparison. Matching is exact, not
/// prefix-based: `/api/v1/auth/sign-in/extra` is still a protected path.
#[derive(Clone, Debug)]
pub struct AllowList {
    paths: Vec<String>,
}

impl AllowList {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths = paths
            .into_iter()
            .map(|p| normalize(p.as_ref()).to_string())
            .collect();

        Self { paths }
    }

    pub fn contains(&self, path: &str) -> bool {
        let path = normalize(path);
        self.paths.iter().any(|p| p == path)
    }
}

fn normalize(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_regardless_of_leading_slash_on_either_side() {
        let list = AllowList::new(["api/v1/auth/sign-in", "/api/v1/auth/validate"]);

        assert!(list.contains("/api/v1/auth/sign-in"));
        assert!(list.contains("api/v1/auth/sign-in"));
        assert!(list.contains("/api/v1/auth/validate"));
        assert!(list.contains("api/v1/auth/validate"));
    }

    #[test]
    fn matching_is_exact_not_prefix() {
        let list = AllowList::new(["/api/v1/auth/sign-in"]);

        assert!(!list.contains("/api/v1/auth/sign-in/extra"));
        assert!(!list.contains("/api/v1/auth"));
        assert!(!list.contains("/api/v1/auth/sign-in-x"));
    }

    #[test]
    fn unlisted_paths_do_not_match() {
        let list = AllowList::new(["/api/v1/auth/sign-in"]);

        assert!(!list.contains("/api/v1/orders"));
        assert!(!AllowList::new(Vec::<String>::new()).contains("/api/v1/orders"));
    }
}
