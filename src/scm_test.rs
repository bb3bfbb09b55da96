#[cfg(test)]
mod tests {
    use crate::scm::{HostKind, RepoHandle, normalize};

    fn normalized(input: &str) -> Option<String> {
        normalize(input).map(|url| url.to_string())
    }

    #[test]
    fn test_wrapped_ssh_shorthand() {
        assert_eq!(
            normalized("scm:git:git@github.com:Owner/Repo.git"),
            Some("https://github.com/Owner/Repo".to_string())
        );
    }

    #[test]
    fn test_wrapped_https_keeps_scheme() {
        assert_eq!(
            normalized("scm:git:https://github.com/FasterXML/java-classmate.git"),
            Some("https://github.com/FasterXML/java-classmate".to_string())
        );
    }

    #[test]
    fn test_plain_web_url() {
        assert_eq!(
            normalized("  https://github.com/apache/commons-lang/ "),
            Some("https://github.com/apache/commons-lang".to_string())
        );
        assert_eq!(
            normalized("http://svn.apache.org/viewvc/commons/proper/lang"),
            Some("http://svn.apache.org/viewvc/commons/proper/lang".to_string())
        );
    }

    #[test]
    fn test_ssh_forms_for_known_hosts() {
        assert_eq!(
            normalized("git@gitlab.com:group/repo.git"),
            Some("https://gitlab.com/group/repo".to_string())
        );
        assert_eq!(
            normalized("scm:git:ssh://git@bitbucket.org/team/repo.git"),
            Some("https://bitbucket.org/team/repo".to_string())
        );
        assert_eq!(
            normalized("scm:git:git://github.com/square/okhttp.git"),
            Some("https://github.com/square/okhttp".to_string())
        );
    }

    #[test]
    fn test_ssh_for_unknown_host_is_unsupported() {
        assert_eq!(normalized("git@git.example.org:team/repo.git"), None);
    }

    #[test]
    fn test_unsupported() {
        assert_eq!(normalized("not-a-url"), None);
        assert_eq!(normalized(""), None);
        assert_eq!(normalized("scm:cvs:pserver:anonymous@cvs.example.org:/cvs"), None);
    }

    #[test]
    fn test_host_kind() {
        assert_eq!(
            normalize("https://GitHub.com/a/b").unwrap().host_kind(),
            HostKind::GitHub
        );
        assert_eq!(
            normalize("https://gitlab.com/a/b").unwrap().host_kind(),
            HostKind::GitLab
        );
        assert_eq!(
            normalize("https://bitbucket.org/a/b").unwrap().host_kind(),
            HostKind::Bitbucket
        );
        assert_eq!(
            normalize("https://git.example.org/a/b").unwrap().host_kind(),
            HostKind::Other
        );
    }

    #[test]
    fn test_repo_handle_from_github_url() {
        let url = normalize("https://github.com/FasterXML/java-classmate").unwrap();
        assert_eq!(
            RepoHandle::from_url(&url),
            Some(RepoHandle {
                owner: "FasterXML".to_string(),
                repo: "java-classmate".to_string(),
            })
        );
    }

    #[test]
    fn test_repo_handle_ignores_extra_segments() {
        let url = normalize("https://github.com/spring-projects/spring-boot/tree/main").unwrap();
        let handle = RepoHandle::from_url(&url).unwrap();
        assert_eq!(handle.owner, "spring-projects");
        assert_eq!(handle.repo, "spring-boot");
    }

    #[test]
    fn test_repo_handle_requires_github_and_two_segments() {
        let gitlab = normalize("https://gitlab.com/group/repo").unwrap();
        assert_eq!(RepoHandle::from_url(&gitlab), None);

        let owner_only = normalize("https://github.com/FasterXML").unwrap();
        assert_eq!(RepoHandle::from_url(&owner_only), None);
    }
}
