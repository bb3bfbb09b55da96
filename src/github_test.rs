#[cfg(test)]
mod tests {
    use crate::config::ResolverConfig;
    use crate::entry::Target;
    use crate::github::{GitHubResolver, best_tree_match, blob_url, score_tree_path};
    use crate::models::{PathKind, PathResolution};
    use crate::scm::RepoHandle;
    use crate::test_utils::StubTransport;

    const CLASSMATE_API: &str = "https://api.github.com/repos/FasterXML/java-classmate";
    const ACME_API: &str = "https://api.github.com/repos/acme-oss/acme-acme-oss";

    fn classmate() -> RepoHandle {
        RepoHandle {
            owner: "FasterXML".to_string(),
            repo: "java-classmate".to_string(),
        }
    }

    fn acme() -> RepoHandle {
        RepoHandle {
            owner: "acme-oss".to_string(),
            repo: "acme-acme-oss".to_string(),
        }
    }

    fn annotation_inclusion() -> Target {
        Target::Source("com/fasterxml/classmate/AnnotationInclusion.java".to_string())
    }

    #[test]
    fn test_resolves_source_at_validated_tag() {
        let config = ResolverConfig::default();
        let transport = StubTransport::new()
            .respond(&format!("{}/git/ref/tags/classmate-1.7.0", CLASSMATE_API), 404, "")
            .respond(&format!("{}/git/ref/heads/classmate-1.7.0", CLASSMATE_API), 404, "")
            .respond_with_file(
                &format!("{}/git/ref/tags/v1.7.0", CLASSMATE_API),
                "github/ref-tag-classmate-1.7.0.json",
            )
            .respond(
                &format!(
                    "{}/contents/classmate/src/main/java/com/fasterxml/classmate/AnnotationInclusion.java?ref=v1.7.0",
                    CLASSMATE_API
                ),
                404,
                "",
            )
            .respond_with_file(
                &format!(
                    "{}/contents/src/main/java/com/fasterxml/classmate/AnnotationInclusion.java?ref=v1.7.0",
                    CLASSMATE_API
                ),
                "github/contents-file.json",
            );

        let resolved = GitHubResolver::new(&transport, &config).resolve(
            &classmate(),
            "classmate",
            "1.7.0",
            None,
            &annotation_inclusion(),
        );

        assert_eq!(
            resolved,
            Some((
                "https://github.com/FasterXML/java-classmate/blob/v1.7.0/src/main/java/com/fasterxml/classmate/AnnotationInclusion.java".to_string(),
                PathKind::File
            ))
        );
    }

    #[test]
    fn test_branch_name_is_accepted_as_ref() {
        let config = ResolverConfig::default();
        let transport = StubTransport::new()
            .respond(&format!("{}/git/ref/tags/develop", CLASSMATE_API), 404, "")
            .respond(&format!("{}/git/ref/heads/develop", CLASSMATE_API), 200, "{}");

        let resolver = GitHubResolver::new(&transport, &config);
        let refs = vec!["develop".to_string(), "v1.0".to_string()];
        assert_eq!(
            resolver.pick_ref(&classmate(), &refs),
            Some("develop".to_string())
        );
    }

    #[test]
    fn test_falls_back_to_default_branch() {
        let config = ResolverConfig::default();
        let transport = StubTransport::new()
            .respond_with_file(CLASSMATE_API, "github/repo-java-classmate.json")
            .respond_with_file(
                &format!(
                    "{}/contents/src/main/java/com/fasterxml/classmate/AnnotationInclusion.java?ref=master",
                    CLASSMATE_API
                ),
                "github/contents-file.json",
            );

        let (url, _) = GitHubResolver::new(&transport, &config)
            .resolve(
                &classmate(),
                "classmate",
                "9.9.9",
                None,
                &annotation_inclusion(),
            )
            .unwrap();
        assert_eq!(
            url,
            "https://github.com/FasterXML/java-classmate/blob/master/src/main/java/com/fasterxml/classmate/AnnotationInclusion.java"
        );
    }

    #[test]
    fn test_default_branch_missing_field() {
        let config = ResolverConfig::default();
        let transport = StubTransport::new().respond(CLASSMATE_API, 200, r#"{"name":"x"}"#);
        let resolver = GitHubResolver::new(&transport, &config);
        assert_eq!(resolver.default_branch(&classmate()), None);
    }

    #[test]
    fn test_no_ref_means_no_resolution() {
        let config = ResolverConfig::default();
        let transport = StubTransport::new().respond(CLASSMATE_API, 403, "rate limited");
        let resolved = GitHubResolver::new(&transport, &config).resolve(
            &classmate(),
            "classmate",
            "1.7.0",
            None,
            &annotation_inclusion(),
        );
        assert_eq!(resolved, None);
    }

    #[test]
    fn test_tree_search_for_monorepo_layout() {
        let config = ResolverConfig::default();
        let transport = StubTransport::new().respond_with_file(
            &format!("{}/git/trees/widget-2.3.1?recursive=1", ACME_API),
            "github/tree-monorepo.json",
        );

        let found = GitHubResolver::new(&transport, &config).find_path(
            &acme(),
            "widget-2.3.1",
            "widget",
            &Target::Source("org/acme/widget/Widget.java".to_string()),
        );
        assert_eq!(
            found,
            Some(PathResolution::file(
                "widget/src/main/java/org/acme/widget/Widget.java"
            ))
        );
        // Six contents probes precede the tree listing
        assert_eq!(transport.requested_urls().len(), 7);
    }

    #[test]
    fn test_resource_directory_kind() {
        let config = ResolverConfig::default();
        let transport = StubTransport::new().respond_with_file(
            &format!(
                "{}/contents/widget/src/main/resources/META-INF?ref=main",
                ACME_API
            ),
            "github/contents-dir.json",
        );

        let found = GitHubResolver::new(&transport, &config).find_path(
            &acme(),
            "main",
            "widget",
            &Target::Resource("META-INF".to_string()),
        );
        assert_eq!(
            found,
            Some(PathResolution::dir("widget/src/main/resources/META-INF"))
        );
    }

    #[test]
    fn test_resource_at_repository_root() {
        let config = ResolverConfig::default();
        let transport = StubTransport::new().respond(
            &format!("{}/contents/LICENSE.txt?ref=main", ACME_API),
            200,
            r#"{"type":"file","name":"LICENSE.txt"}"#,
        );

        let found = GitHubResolver::new(&transport, &config).find_path(
            &acme(),
            "main",
            "widget",
            &Target::Resource("LICENSE.txt".to_string()),
        );
        assert_eq!(found, Some(PathResolution::file("LICENSE.txt")));
    }

    #[test]
    fn test_artifact_directory() {
        let config = ResolverConfig::default();
        let transport = StubTransport::new().respond_with_file(
            &format!("{}/contents/widget?ref=widget-2.3.1", ACME_API),
            "github/contents-dir.json",
        );

        let found = GitHubResolver::new(&transport, &config)
            .find_path(&acme(), "widget-2.3.1", "widget", &Target::Artifact)
            .unwrap();
        assert_eq!(found, PathResolution::dir("widget"));
    }

    #[test]
    fn test_token_sent_as_bearer() {
        let config = ResolverConfig::default().with_github_token("s3cr3t");
        let transport = StubTransport::new();
        let resolver = GitHubResolver::new(&transport, &config);
        assert_eq!(resolver.default_branch(&classmate()), None);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert!(
            requests[0]
                .headers
                .contains(&("Authorization".to_string(), "Bearer s3cr3t".to_string()))
        );
        assert!(
            requests[0]
                .headers
                .contains(&("Accept".to_string(), "application/vnd.github+json".to_string()))
        );
    }

    #[test]
    fn test_ref_with_slash_keeps_path_separator() {
        let config = ResolverConfig::default();
        let transport = StubTransport::new().respond(
            &format!("{}/git/ref/tags/release/1.0%2B1", CLASSMATE_API),
            200,
            "{}",
        );
        let resolver = GitHubResolver::new(&transport, &config);
        let refs = vec!["release/1.0+1".to_string()];
        assert_eq!(
            resolver.pick_ref(&classmate(), &refs),
            Some("release/1.0+1".to_string())
        );
    }

    #[test]
    fn test_score_tree_path() {
        let target = "org/acme/widget/Widget.java";
        assert_eq!(
            score_tree_path("widget/src/main/java/org/acme/widget/Widget.java", target, "widget"),
            6
        );
        assert_eq!(
            score_tree_path("src/main/java/org/acme/widget/Widget.java", target, "widget"),
            2
        );
        assert_eq!(score_tree_path(target, target, "widget"), 0);
    }

    #[test]
    fn test_best_tree_match_ties_keep_first_seen() {
        let paths = [
            "a/src/main/java/x/Y.java",
            "b/src/main/java/x/Y.java",
            "x/Y.javaz",
        ];
        assert_eq!(
            best_tree_match(paths, "x/Y.java", "lib"),
            Some("a/src/main/java/x/Y.java".to_string())
        );
        assert_eq!(best_tree_match(["other/Z.java"], "x/Y.java", "lib"), None);
    }

    #[test]
    fn test_blob_url_for_directory_at_root() {
        assert_eq!(
            blob_url("https://github.com", &acme(), PathKind::Dir, "main", ""),
            "https://github.com/acme-oss/acme-acme-oss/tree/main"
        );
    }

    #[test]
    fn test_existence_checks_skip_bodies_but_lookups_keep_them() {
        let config = ResolverConfig::default();
        let transport = StubTransport::new()
            .respond(&format!("{}/git/ref/tags/main", ACME_API), 200, "{}")
            .respond_with_file(
                &format!("{}/contents/widget/src/main/java/org/acme/A.java?ref=main", ACME_API),
                "github/contents-file.json",
            )
            .respond_with_file(
                &format!("{}/contents/widget/src/main/resources/META-INF?ref=main", ACME_API),
                "github/contents-dir.json",
            );
        let resolver = GitHubResolver::new(&transport, &config);

        let refs = vec!["main".to_string()];
        assert_eq!(resolver.pick_ref(&acme(), &refs), Some("main".to_string()));
        assert_eq!(
            resolver.find_path(
                &acme(),
                "main",
                "widget",
                &Target::Source("org/acme/A.java".to_string())
            ),
            Some(PathResolution::file("widget/src/main/java/org/acme/A.java"))
        );
        assert_eq!(
            resolver.find_path(&acme(), "main", "widget", &Target::Resource("META-INF".to_string())),
            Some(PathResolution::dir("widget/src/main/resources/META-INF"))
        );

        let status_only: Vec<bool> = transport.requests().iter().map(|r| r.status_only).collect();
        assert_eq!(status_only, vec![true, true, false]);
    }
}
