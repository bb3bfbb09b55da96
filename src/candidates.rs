//! Ordered ref and root candidates shared by the GitHub and web-probe
//! strategies.
//!
//! Ref order favours per-module tags (`{artifact}-{version}`) because
//! multi-module repositories tag that way; a tag declared in the POM always
//! comes first.

pub fn ref_candidates(artifact_id: &str, version: &str, tag: Option<&str>) -> Vec<String> {
    let candidates = [
        tag.map(|t| t.trim().to_string()),
        Some(format!("{}-{}", artifact_id, version)),
        Some(format!("v{}", version)),
        Some(version.to_string()),
    ];

    dedup(candidates.into_iter().flatten().filter(|r| !r.is_empty()))
}

/// Last directory segment of the target's parent directory.
///
/// `com/acme/util/Strings.java` guesses `util`; a target with fewer than two
/// directory levels yields no guess.
pub fn module_guess(target: &str) -> Option<String> {
    let (parent, _) = target.rsplit_once('/')?;
    let (_, last) = parent.rsplit_once('/')?;
    (!last.is_empty()).then(|| last.to_string())
}

/// Source roots probed through the GitHub contents API for compiled entries.
pub fn api_source_roots(artifact_id: &str) -> Vec<String> {
    dedup([
        format!("{}/src/main/java", artifact_id),
        "src/main/java".to_string(),
        format!("{}/src/main/kotlin", artifact_id),
        "src/main/kotlin".to_string(),
        format!("{}/src", artifact_id),
        "src".to_string(),
    ])
}

/// Source roots tried by the web probe, which has no tree listing to fall
/// back on.
pub fn probe_source_roots(artifact_id: &str, target: &str) -> Vec<String> {
    let guess = module_guess(target);
    dedup(
        [
            Some(format!("{}/src/main/java", artifact_id)),
            guess.map(|g| format!("{}/src/main/java", g)),
            Some("src/main/java".to_string()),
        ]
        .into_iter()
        .flatten(),
    )
}

/// Resource roots; the empty string stands for the repository root.
pub fn resource_roots(artifact_id: &str, target: &str) -> Vec<String> {
    let guess = module_guess(target);
    dedup(
        [
            Some(format!("{}/src/main/resources", artifact_id)),
            guess.map(|g| format!("{}/src/main/resources", g)),
            Some("src/main/resources".to_string()),
            Some(artifact_id.to_string()),
            Some(String::new()),
        ]
        .into_iter()
        .flatten(),
    )
}

/// Directories tried when only the artifact itself was named.
pub fn artifact_roots(artifact_id: &str) -> Vec<String> {
    dedup([artifact_id.to_string(), String::new()])
}

/// `root/target`, or `target` alone for the repository root.
pub fn join_root(root: &str, target: &str) -> String {
    match (root.is_empty(), target.is_empty()) {
        (true, _) => target.to_string(),
        (false, true) => root.to_string(),
        (false, false) => format!("{}/{}", root, target),
    }
}

fn dedup(values: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}
