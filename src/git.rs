//! Git repository label for the folder being browsed

use std::fs;
use std::path::Path;

use regex::Regex;

/// Label of the repository containing `folder`, e.g. `peruse <main>`.
///
/// Walks `folder` and its ancestors for a readable `.git/config`. Reads files
/// only; no `git` process is spawned. `None` when no repository is found or
/// neither a name nor a branch can be determined.
pub fn repo_label(folder: &Path) -> Option<String> {
    for dir in folder.ancestors() {
        let git_dir = dir.join(".git");
        let Ok(config) = fs::read_to_string(git_dir.join("config")) else {
            continue;
        };
        let head = fs::read_to_string(git_dir.join("HEAD")).ok();
        let label = format_label(
            repo_name(&config).as_deref(),
            head.as_deref().and_then(head_branch).or_else(|| config_branch(&config)).as_deref(),
        );
        tracing::debug!("Git repository at {}: {:?}", dir.display(), label);
        return label;
    }
    None
}

fn format_label(name: Option<&str>, branch: Option<&str>) -> Option<String> {
    match (name, branch) {
        (Some(name), Some(branch)) => Some(format!("{} <{}>", name, branch)),
        (Some(name), None) => Some(name.to_string()),
        (None, Some(branch)) => Some(format!("<{}>", branch)),
        (None, None) => None,
    }
}

/// Repository name from the first `url = ...` line of a git config
fn repo_name(config: &str) -> Option<String> {
    let re = Regex::new(r"(?m)^\s*url\s*=\s*(\S+)\s*$").ok()?;
    let url = re.captures(config)?.get(1)?.as_str();
    let last = url
        .trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()
        .unwrap_or_default();
    let name = match last.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => last,
    };
    (!name.is_empty()).then(|| name.to_string())
}

/// Last `[branch "<name>"]` section of a git config
fn config_branch(config: &str) -> Option<String> {
    let re = Regex::new(r#"(?m)^\s*\[branch\s+"([^"]+)"\]"#).ok()?;
    re.captures_iter(config)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Branch checked out according to `.git/HEAD`; short hash when detached
fn head_branch(head: &str) -> Option<String> {
    let head = head.trim();
    if let Some(reference) = head.strip_prefix("ref:") {
        let branch = reference.trim().strip_prefix("refs/heads/")?;
        return (!branch.is_empty()).then(|| branch.to_string());
    }
    if head.len() >= 7 && head.chars().all(|c| c.is_ascii_hexdigit()) {
        return Some(head[..7].to_string());
    }
    None
}
