//! # Error Suggestions
//!
//! Helper functions for building error messages with hints. Errors should
//! tell users what went wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pbxsync::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Target not found: {}", name);
//!
//! // Use:
//! return Err(suggestions::target_not_found(name, &available));
//! ```

use std::path::Path;

use crate::error::Error;

/// Error for a `--from`/`--to` name that matches no native target.
///
/// Suggests the closest target name when one is within a small edit distance.
pub fn target_not_found(name: &str, available: &[String]) -> anyhow::Error {
    let candidates: Vec<&str> = available.iter().map(String::as_str).collect();
    let did_you_mean = find_similar(name, &candidates)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Target not found: '{name}'{did_you_mean}\n\n\
         Available targets are: {targets}\n\
         hint: Run 'pbxsync ls' to list the targets of a project",
        targets = available.join(", ")
    )
}

/// Error for a directory without any `.pbxproj` files.
pub fn no_projects_found(root: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "No projects found under {root}\n\n\
         hint: Run pbxsync from the directory containing your .xcodeproj\n\
         hint: Use --project to point at a project.pbxproj file directly",
        root = root.display()
    )
}

/// Error for a choice that would need a prompt in a non-interactive session.
pub fn selection_required(what: &str, flag: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "No {what} selected and the session is not interactive\n\n\
         hint: Pass {flag} on the command line\n\
         hint: Or set it in .pbxsync.yaml"
    )
}

/// Error for several projects found where exactly one is needed.
pub fn multiple_projects(count: usize) -> anyhow::Error {
    anyhow::anyhow!(
        "Found {count} projects and the session is not interactive\n\n\
         hint: Use --project to choose one\n\
         hint: Run 'pbxsync ls' to see them all"
    )
}

/// Turn a library error into an `anyhow` error, attaching hints where the
/// library error alone would leave the user stuck.
pub fn explain(error: Error) -> anyhow::Error {
    match error {
        Error::TargetNotFound { name, available } => target_not_found(&name, &available),
        Error::InsufficientTargets { found } => anyhow::anyhow!(
            "{error}\n\n\
             hint: Only native targets with a name can be synchronized",
            error = Error::InsufficientTargets { found }
        ),
        Error::PhaseNotFound { target, kind } => anyhow::anyhow!(
            "{error}\n\n\
             hint: Add an empty \"{phase}\" phase to '{target}' in Xcode, then try again",
            error = Error::PhaseNotFound {
                target: target.clone(),
                kind
            },
            phase = kind.display_name(),
        ),
        other => anyhow::Error::new(other),
    }
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(&input.to_lowercase(), &candidate.to_lowercase());
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PhaseKind;

    fn targets() -> Vec<String> {
        vec!["App".to_string(), "App Beta".to_string()]
    }

    #[test]
    fn test_target_not_found_suggests_similar() {
        let message = target_not_found("App Bta", &targets()).to_string();

        assert!(message.contains("Target not found: 'App Bta'"));
        assert!(message.contains("Did you mean 'App Beta'?"));
        assert!(message.contains("Available targets are: App, App Beta"));
    }

    #[test]
    fn test_target_not_found_no_suggestion_for_very_different() {
        let message = target_not_found("Widget Extension", &targets()).to_string();

        assert!(message.contains("Target not found"));
        assert!(!message.contains("Did you mean"));
    }

    #[test]
    fn test_no_projects_found_includes_hints() {
        let message = no_projects_found(Path::new("/work")).to_string();

        assert!(message.contains("No projects found under /work"));
        assert!(message.contains("--project"));
    }

    #[test]
    fn test_selection_required_names_flag() {
        let message = selection_required("source target", "--from <NAME>").to_string();

        assert!(message.contains("No source target selected"));
        assert!(message.contains("--from <NAME>"));
    }

    #[test]
    fn test_explain_target_not_found() {
        let message = explain(Error::TargetNotFound {
            name: "app".to_string(),
            available: targets(),
        })
        .to_string();
        assert!(message.contains("Did you mean 'App'?"));
    }

    #[test]
    fn test_explain_phase_not_found() {
        let message = explain(Error::PhaseNotFound {
            target: "App Beta".to_string(),
            kind: PhaseKind::Resources,
        })
        .to_string();
        assert!(message.contains("Target 'App Beta' has no resources build phase"));
        assert!(message.contains("Add an empty \"Resources\" phase"));
    }

    #[test]
    fn test_explain_passes_other_errors_through() {
        let message = explain(Error::NoPhaseKinds).to_string();
        assert_eq!(message, "At least one phase kind must be selected");
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("app beta", "app beta"), 0);
        assert_eq!(edit_distance("app bta", "app beta"), 1);
        assert_eq!(edit_distance("ap", "app"), 1);
        assert_eq!(edit_distance("", "app"), 3);
    }

    #[test]
    fn test_find_similar_is_case_insensitive() {
        let candidates = ["App", "App Beta"];

        assert_eq!(find_similar("app", &candidates), Some("App"));
        assert_eq!(find_similar("APP BETA", &candidates), Some("App Beta"));
        assert_eq!(find_similar("Widget", &candidates), None);
    }
}
