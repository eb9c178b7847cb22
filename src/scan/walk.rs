use crate::error::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Name of the metadata directory that marks a repository root.
pub const GIT_DIR_NAME: &str = ".git";

/// Directory names skipped during a scan unless overridden.
pub const DEFAULT_IGNORE: [&str; 3] = ["venv", ".venv", "node_modules"];

/// Recursively walks `root` and returns every directory that contains a `.git` directory.
///
/// Subtrees whose name is in `ignore` are pruned, `.git` directories are never entered and
/// symlinked directories are not followed. Any unreadable directory aborts the scan.
pub fn scan_repos<P: AsRef<Path>>(root: P, ignore: &[String]) -> Result<Vec<String>> {
    let root = root.as_ref();
    // a root that is not a readable directory fails before any cache update
    fs::read_dir(root)?;
    let mut repos = Vec::new();

    let mut walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry?;
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if ignore.iter().any(|i| *i == name) {
            log::debug!("Skipping ignored directory {}", entry.path().display());
            walker.skip_current_dir();
            continue;
        }

        if name == GIT_DIR_NAME {
            if let Some(parent) = entry.path().parent() {
                log::debug!("Found repository {}", parent.display());
                repos.push(parent.to_string_lossy().into_owned());
            }
            walker.skip_current_dir();
        }
    }

    log::info!("Found {} repositories under {}", repos.len(), root.display());
    Ok(repos)
}

pub fn default_ignore() -> Vec<String> {
    DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn rel(root: &Path, found: &[String]) -> Vec<String> {
        found
            .iter()
            .map(|p| {
                Path::new(p)
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }

    #[test]
    fn finds_repository_roots_not_metadata_dirs() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("alpha/.git/objects")).unwrap();
        fs::create_dir_all(root.join("beta/nested/.git")).unwrap();
        fs::create_dir_all(root.join("gamma/src")).unwrap();

        let found = scan_repos(root, &default_ignore()).unwrap();
        assert_eq!(rel(root, &found), vec!["alpha", "beta/nested"]);
        assert!(found.iter().all(|p| !p.ends_with(GIT_DIR_NAME)));
    }

    #[test]
    fn prunes_ignored_subtrees() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("node_modules/pkg/.git")).unwrap();
        fs::create_dir_all(root.join("app/.venv/lib/.git")).unwrap();
        fs::create_dir_all(root.join("app/.git")).unwrap();
        fs::create_dir_all(root.join("vendor/.git")).unwrap();

        let mut ignore = default_ignore();
        ignore.push("vendor".to_string());
        let found = scan_repos(root, &ignore).unwrap();
        assert_eq!(rel(root, &found), vec!["app"]);
    }

    #[test]
    fn does_not_descend_into_git_dir() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("repo/.git/modules/sub/.git")).unwrap();

        let found = scan_repos(root, &[]).unwrap();
        assert_eq!(rel(root, &found), vec!["repo"]);
    }

    #[test]
    fn nested_repositories_are_both_found() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("outer/.git")).unwrap();
        fs::create_dir_all(root.join("outer/inner/.git")).unwrap();

        let found = scan_repos(root, &[]).unwrap();
        assert_eq!(rel(root, &found), vec!["outer", "outer/inner"]);
    }

    #[test]
    fn git_file_is_not_a_repository_marker() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("worktree")).unwrap();
        fs::write(root.join("worktree/.git"), "gitdir: ../elsewhere").unwrap();

        assert!(scan_repos(root, &[]).unwrap().is_empty());
    }

    #[test]
    fn file_root_is_an_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("README.md");
        fs::write(&file, "# readme").unwrap();
        assert!(scan_repos(&file, &default_ignore()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_aborts_scan() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("a_repo/.git")).unwrap();
        let locked = root.join("locked");
        fs::create_dir_all(locked.join("inner/.git")).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // privileged users can still read the directory
        let readable = fs::read_dir(&locked).is_ok();
        let result = scan_repos(root, &[]);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if !readable {
            assert!(result.is_err());
        }
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_followed() {
        let outside = tempdir().unwrap();
        fs::create_dir_all(outside.path().join("target/.git")).unwrap();

        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("real/.git")).unwrap();
        std::os::unix::fs::symlink(outside.path().join("target"), root.join("linked")).unwrap();

        let found = scan_repos(root, &[]).unwrap();
        assert_eq!(rel(root, &found), vec!["real"]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(scan_repos(dir.path().join("nope"), &[]).is_err());
    }
}
