//! Git hook installation

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors;

const COMMIT_MSG_HOOK: &str = include_str!("../../../scripts/hooks/commit-msg");

/// Hooks shipped with templint, by file name
const HOOKS: [(&str, &str); 1] = [("commit-msg", COMMIT_MSG_HOOK)];

/// Result of hook installation
#[derive(Debug, Serialize)]
pub struct InstallResult {
    pub hooks_dir: String,
    pub installed: Vec<String>,
    pub skipped: Vec<String>,
}

/// Install the commit-message hook
///
/// Writes the hook script into `<git_dir>/hooks/` and makes it executable.
/// Without an explicit `git_dir` the repository is found by walking up from
/// the current directory.
///
/// # Errors
///
/// Returns error if:
/// - Not in a git repository
/// - Cannot write to the hooks directory
/// - File permissions cannot be set
pub fn install_hooks(git_dir: Option<PathBuf>) -> Result<InstallResult> {
    let git_dir = match git_dir {
        Some(dir) => dir,
        None => {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            find_git_dir(&current_dir)?
        }
    };

    let hooks_dir = git_dir.join("hooks");
    if !hooks_dir.exists() {
        fs::create_dir_all(&hooks_dir)
            .with_context(|| format!("Failed to create {}", hooks_dir.display()))?;
    }

    let mut installed = Vec::new();
    let mut skipped = Vec::new();

    for (name, script) in HOOKS {
        let hook_path = hooks_dir.join(name);
        if hook_path.exists() {
            tracing::info!(hook = name, "hook already exists, leaving it alone");
            skipped.push(format!("{} (already exists)", name));
            continue;
        }

        fs::write(&hook_path, script)
            .with_context(|| format!("Failed to write {} hook", name))?;
        set_executable(&hook_path)?;
        tracing::info!(hook = name, path = %hook_path.display(), "installed hook");
        installed.push(name.to_string());
    }

    Ok(InstallResult {
        hooks_dir: hooks_dir.to_string_lossy().to_string(),
        installed,
        skipped,
    })
}

/// Find the `.git` directory by walking up from `start`
fn find_git_dir(start: &Path) -> Result<PathBuf> {
    let mut dir = start;

    loop {
        let git_dir = dir.join(".git");

        if git_dir.is_dir() {
            return Ok(git_dir);
        }

        // Worktrees and submodules have a `.git` file pointing elsewhere
        if git_dir.is_file() {
            let content = fs::read_to_string(&git_dir).context("Failed to read .git file")?;

            if let Some(gitdir) = content.strip_prefix("gitdir: ") {
                let gitdir_path = dir.join(gitdir.trim());

                // Hooks live in the common directory, not the worktree's
                if let Some(parent) = gitdir_path.parent() {
                    if parent.file_name() == Some(std::ffi::OsStr::new("worktrees")) {
                        if let Some(common_git) = parent.parent() {
                            return Ok(common_git.to_path_buf());
                        }
                    }
                }

                return Ok(gitdir_path);
            }
        }

        match dir.parent() {
            Some(parent) => dir = parent,
            None => return Err(errors::not_in_git_repo().into()),
        }
    }
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)
        .context("Failed to get file metadata")?
        .permissions();
    perms.set_mode(perms.mode() | 0o111);

    fs::set_permissions(path, perms).context("Failed to set executable permission")?;

    Ok(())
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_git_dir_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        let git_dir = temp.path().join(".git");
        fs::create_dir(&git_dir).unwrap();
        let subdir = temp.path().join("templates/shell-project");
        fs::create_dir_all(&subdir).unwrap();

        assert_eq!(find_git_dir(&subdir).unwrap(), git_dir);
    }

    #[test]
    fn test_find_git_dir_follows_worktree_file() {
        let temp = TempDir::new().unwrap();
        let main_git = temp.path().join("main/.git");
        fs::create_dir_all(main_git.join("worktrees/feature")).unwrap();

        let worktree = temp.path().join("feature");
        fs::create_dir_all(&worktree).unwrap();
        fs::write(
            worktree.join(".git"),
            format!("gitdir: {}\n", main_git.join("worktrees/feature").display()),
        )
        .unwrap();

        assert_eq!(find_git_dir(&worktree).unwrap(), main_git);
    }

    #[test]
    fn test_install_hooks() {
        let temp = TempDir::new().unwrap();
        let git_dir = temp.path().join(".git");
        fs::create_dir(&git_dir).unwrap();

        let result = install_hooks(Some(git_dir.clone())).unwrap();

        assert_eq!(result.installed, vec!["commit-msg".to_string()]);
        assert!(result.skipped.is_empty());

        let hook = fs::read_to_string(git_dir.join("hooks/commit-msg")).unwrap();
        assert!(hook.contains("templint check-commit \"$1\""));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::metadata(git_dir.join("hooks/commit-msg"))
                .unwrap()
                .permissions();
            assert_ne!(perms.mode() & 0o111, 0);
        }
    }

    #[test]
    fn test_install_hooks_skips_existing() {
        let temp = TempDir::new().unwrap();
        let hooks_dir = temp.path().join(".git/hooks");
        fs::create_dir_all(&hooks_dir).unwrap();
        fs::write(hooks_dir.join("commit-msg"), "existing hook").unwrap();

        let result = install_hooks(Some(temp.path().join(".git"))).unwrap();

        assert!(result.installed.is_empty());
        assert_eq!(result.skipped, vec!["commit-msg (already exists)".to_string()]);
        assert_eq!(
            fs::read_to_string(hooks_dir.join("commit-msg")).unwrap(),
            "existing hook"
        );
    }
}
