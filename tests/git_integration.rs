//! Integration tests for the Git interface.
//!
//! These tests use real git repositories created via tempfile to verify
//! tag lookup, ref resolution and subject listing against actual history.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use fixnotes::engine::extract::{collect_subjects, CommitRange};
use fixnotes::git::{Git, GitError};

/// Test fixture that creates a real git repository.
struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new test repository with an initial commit.
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");

        run_git(dir.path(), &["init"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        run_git(dir.path(), &["config", "user.name", "Test User"]);
        run_git(dir.path(), &["config", "commit.gpgsign", "false"]);

        let repo = Self { dir };
        repo.commit("Initial commit");
        repo
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn git(&self) -> Git {
        Git::open(self.path()).expect("failed to open test repo")
    }

    /// Record an empty commit with `message`.
    fn commit(&self, message: &str) {
        run_git(self.path(), &["commit", "--allow-empty", "-m", message]);
    }

    fn tag(&self, name: &str) {
        run_git(self.path(), &["tag", name]);
    }

    /// Point `refs/remotes/<remote>/<name>` at HEAD without a real remote.
    fn remote_ref(&self, remote: &str, name: &str) {
        let refname = format!("refs/remotes/{}/{}", remote, name);
        run_git(self.path(), &["update-ref", &refname, "HEAD"]);
    }
}

/// Run a git command in the given directory.
fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

fn sorted(mut v: Vec<String>) -> Vec<String> {
    v.sort();
    v
}

mod open {
    use super::*;

    #[test]
    fn discovers_from_subdirectory() {
        let repo = TestRepo::new();
        let sub = repo.path().join("nested/dir");
        std::fs::create_dir_all(&sub).unwrap();

        let git = Git::open(&sub).unwrap();
        assert!(git.work_dir().is_some());
    }

    #[test]
    fn outside_repo_fails() {
        let dir = TempDir::new().unwrap();
        let result = Git::open(dir.path());
        assert!(matches!(result, Err(GitError::NotARepo { .. })));
    }
}

mod tags {
    use super::*;

    #[test]
    fn existing_tag_is_found() {
        let repo = TestRepo::new();
        repo.tag("v1.0.0");

        let git = repo.git();
        assert!(git.tag_exists("v1.0.0").unwrap());
        assert!(!git.tag_exists("v2.0.0").unwrap());
    }

    #[test]
    fn branch_is_not_a_tag() {
        let repo = TestRepo::new();
        run_git(repo.path(), &["branch", "release-1"]);
        assert!(!repo.git().tag_exists("release-1").unwrap());
    }
}

mod subjects {
    use super::*;

    #[test]
    fn range_excludes_start_and_includes_end() {
        let repo = TestRepo::new();
        repo.tag("v1");
        repo.commit("DEV-1 first");
        repo.commit("DEV-2 second");
        repo.tag("v2");
        repo.commit("DEV-3 after");

        let git = repo.git();
        let from = git.resolve("v1").unwrap();
        let to = git.resolve("v2").unwrap();

        assert_eq!(
            sorted(git.commit_subjects(&from, &to).unwrap()),
            vec!["DEV-1 first", "DEV-2 second"]
        );
    }

    #[test]
    fn empty_range() {
        let repo = TestRepo::new();
        repo.tag("v1");

        let git = repo.git();
        let head = git.head_oid().unwrap();
        assert!(git.commit_subjects(&head, &head).unwrap().is_empty());
    }

    #[test]
    fn unknown_ref_is_not_found() {
        let repo = TestRepo::new();
        let err = repo.git().resolve("no-such-ref").unwrap_err();
        assert!(matches!(err, GitError::RefNotFound { .. }));
    }
}

mod extraction {
    use super::*;

    #[test]
    fn tag_range_uses_local_refs() {
        let repo = TestRepo::new();
        repo.tag("v1");
        repo.commit("DEV-1 fix");
        repo.commit("DEV-1 fix");
        repo.commit("DEV-2 feature");
        repo.tag("v2");

        let span = collect_subjects(
            &repo.git(),
            &CommitRange::new("v1", Some("v2".into())),
            "origin",
        )
        .unwrap();

        assert_eq!(sorted(span.subjects), vec!["DEV-1 fix", "DEV-2 feature"]);
    }

    #[test]
    fn non_tag_falls_back_to_remote_refs() {
        let repo = TestRepo::new();
        repo.remote_ref("origin", "release-1");
        repo.commit("DEV-5 on release 2");
        repo.remote_ref("origin", "release-2");

        let span = collect_subjects(
            &repo.git(),
            &CommitRange::new("release-1", Some("release-2".into())),
            "origin",
        )
        .unwrap();

        assert_eq!(span.subjects, vec!["DEV-5 on release 2"]);
    }

    #[test]
    fn non_tag_without_remote_ref_is_fatal() {
        let repo = TestRepo::new();
        run_git(repo.path(), &["branch", "release-1"]);
        repo.commit("DEV-5 change");
        run_git(repo.path(), &["branch", "release-2"]);

        let err = collect_subjects(
            &repo.git(),
            &CommitRange::new("release-1", Some("release-2".into())),
            "origin",
        )
        .unwrap_err();

        assert!(err.to_string().contains("origin/release-1"));
    }

    #[test]
    fn since_tag_reads_to_head() {
        let repo = TestRepo::new();
        repo.tag("v1");
        repo.commit("DEV-7 unreleased");

        let git = repo.git();
        let span = collect_subjects(&git, &CommitRange::new("v1", None), "origin").unwrap();

        assert_eq!(span.to, git.head_oid().unwrap());
        assert_eq!(span.subjects, vec!["DEV-7 unreleased"]);
    }
}
