//! Scoped, self-removing workspaces for a single script run.
//!
//! A [`Workspace`] owns a uniquely-named temporary directory. The directory
//! is removed when the workspace is closed or dropped, so every exit path of
//! an execution (success, timeout, fault) leaves nothing behind.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::script::Script;

/// Prefix of every workspace directory name.
pub const WORKSPACE_PREFIX: &str = "agent-run-";

/// An ephemeral directory holding one synthesized script.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a fresh workspace under `root`, or the system temp dir when
    /// `root` is `None`.
    pub fn create(root: Option<&Path>) -> std::io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(WORKSPACE_PREFIX);
        let dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        Ok(Self { dir })
    }

    /// [`Workspace::create`] on the blocking pool.
    pub async fn provision(root: Option<PathBuf>) -> std::io::Result<Self> {
        tokio::task::spawn_blocking(move || Self::create(root.as_deref()))
            .await
            .map_err(std::io::Error::other)?
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Where `script` lives inside this workspace.
    pub fn script_path(&self, script: &Script) -> PathBuf {
        self.path().join(script.language.file_name())
    }

    /// Write `script` into the workspace and return its path.
    pub async fn write_script(&self, script: &Script) -> std::io::Result<PathBuf> {
        let path = self.script_path(script);
        tokio::fs::write(&path, script.source.as_bytes()).await?;
        Ok(path)
    }

    /// Remove the directory, reporting any removal error.
    pub fn close(self) -> std::io::Result<()> {
        self.dir.close()
    }

    /// [`Workspace::close`] on the blocking pool.
    pub async fn dispose(self) -> std::io::Result<()> {
        tokio::task::spawn_blocking(move || self.close())
            .await
            .map_err(std::io::Error::other)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_create_under_root_uses_prefix() {
        let root = tempfile::tempdir().unwrap();
        let ws = Workspace::create(Some(root.path())).unwrap();

        assert!(ws.path().starts_with(root.path()));
        let name = ws.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with(WORKSPACE_PREFIX));
    }

    #[test]
    fn test_workspaces_are_unique() {
        let root = tempfile::tempdir().unwrap();
        let a = Workspace::create(Some(root.path())).unwrap();
        let b = Workspace::create(Some(root.path())).unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[tokio::test]
    async fn test_write_script_places_file() {
        let root = tempfile::tempdir().unwrap();
        let ws = Workspace::create(Some(root.path())).unwrap();
        let script = Script::python("print(1)\n");

        let path = ws.write_script(&script).await.unwrap();
        assert_eq!(path, ws.path().join("solution.py"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "print(1)\n");
    }

    #[tokio::test]
    async fn test_close_removes_directory() {
        let root = tempfile::tempdir().unwrap();
        let ws = Workspace::create(Some(root.path())).unwrap();
        ws.write_script(&Script::shell("echo hi\n")).await.unwrap();

        assert_eq!(entries(root.path()), 1);
        ws.close().unwrap();
        assert_eq!(entries(root.path()), 0);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_provision_and_dispose() {
        let root = tempfile::tempdir().unwrap();
        let ws = Workspace::provision(Some(root.path().to_path_buf()))
            .await
            .unwrap();
        ws.write_script(&Script::python("print(1)\n")).await.unwrap();
        assert_eq!(entries(root.path()), 1);

        ws.dispose().await.unwrap();
        assert_eq!(entries(root.path()), 0);
    }

    #[tokio::test]
    async fn test_provision_in_missing_root_fails() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("does-not-exist");
        assert!(Workspace::provision(Some(missing)).await.is_err());
    }

    #[test]
    fn test_drop_removes_directory() {
        let root = tempfile::tempdir().unwrap();
        {
            let _ws = Workspace::create(Some(root.path())).unwrap();
            assert_eq!(entries(root.path()), 1);
        }
        assert_eq!(entries(root.path()), 0);
    }

    #[test]
    fn test_create_in_missing_root_fails() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("does-not-exist");
        assert!(Workspace::create(Some(&missing)).is_err());
    }
}
