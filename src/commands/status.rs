use anyhow::Result;
use colored::Colorize;
use log::warn;

use crate::App;
use crate::ops::executor::Executor;

impl<E: Executor> App<E> {
    /// Show the series with the state of each patch.
    ///
    /// `=` marks the topmost applied patch, `+` the other applied patches and
    /// `-` the ones still to be pushed.
    pub async fn cmd_status(&self, stdout: &mut impl std::io::Write) -> Result<()> {
        let series = self.read_series()?;
        let applied = self.read_applied()?;

        for patch in applied.iter().filter(|patch| !series.contains(patch)) {
            warn!("Applied patch {} is not in the series", patch);
        }

        if series.is_empty() {
            writeln!(stdout, "No patches in series")?;
            return Ok(());
        }

        let top = applied
            .last()
            .and_then(|top| series.iter().position(|patch| patch == top));
        for (index, patch) in series.iter().enumerate() {
            let name = patch.to_string();
            let line = if Some(index) == top {
                format!("{} {}", "=".green(), name.green().bold())
            } else if applied.contains(patch) {
                format!("{} {}", "+".green(), name.green())
            } else {
                format!("{} {}", "-".dimmed(), name.dimmed())
            };
            writeln!(stdout, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::App;
    use crate::config::Config;
    use crate::ops::executor::MockExecutor;

    fn app_with(files: &[(&str, &str)]) -> anyhow::Result<(tempfile::TempDir, App<MockExecutor>)> {
        let dir = tempfile::tempdir()?;
        for (name, contents) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, contents)?;
        }
        // Status only reads files; quilt must never run.
        let mut executor = MockExecutor::new();
        executor.expect_execute().never();
        let app = App::new(Config::default_for_tests(), executor, dir.path().to_path_buf());
        Ok((dir, app))
    }

    #[tokio::test]
    async fn test_cmd_status_marks_applied_patches() -> anyhow::Result<()> {
        let (_dir, app) = app_with(&[
            ("patches/series", "patch1.diff\npatch2.diff\ndebian/patch3.diff\n"),
            (".pc/applied-patches", "patch1.diff\npatch2.diff\n"),
        ])?;

        let mut stdout = Vec::new();
        app.cmd_status(&mut stdout).await?;
        insta::assert_snapshot!(String::from_utf8(stdout)?, @r"
        + patch1.diff
        = patch2.diff
        - debian/patch3.diff
        ");
        Ok(())
    }

    #[tokio::test]
    async fn test_cmd_status_marks_one_top_patch() -> anyhow::Result<()> {
        let (_dir, app) = app_with(&[
            ("patches/series", "patch1.diff\npatch2.diff\npatch2.diff\n"),
            (".pc/applied-patches", "patch1.diff\npatch2.diff\n"),
        ])?;

        let mut stdout = Vec::new();
        app.cmd_status(&mut stdout).await?;
        insta::assert_snapshot!(String::from_utf8(stdout)?, @r"
        + patch1.diff
        = patch2.diff
        + patch2.diff
        ");
        Ok(())
    }

    #[tokio::test]
    async fn test_cmd_status_nothing_applied()-> anyhow::Result<()> {
        let (_dir, app) = app_with(&[("patches/series", "patch1.diff\npatch2.diff")])?;

        let mut stdout = Vec::new();
        app.cmd_status(&mut stdout).await?;
        insta::assert_snapshot!(String::from_utf8(stdout)?, @r"
        - patch1.diff
        - patch2.diff
        ");
        Ok(())
    }

    #[tokio::test]
    async fn test_cmd_status_empty_series() -> anyhow::Result<()> {
        let (_dir, app) = app_with(&[("patches/series", "\n")])?;

        let mut stdout = Vec::new();
        app.cmd_status(&mut stdout).await?;
        assert_eq!(String::from_utf8(stdout)?, "No patches in series\n");
        Ok(())
    }
}
