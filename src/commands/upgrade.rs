use anyhow::Result;

use crate::App;
use crate::ops::executor::Executor;

impl<E: Executor> App<E> {
    /// Bring quilt's metadata in the working directory up to date.
    pub async fn cmd_upgrade(&self, stdout: &mut impl std::io::Write) -> Result<()> {
        let output = self.quilt.upgrade().await?;
        write!(stdout, "{}", output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::App;
    use crate::config::Config;
    use crate::ops::executor::MockExecutor;

    #[tokio::test]
    async fn test_cmd_upgrade_reports_missing_quilt() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let mut executor = MockExecutor::new();
        executor
            .expect_execute()
            .withf(|invocation| invocation.args == ["upgrade"])
            .returning(|_| Err(std::io::Error::from(std::io::ErrorKind::NotFound)));

        let app = App::new(Config::default_for_tests(), executor, dir.path().to_path_buf());
        let mut stdout = Vec::new();
        let error_msg = app.cmd_upgrade(&mut stdout).await.unwrap_err().to_string();
        assert_eq!(error_msg, "quilt is not installed");
        Ok(())
    }
}
