use anyhow::Result;

use crate::App;
use crate::clients::quilt::ApplyOptions;
use crate::ops::executor::Executor;

impl<E: Executor> App<E> {
    /// Apply patches.
    ///
    /// With a patch name, quilt applies the series up to and including that
    /// patch; without one, every unapplied patch is applied.
    pub async fn cmd_push(
        &self,
        patch: Option<&str>,
        options: ApplyOptions,
        stdout: &mut impl std::io::Write,
    ) -> Result<()> {
        let output = match patch {
            Some(patch) => self.quilt.push(patch, options).await?,
            None => self.quilt.push_all(options).await?,
        };
        write!(stdout, "{}", output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::App;
    use crate::clients::quilt::ApplyOptions;
    use crate::config::Config;
    use crate::ops::executor::ExecOutput;
    use crate::ops::executor::MockExecutor;

    #[tokio::test]
    async fn test_cmd_push_all_writes_quilt_output() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let mut executor = MockExecutor::new();
        executor
            .expect_execute()
            .withf(|invocation| invocation.args == ["push", "-a", "--refresh"])
            .times(1)
            .returning(|_| {
                Ok(ExecOutput {
                    code: 0,
                    stdout: b"Applying patch patches/patch1.diff\nNow at patch patches/patch1.diff\n"
                        .to_vec(),
                    stderr: Some(Vec::new()),
                })
            });

        let app = App::new(Config::default_for_tests(), executor, dir.path().to_path_buf());
        let mut stdout = Vec::new();
        app.cmd_push(
            None,
            ApplyOptions {
                force: false,
                refresh: true,
            },
            &mut stdout,
        )
        .await?;

        insta::assert_snapshot!(String::from_utf8(stdout)?, @r"
        Applying patch patches/patch1.diff
        Now at patch patches/patch1.diff
        ");
        Ok(())
    }

    #[tokio::test]
    async fn test_cmd_push_named_patch() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let mut executor = MockExecutor::new();
        executor
            .expect_execute()
            .withf(|invocation| invocation.args == ["push", "patch2.diff", "-f"])
            .times(1)
            .returning(|_| Ok(ExecOutput::default()));

        let app = App::new(Config::default_for_tests(), executor, dir.path().to_path_buf());
        let mut stdout = Vec::new();
        app.cmd_push(
            Some("patch2.diff"),
            ApplyOptions {
                force: true,
                refresh: false,
            },
            &mut stdout,
        )
        .await?;
        assert!(stdout.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_cmd_push_failure_is_an_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let mut executor = MockExecutor::new();
        executor.expect_execute().returning(|_| {
            Ok(ExecOutput {
                code: 1,
                stdout: Vec::new(),
                stderr: Some(b"Patch patches/patch1.diff does not apply (enforce with -f)\n".to_vec()),
            })
        });

        let app = App::new(Config::default_for_tests(), executor, dir.path().to_path_buf());
        let mut stdout = Vec::new();
        let result = app
            .cmd_push(None, ApplyOptions::default(), &mut stdout)
            .await;
        let error_msg = result.unwrap_err().to_string();
        assert!(error_msg.contains("does not apply"));
        Ok(())
    }
}
