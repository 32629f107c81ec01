use anyhow::Result;

use crate::App;
use crate::ops::executor::Executor;

impl<E: Executor> App<E> {
    /// Remove a patch from the series, and from disk when `remove` is set.
    pub async fn cmd_delete(
        &self,
        patch: &str,
        remove: bool,
        stdout: &mut impl std::io::Write,
    ) -> Result<()> {
        let output = self.quilt.delete(patch, remove).await?;
        write!(stdout, "{}", output)?;
        Ok(())
    }
}
