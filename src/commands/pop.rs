use anyhow::Result;
use anyhow::bail;

use crate::App;
use crate::clients::quilt::ApplyOptions;
use crate::ops::executor::Executor;

impl<E: Executor> App<E> {
    /// Remove applied patches.
    ///
    /// With a patch name, patches are removed down to and including that
    /// patch; without one, every applied patch is removed.
    pub async fn cmd_pop(
        &self,
        patch: Option<&str>,
        options: ApplyOptions,
        stdout: &mut impl std::io::Write,
    ) -> Result<()> {
        let output = match patch {
            Some(patch) => {
                if options != ApplyOptions::default() {
                    bail!("--force and --refresh can only be used when popping all patches");
                }
                self.quilt.pop(patch).await?
            }
            None => self.quilt.pop_all(options).await?,
        };
        write!(stdout, "{}", output)?;
        Ok(())
    }
}
