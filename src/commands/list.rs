use anyhow::Result;

use crate::App;
use crate::ops::executor::Executor;
use crate::series::PatchName;

impl<E: Executor> App<E> {
    /// Print the patches in the series file.
    pub async fn cmd_series(&self, json: bool, stdout: &mut impl std::io::Write) -> Result<()> {
        let patches = self.read_series()?;
        write_patches(&patches, json, stdout)
    }

    /// Print the applied patches, oldest first.
    pub async fn cmd_applied(&self, json: bool, stdout: &mut impl std::io::Write) -> Result<()> {
        let patches = self.read_applied()?;
        write_patches(&patches, json, stdout)
    }

    /// Print the patches quilt has yet to apply, in series order.
    pub async fn cmd_unapplied(&self, json: bool, stdout: &mut impl std::io::Write) -> Result<()> {
        let patches = self.quilt.unapplied().await?.into_vec();
        write_patches(&patches, json, stdout)
    }
}

fn write_patches(
    patches: &[PatchName],
    json: bool,
    stdout: &mut impl std::io::Write,
) -> Result<()> {
    if json {
        writeln!(stdout, "{}", serde_json::to_string(patches)?)?;
    } else {
        for patch in patches {
            writeln!(stdout, "{}", patch)?;
        }
    }
    Ok(())
}
