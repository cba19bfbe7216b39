//! `zk export` - Print a zone in zone-file format.

use anyhow::Result;

use super::Context;
use crate::cli::args::ExportArgs;

pub async fn execute(ctx: Context, args: ExportArgs) -> Result<()> {
    let zone = ctx.zone(args.zone)?;
    let out = ctx.toolbox()?.export_zone(&zone).await;
    anyhow::ensure!(!out.is_error, out.text);

    print!("{}", out.text);
    if !out.text.ends_with('\n') {
        println!();
    }
    Ok(())
}
