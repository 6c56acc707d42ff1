//! `hq status` — project status sentences.

use crate::cli::output;
use crate::cli::{store_paths, Cli};
use crate::errors::Result;
use crate::status::{Project, StatusStore, StatusUpdate};

/// Execute `status show`.
pub fn show(cli: &Cli) -> Result<()> {
    let store = StatusStore::new(store_paths(cli)?.status);
    output::print_status_table(&store.read()?);
    Ok(())
}

/// Execute `status set`.
pub fn set(cli: &Cli, project: &str, sentence: &[String]) -> Result<()> {
    let project: Project = project.parse()?;

    let store = StatusStore::new(store_paths(cli)?.status);
    let doc = store.write(&StatusUpdate::new().set(project, sentence.join(" ")))?;

    output::success(&format!("{project}: {}", doc.get(project)));
    Ok(())
}
