//! Version and configuration summary.

use anyhow::Result;
use classpoints_core::{Config, Session};

use crate::prompter::{Prompter, StdioPrompter};

pub fn execute(session: &Session, prompter: &mut dyn Prompter) {
    let config = session.config();
    let upload = if config.upload.enabled {
        format!("{} (bucket {})", config.upload.endpoint, config.upload.bucket)
    } else {
        "disabled".to_string()
    };

    let lines = [
        format!("classpoints {}", env!("CARGO_PKG_VERSION")),
        "Records classroom points per student and category.".to_string(),
        format!("Title:     {}", session.title()),
        format!("Snapshot:  {}", config.storage.snapshot_file.display()),
        format!("Exports:   {}", config.export.output_dir.display()),
        format!("Upload:    {}", upload),
    ];
    prompter.display_message(&lines.join("\n"));
}

pub fn run(config: Config) -> Result<()> {
    let session = Session::open(config)?;
    execute(&session, &mut StdioPrompter);
    Ok(())
}
