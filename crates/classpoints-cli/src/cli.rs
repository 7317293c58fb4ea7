//! CLI argument definitions for classpoints.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "classpoints")]
#[command(about = "Classroom points tracker", version)]
pub struct Args {
    /// Path to config file (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Object storage access key
    #[arg(long, env = "CLASSPOINTS_S3_ACCESS_KEY", hide_env_values = true)]
    pub access_key: Option<String>,

    /// Object storage secret key
    #[arg(long, env = "CLASSPOINTS_S3_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Record one score entry and save the snapshot
    Entry {
        /// Student id
        #[arg(long)]
        id: String,
        /// Student name (defaults to the name on record)
        #[arg(long)]
        name: Option<String>,
        /// Score change, e.g. homework=2 or hygiene=-1 (repeatable)
        #[arg(long = "delta", value_name = "CATEGORY=N")]
        deltas: Vec<String>,
    },
    /// Print or set the sheet title
    Title {
        /// New title
        text: Option<String>,
    },
    /// Export the saved ledger to a spreadsheet
    Export {
        /// Upload the exported file afterwards
        #[arg(long)]
        upload: bool,
    },
    /// Upload a spreadsheet to object storage
    Upload {
        /// File to upload
        file: PathBuf,
    },
    /// Show the saved ledger
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Look up a student's name by id
    Lookup {
        /// Student id
        id: String,
    },
    /// Show version and configuration summary
    About,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_starts_shell() {
        let args = Args::try_parse_from(["classpoints"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn test_entry_with_deltas() {
        let args = Args::try_parse_from([
            "classpoints",
            "entry",
            "--id",
            "1001",
            "--name",
            "Alice",
            "--delta",
            "attendance=5",
            "--delta",
            "hygiene=-2",
        ])
        .unwrap();

        match args.command {
            Some(Command::Entry { id, name, deltas }) => {
                assert_eq!(id, "1001");
                assert_eq!(name.as_deref(), Some("Alice"));
                assert_eq!(deltas, ["attendance=5", "hygiene=-2"]);
            }
            _ => panic!("Expected Entry command"),
        }
    }

    #[test]
    fn test_entry_requires_id() {
        assert!(Args::try_parse_from(["classpoints", "entry"]).is_err());
    }

    #[test]
    fn test_export_upload_flag() {
        let args = Args::try_parse_from(["classpoints", "export", "--upload"]).unwrap();
        assert!(matches!(args.command, Some(Command::Export { upload: true })));

        let args = Args::try_parse_from(["classpoints", "export"]).unwrap();
        assert!(matches!(args.command, Some(Command::Export { upload: false })));
    }

    #[test]
    fn test_global_config_option() {
        let args =
            Args::try_parse_from(["classpoints", "--config", "cp.toml", "show", "--json"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("cp.toml")));
        assert!(matches!(args.command, Some(Command::Show { json: true })));
    }

    #[test]
    fn test_title_optional_text() {
        let args = Args::try_parse_from(["classpoints", "title"]).unwrap();
        assert!(matches!(args.command, Some(Command::Title { text: None })));

        let args = Args::try_parse_from(["classpoints", "title", "Class 3"]).unwrap();
        match args.command {
            Some(Command::Title { text }) => assert_eq!(text.as_deref(), Some("Class 3")),
            _ => panic!("Expected Title command"),
        }
    }

    #[test]
    fn test_upload_requires_file() {
        assert!(Args::try_parse_from(["classpoints", "upload"]).is_err());
        let args = Args::try_parse_from(["classpoints", "upload", "out.xlsx"]).unwrap();
        match args.command {
            Some(Command::Upload { file }) => assert_eq!(file, PathBuf::from("out.xlsx")),
            _ => panic!("Expected Upload command"),
        }
    }
}
