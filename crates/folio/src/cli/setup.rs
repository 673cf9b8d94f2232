use clap::{Parser, Subcommand, ValueEnum};
use folioapp::model::FieldKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "folio", bin_name = "folio", version)]
#[command(about = "Validate portfolio forms and manage their autosaved drafts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the key-value store (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a single value
    Check {
        /// Declared input kind
        #[arg(short, long, value_enum, default_value_t = KindArg::Text)]
        kind: KindArg,

        /// Treat the field as required
        #[arg(short, long)]
        required: bool,

        /// Value to check
        #[arg(default_value = "")]
        value: String,
    },

    /// Fill a form and submit it
    Submit {
        /// JSON form description
        form: PathBuf,

        /// Field values to type before submitting
        #[arg(value_name = "NAME=VALUE")]
        values: Vec<String>,
    },

    /// Fill a form and let autosave store a draft
    Fill {
        /// JSON form description
        form: PathBuf,

        /// Field values to type
        #[arg(value_name = "NAME=VALUE")]
        values: Vec<String>,
    },

    /// Inspect or remove stored drafts
    #[command(subcommand)]
    Draft(DraftCommands),

    /// Show or toggle the theme preference
    Theme {
        /// Switch between light and dark
        #[arg(short, long)]
        toggle: bool,
    },

    /// Filter a project list
    Search {
        /// JSON array of projects
        projects: PathBuf,

        /// Search term (empty shows everything)
        #[arg(default_value = "")]
        term: String,
    },

    /// Check an image before upload
    Upload {
        /// File to check
        file: PathBuf,

        /// MIME type (guessed from the extension when omitted)
        #[arg(long)]
        mime: Option<String>,
    },

    /// Copy text to the clipboard
    Copy {
        /// Text to copy
        text: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum DraftCommands {
    /// Print the stored draft for a form
    Show { form_id: String },

    /// List forms with a stored draft
    List,

    /// Remove the stored draft for a form
    Clear { form_id: String },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum KindArg {
    Text,
    Email,
    Url,
    File,
}

impl From<KindArg> for FieldKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Text => FieldKind::Text,
            KindArg::Email => FieldKind::Email,
            KindArg::Url => FieldKind::Url,
            KindArg::File => FieldKind::File,
        }
    }
}
