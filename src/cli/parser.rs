use crate::export::ExportFormat;
use crate::models::policy::DuplicatePolicy;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for keymark
/// CLI application to annotate recorded video with timestamped key presses
#[derive(Parser)]
#[command(
    name = "keymark",
    version = env!("CARGO_PKG_VERSION"),
    about = "Annotate recorded video: log single-key observations with absolute timestamps",
    long_about = None
)]
pub struct Cli {
    /// Override the log table path (useful for tests or ad-hoc tables)
    #[arg(global = true, long = "log")]
    pub log: Option<String>,

    /// Override the duplicate policy from the configuration
    #[arg(global = true, long = "policy", value_enum)]
    pub policy: Option<DuplicatePolicy>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the playback clock is: elapsed milliseconds, or frame index + fps.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = true)]
pub struct Position {
    /// Elapsed milliseconds since the start of the recording
    #[arg(long = "ms", conflicts_with_all = ["frame", "fps"])]
    pub ms: Option<f64>,

    /// Current frame index (requires --fps)
    #[arg(long = "frame", requires = "fps")]
    pub frame: Option<u64>,

    /// Frames per second of the recording
    #[arg(long = "fps", requires = "frame")]
    pub fps: Option<f64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a new session (header-only log) for a source video
    Init {
        /// Source video file name; the log is `<output_dir>/<stem>.csv`
        source: String,

        /// Session start time (HHMMSS or HH:MM:SS)
        #[arg(long = "start")]
        start: Option<String>,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Set the session start time, once per session
    Start {
        /// HHMMSS or HH:MM:SS
        time: String,
    },

    /// Log a key at the current playback position
    Log {
        /// Key (single character or short label)
        key: String,

        #[command(flatten)]
        position: Position,
    },

    /// Delete an entry (default: the last one); can be undone
    Del {
        /// 0-based index in the current table order
        #[arg(long = "index", short = 'i')]
        index: Option<usize>,
    },

    /// Restore the last deleted entry
    Undo,

    /// Delete again the entry restored by the last undo
    Redo,

    /// Sort the log by timestamp
    Sort,

    /// Reset the log to its header (asks for confirmation)
    Clear {
        /// Do not ask for confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Show the most recent entries
    Tail {
        /// Number of entries (default: `tail_lines` from the config)
        #[arg(long = "lines", short = 'n')]
        lines: Option<usize>,
    },

    /// Show all entries
    List,

    /// Show entries whose `key,timestamp` line contains TEXT (case-sensitive)
    Search { text: String },

    /// Print the internal operations journal
    Journal {
        #[arg(long = "print", help = "Print the operations journal")]
        print: bool,
    },

    /// Play back a key tape read from stdin against a video timeline
    ///
    /// One event per line: a single character (logged or a player control),
    /// `space`, `backspace`, `advance N` (N frames play), `seek N`,
    /// `start HHMMSS|HH:MM:SS`. Blank lines and `#` comments are ignored.
    Play {
        /// Total number of frames in the video
        #[arg(long = "frames")]
        frames: u64,

        /// Frames per second of the video
        #[arg(long = "fps")]
        fps: f64,
    },

    /// Create a backup copy of the log
    Backup {
        /// Destination file path
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Compress the backup (zip)
        #[arg(long)]
        compress: bool,
    },

    /// Export the log as CSV or JSON
    Export {
        #[arg(long, value_name = "FORMAT", value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Export in timestamp order (the table itself is not modified)
        #[arg(long)]
        sorted: bool,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
}
