use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "apkscope")]
#[command(about = "Aggregate, classify, and page through APK static-analysis results")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a completed analysis report (JSON)
    Render {
        /// Path to a report file (AnalysisResult-shaped JSON)
        report: String,

        /// Emit the report as pretty-printed JSON instead of text
        #[arg(long)]
        json: bool,

        /// Show the detail view instead of the summary
        #[arg(long)]
        detail: bool,

        /// Snippet page to display in the detail view
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Replay a recorded realtime event transcript through the session
    Replay {
        /// NDJSON transcript: one {"event": ..., "data": ...} per line
        transcript: String,

        /// File name to attribute the session to
        #[arg(long, default_value = "upload.apk")]
        file_name: String,

        /// Emit the final report as pretty-printed JSON
        #[arg(long)]
        json: bool,

        /// Show the detail view instead of the summary
        #[arg(long)]
        detail: bool,
    },

    /// Run the upload admission checks against a local file
    Check {
        /// Candidate file
        file: String,
    },
}
