use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP relay service
    Serve {
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,
    },

    /// Relay a single message and print the answer
    Send {
        message: String,

        /// Keyed session to use instead of a fresh default session
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Extract the answer from a saved upstream response body (stdin when no file is given)
    Interpret { file: Option<PathBuf> },
}
