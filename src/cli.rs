use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lulurelay")]
#[command(author, version, about = "Telegram webhook bot that mirrors videos to LuluStream", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the Telegram webhook (default)
    Run {
        /// Listen port, overrides PORT
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Register the public webhook URL with Telegram
    SetWebhook {
        /// Webhook URL, defaults to BASE_URL
        #[arg(long)]
        url: Option<String>,
    },

    /// Extract metadata for a URL and print the format that would be uploaded
    Probe {
        /// Video page URL or direct video URL
        url: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
