use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "codenoscopy")]
#[command(about = "Persona-flavored code review gateway for the Anthropic API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    // Run the review gateway
    Serve(ServeArgs),
    // Send a file to a running gateway and print the review
    Review(ReviewArgs),
}

// Every server setting can come from the environment
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8788)]
    pub port: u16,

    // Anthropic credential, never logged
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub api_key: String,

    // Upstream base url, overridable for local testing
    #[arg(long, env = "ANTHROPIC_BASE_URL", default_value = "https://api.anthropic.com")]
    pub upstream_url: String,

    // Max code size in characters
    #[arg(long, env = "MAX_CODE_CHARS", default_value_t = 20_000)]
    pub max_code_chars: usize,

    // Rate limit max requests per window
    #[arg(long, env = "RATE_LIMIT_MAX_REQUESTS", default_value_t = 10)]
    pub rate_limit: usize,

    // Rate limit window in milliseconds
    #[arg(long, env = "RATE_LIMIT_WINDOW_MS", default_value_t = 60_000)]
    pub rate_window_ms: u64,
}

impl ServeArgs {
    pub fn rate_window(&self) -> Duration {
        Duration::from_millis(self.rate_window_ms)
    }
}

#[derive(Args, Debug, Clone)]
pub struct ReviewArgs {
    // Source file to review, "-" reads stdin
    pub file: PathBuf,

    #[arg(long, default_value = "security-expert")]
    pub persona: String,

    #[arg(long, default_value = "haiku")]
    pub model: String,

    // Ask for a buffered JSON review instead of a stream
    #[arg(long)]
    pub no_stream: bool,

    #[arg(long, env = "CODENOSCOPY_SERVER", default_value = "http://localhost:8788")]
    pub server: String,

    #[arg(long, default_value_t = 90)]
    pub timeout_secs: u64,
}
