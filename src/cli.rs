//! Command-line interface definitions for the digest pipeline.
//!
//! Credentials and addresses are accepted as flags with environment-variable
//! fallbacks, so a scheduler can trigger a run with nothing on the command
//! line. A missing credential aborts the run at argument parsing, before any
//! network activity.

use clap::Parser;

/// Command-line arguments for a single digest run.
///
/// # Examples
///
/// ```sh
/// # All credentials from the environment
/// ai_news_digest
///
/// # Explicit config file and recipient
/// ai_news_digest --config digest.yaml --email-to reader@example.com
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// NewsAPI key for the polling-API collector
    #[arg(long, env = "NEWSAPI_KEY", hide_env_values = true)]
    pub newsapi_key: String,

    /// Anthropic API key for the enrichment call
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub anthropic_api_key: String,

    /// Resend API key for digest delivery
    #[arg(long, env = "RESEND_API_KEY", hide_env_values = true)]
    pub resend_api_key: String,

    /// Sender address for the digest email
    #[arg(long, env = "EMAIL_FROM", default_value = "news@resend.dev")]
    pub email_from: String,

    /// Recipient address for the digest email
    #[arg(long, env = "EMAIL_TO")]
    pub email_to: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "ai_news_digest",
            "--newsapi-key",
            "nk",
            "--anthropic-api-key",
            "ak",
            "--resend-api-key",
            "rk",
            "--email-to",
            "reader@example.com",
        ]);

        assert_eq!(cli.newsapi_key, "nk");
        assert_eq!(cli.anthropic_api_key, "ak");
        assert_eq!(cli.resend_api_key, "rk");
        assert_eq!(cli.email_to, "reader@example.com");
        assert_eq!(cli.email_from, "news@resend.dev");
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_config_path_and_from_override() {
        let cli = Cli::parse_from([
            "ai_news_digest",
            "--config",
            "digest.yaml",
            "--newsapi-key",
            "nk",
            "--anthropic-api-key",
            "ak",
            "--resend-api-key",
            "rk",
            "--email-from",
            "news@mydomain.dev",
            "--email-to",
            "reader@example.com",
        ]);

        assert_eq!(cli.config.as_deref(), Some("digest.yaml"));
        assert_eq!(cli.email_from, "news@mydomain.dev");
    }

    #[test]
    fn test_cli_missing_recipient_fails() {
        // Guard against the env fallback masking the failure.
        if std::env::var_os("EMAIL_TO").is_some() {
            return;
        }
        let result = Cli::try_parse_from([
            "ai_news_digest",
            "--newsapi-key",
            "nk",
            "--anthropic-api-key",
            "ak",
            "--resend-api-key",
            "rk",
        ]);
        assert!(result.is_err());
    }
}
