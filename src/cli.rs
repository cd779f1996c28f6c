//! Command Line Interface (CLI) arguments.

use clap::Parser;
use std::path::PathBuf;

/// MGNREGA statistics service command line interface
#[derive(Clone, Debug, Parser)]
pub struct CommandLineArgs {
    /// The IP address on which the server should listen
    #[arg(long, default_value = "0.0.0.0", env = "MGNREGA_HOST")]
    pub host: String,
    /// The port to which the server should bind, `PORT` as set by the hosting platform
    #[arg(long, default_value_t = 10000, env = "PORT")]
    pub port: u16,
    /// Flag indicating whether HTTPS should be used
    #[arg(long, default_value_t = false, env = "MGNREGA_HTTPS")]
    pub https: bool,
    /// Path to the certificate file to be used for HTTPS encryption
    #[arg(
        long,
        default_value = "~/.config/mgnrega-stats/certs/cert.pem",
        env = "MGNREGA_CERT_FILE"
    )]
    pub cert_file: String,
    /// Path to the key file to be used for HTTPS encryption
    #[arg(
        long,
        default_value = "~/.config/mgnrega-stats/certs/key.pem",
        env = "MGNREGA_KEY_FILE"
    )]
    pub key_file: String,
    /// Maximum time in seconds to wait for requests to complete upon receiving `ctrl+c` signal.
    #[arg(long, default_value_t = 10, env = "MGNREGA_SHUTDOWN_TIMEOUT")]
    pub graceful_shutdown_timeout: u64,
    /// Path to the JSON dataset of district records
    #[arg(long, default_value = "data/mgnrega_data.json", env = "MGNREGA_DATA_FILE")]
    pub data_file: PathBuf,
    /// Origins allowed to make cross-origin requests, comma separated
    #[arg(
        long,
        value_delimiter = ',',
        default_values = ["https://mgnrega-frontend-up.onrender.com", "http://localhost:3000"],
        env = "MGNREGA_ALLOWED_ORIGINS"
    )]
    pub allowed_origins: Vec<String>,
    /// URL of the dashboard frontend, allowed in addition to `allowed_origins`
    #[arg(long, env = "FRONTEND_URL")]
    pub frontend_url: Option<String>,
    /// Name of the deployment environment, reported by the health check
    #[arg(long, default_value = "development", env = "NODE_ENV")]
    pub environment: String,
    /// Whether to write logs as JSON rather than text
    #[arg(long, default_value_t = false, env = "MGNREGA_LOG_JSON")]
    pub log_json: bool,
}

impl CommandLineArgs {
    /// Returns all origins allowed to make cross-origin requests.
    pub fn cors_origins(&self) -> impl Iterator<Item = &str> {
        self.allowed_origins
            .iter()
            .chain(self.frontend_url.iter())
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
    }
}

/// Returns parsed command line arguments.
pub fn parse() -> CommandLineArgs {
    CommandLineArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsStr;

    fn env_var(id: &str) -> Option<String> {
        CommandLineArgs::command()
            .get_arguments()
            .find(|arg| arg.get_id() == id)
            .and_then(|arg| arg.get_env())
            .and_then(OsStr::to_str)
            .map(str::to_string)
    }

    #[test]
    fn test_deployment_env_vars() {
        assert_eq!(Some("PORT".to_string()), env_var("port"));
        assert_eq!(Some("NODE_ENV".to_string()), env_var("environment"));
        assert_eq!(Some("FRONTEND_URL".to_string()), env_var("frontend_url"));
        assert_eq!(Some("MGNREGA_DATA_FILE".to_string()), env_var("data_file"));
    }

    #[test]
    fn test_data_file() {
        let args = CommandLineArgs::parse_from(["mgnrega-stats", "--data-file", "/tmp/data.json"]);
        assert_eq!(PathBuf::from("/tmp/data.json"), args.data_file);
    }

    #[test]
    fn test_allowed_origins_delimited() {
        let args = CommandLineArgs::parse_from([
            "mgnrega-stats",
            "--allowed-origins",
            "http://a.example,http://b.example",
            "--frontend-url",
            "http://c.example",
        ]);
        assert_eq!(
            vec!["http://a.example", "http://b.example", "http://c.example"],
            args.cors_origins().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_cors_origins_skips_blank() {
        let args = CommandLineArgs::parse_from([
            "mgnrega-stats",
            "--allowed-origins",
            "http://a.example",
            "--frontend-url",
            " ",
        ]);
        assert_eq!(vec!["http://a.example"], args.cors_origins().collect::<Vec<_>>());
    }
}
