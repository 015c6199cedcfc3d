pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use crate::adapters::http::DEFAULT_ENDPOINT;
    use crate::adapters::render::{DEFAULT_OUTPUT, DEFAULT_TEMPLATE};
    use crate::core::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use chrono::NaiveDate;
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "vegfi")]
    #[command(about = "Render today's and tomorrow's vegan lunch menus into an HTML page")]
    pub struct CliConfig {
        /// Menu feed URL
        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        pub endpoint: String,

        /// Feed language code
        #[arg(long, default_value = "fi")]
        pub lang: String,

        /// Jinja template for the page
        #[arg(long, default_value = DEFAULT_TEMPLATE)]
        pub template: String,

        /// Where the rendered page is written
        #[arg(long, default_value = DEFAULT_OUTPUT)]
        pub output: String,

        /// Request timeout, transport default when unset
        #[arg(long)]
        pub timeout_seconds: Option<u64>,

        /// Render as if today were this date (YYYY-MM-DD)
        #[arg(long)]
        pub date: Option<NaiveDate>,

        /// Also print today's menu as plain text
        #[arg(long)]
        pub plaintext: bool,

        /// TOML configuration file; replaces the source/render flags
        #[arg(short, long)]
        pub config: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub log_json: bool,
    }

    impl ConfigProvider for CliConfig {
        fn api_endpoint(&self) -> &str {
            &self.endpoint
        }

        fn lang(&self) -> &str {
            &self.lang
        }

        fn template_path(&self) -> &str {
            &self.template
        }

        fn output_path(&self) -> &str {
            &self.output
        }

        fn timeout_seconds(&self) -> Option<u64> {
            self.timeout_seconds
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_url("endpoint", &self.endpoint)?;
            validation::validate_language_code("lang", &self.lang)?;
            validation::validate_path("template", &self.template)?;
            validation::validate_path("output", &self.output)?;
            if let Some(timeout) = self.timeout_seconds {
                validation::validate_positive_number("timeout_seconds", timeout, 1)?;
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_no_arguments_uses_defaults() {
            let config = CliConfig::try_parse_from(["vegfi"]).unwrap();

            assert_eq!(config.api_endpoint(), DEFAULT_ENDPOINT);
            assert_eq!(config.lang(), "fi");
            assert_eq!(config.template_path(), DEFAULT_TEMPLATE);
            assert_eq!(config.output_path(), DEFAULT_OUTPUT);
            assert_eq!(config.timeout_seconds(), None);
            assert!(config.date.is_none());
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_parse_overrides() {
            let config = CliConfig::try_parse_from([
                "vegfi",
                "--endpoint",
                "http://localhost:8080/menus.json",
                "--lang",
                "en",
                "--date",
                "2024-01-07",
                "--plaintext",
                "-v",
            ])
            .unwrap();

            assert_eq!(config.api_endpoint(), "http://localhost:8080/menus.json");
            assert_eq!(config.lang(), "en");
            assert_eq!(config.date, NaiveDate::from_ymd_opt(2024, 1, 7));
            assert!(config.plaintext);
            assert!(config.verbose);
        }

        #[test]
        fn test_invalid_values_fail_validation() {
            let config =
                CliConfig::try_parse_from(["vegfi", "--endpoint", "not a url"]).unwrap();
            assert!(config.validate().is_err());

            let config = CliConfig::try_parse_from(["vegfi", "--timeout-seconds", "0"]).unwrap();
            assert!(config.validate().is_err());

            assert!(CliConfig::try_parse_from(["vegfi", "--date", "maanantai"]).is_err());
        }
    }
}
