use clap::Parser;
use vegfi::adapters::render::render_plaintext;
use vegfi::core::ConfigProvider;
use vegfi::utils::{logger, validation::Validate};
use vegfi::{CliConfig, EtlEngine, LocalStorage, MenuPipeline, TomlConfig, VegError};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting vegfi");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => run(config, &cli).await,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            }
        }
        None => run(cli.clone(), &cli).await,
    };

    match result {
        Ok(output_path) => {
            tracing::info!("✅ Menu page rendered");
            println!("✅ Menu page written to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ vegfi failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn run<C>(config: C, cli: &CliConfig) -> Result<String, VegError>
where
    C: ConfigProvider + Validate + 'static,
{
    config.validate()?;
    tracing::info!(
        "Source: {} (lang {}), template: {}, output: {}",
        config.api_endpoint(),
        config.lang(),
        config.template_path(),
        config.output_path()
    );

    let mut pipeline = MenuPipeline::new(LocalStorage::default(), config);
    if let Some(date) = cli.date {
        tracing::info!("📅 Rendering as of {}", date);
        pipeline = pipeline.with_date(date);
    }

    let engine = EtlEngine::new(pipeline);
    if cli.plaintext {
        engine
            .run_inspect(|menus| {
                println!("{}", menus.today.day_name);
                print!("{}", render_plaintext(&menus.today.entries));
            })
            .await
    } else {
        engine.run().await
    }
}
