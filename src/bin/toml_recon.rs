use clap::Parser;
use log_recon::core::extract::{CloudExtractor, IdentifierExtractor, MainframeExtractor};
use log_recon::core::report::ReportWriter;
use log_recon::core::{ConfigProvider, Storage};
use log_recon::utils::error::ErrorSeverity;
use log_recon::utils::{logger, validation::Validate};
use log_recon::{LocalStorage, LogReconPipeline, ReconEngine, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-recon")]
#[command(about = "Log reconciliation driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "log-recon.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override report output path from config
    #[arg(long)]
    output: Option<String>,

    /// Dry run - show what would be reconciled without writing the report
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based log reconciliation");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 套用命令列覆蓋設定
    if let Some(output) = &args.output {
        config.report.output_path = output.clone();
        tracing::info!("🔧 Report output overridden to: {}", output);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    let storage = LocalStorage::default();

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no report will be written");
        perform_dry_run(&config, &storage).await?;
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let writer = ReportWriter::new(config.report_format()).with_sheet_name(config.sheet_name());
    let pipeline = LogReconPipeline::new(storage, config)?.with_report_writer(writer);
    let engine = ReconEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(summary) => {
            tracing::info!("✅ Reconciliation completed successfully!");
            println!("{}", summary);
            println!("📁 Report saved to: {}", summary.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Reconciliation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Cloud log: {}", config.cloud_file_path());
    println!("  Mainframe log: {}", config.mainframe_file_path());
    println!("  Cloud filter: {}", config.cloud_filter_pattern());
    println!("  Cloud split: {}", config.cloud_split_pattern());
    println!("  Mainframe prefix: {}", config.mainframe_filter_column());
    println!(
        "  Report: {} ({})",
        config.report_output_path(),
        config.report_format()
    );

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run(
    config: &TomlConfig,
    storage: &LocalStorage,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Dry Run Analysis:");
    println!();

    let cloud = CloudExtractor::from_config(config)?;
    let mainframe = MainframeExtractor::from_config(config);

    let cloud_lines = storage.read_lines(config.cloud_file_path()).await?;
    let cloud_ids = cloud.extract(&cloud_lines);
    println!(
        "☁️ Cloud: {} lines, {} identifiers",
        cloud_lines.len(),
        cloud_ids.len()
    );

    let mainframe_lines = storage.read_lines(config.mainframe_file_path()).await?;
    let mainframe_ids = mainframe.extract(&mainframe_lines);
    println!(
        "🖥️ Mainframe: {} lines, {} identifiers",
        mainframe_lines.len(),
        mainframe_ids.len()
    );

    for id in mainframe_ids.iter().take(5) {
        println!("  e.g. {}", id);
    }

    println!();
    println!("✅ Dry run analysis complete. Remove --dry-run to write the report.");

    Ok(())
}
