//! Recepção do pronto-socorro: execução de roteiros

mod script;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use triage_core::{Clock, FixedClock, IntakeConfig, LogFormat, SystemClock};
use triage_intake::IntakeService;

/// Argumentos de linha de comando
#[derive(Parser, Debug)]
#[command(name = "triage-cli")]
#[command(about = "Recepção e fila de atendimento do pronto-socorro")]
struct Args {
    /// Roteiro JSON com os passos da sessão
    script: String,

    /// Arquivo de configuração (TOML)
    #[arg(short, long)]
    config: Option<String>,

    /// Filtro de logs (sobrepõe logging.level)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Fixa a data corrente, no formato de data configurado
    #[arg(short, long)]
    today: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = IntakeConfig::load(args.config.as_deref())
        .context("Failed to load configuration")?;

    // Inicializa os logs (stderr, para não misturar com os resultados)
    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr);
    match config.logging.format {
        LogFormat::Compact => subscriber.compact().init(),
        LogFormat::Full => subscriber.init(),
    }

    let clock: Box<dyn Clock> = match &args.today {
        Some(today) => {
            let date = NaiveDate::parse_from_str(today, config.intake.birth_date_format())
                .with_context(|| format!("Invalid --today date: {}", today))?;
            Box::new(FixedClock(date))
        }
        None => Box::new(SystemClock),
    };

    let content = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script))?;
    let steps = script::parse_script(&content)
        .with_context(|| format!("Failed to parse script {}", args.script))?;

    info!("Running {} steps from {}", steps.len(), args.script);

    let mut service = IntakeService::with_clock(&config, clock)?;
    let outcomes = script::run_script(&mut service, &steps);

    for outcome in &outcomes {
        println!("{}", serde_json::to_string(outcome)?);
    }

    let failed = outcomes.iter().filter(|o| !o.ok).count();
    if failed > 0 {
        error!("{} of {} steps failed", failed, outcomes.len());
    }
    info!("Session finished with {} patients waiting", service.queue_size());
    Ok(())
}
