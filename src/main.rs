use clap::{Parser, Subcommand};
use sonar::{config::ModelConfig, context::AppContext, input::parse_input, server};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8501";

#[derive(Parser)]
#[command(name = "sonar", about = "Sonar rock vs mine classifier")]
struct Cli {
    /// Headerless CSV: 60 feature columns followed by an `R`/`M` label.
    #[arg(long, default_value = "sonar_data.csv")]
    data: PathBuf,

    /// Optional TOML file overriding the model settings.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the interactive page (default).
    Serve {
        #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
        listen: String,
    },
    /// Classify one signal of 60 comma-separated values and exit.
    Predict { values: String },
}

fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(env_filter)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ModelConfig::load(path)?,
        None => ModelConfig::default(),
    };

    let context = AppContext::load(&cli.data, &config).inspect_err(|err| {
        tracing::error!(%err, "startup failed");
    })?;

    let command = cli.command.unwrap_or(Command::Serve {
        listen: DEFAULT_LISTEN_ADDR.to_owned(),
    });

    match command {
        Command::Serve { listen } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(server::serve(Arc::new(context), &listen))?;
        }
        Command::Predict { values } => {
            let input = parse_input(&values)?;
            let prediction = context.predict(&input)?;

            println!("prediction: {}", prediction.label);
            println!("confidence: {:.1}%", prediction.confidence_percent());
            for (label, probability) in prediction.probabilities.iter() {
                println!("  p({label}) = {probability:.4}");
            }
        }
    }

    Ok(())
}
