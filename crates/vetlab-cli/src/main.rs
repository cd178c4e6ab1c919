mod calc_cmd;
mod history_cmd;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vetlab::config::Settings;
use vetlab_engine::{CalcRequest, Locale};

#[derive(Parser)]
#[command(
    name = "vetlab",
    version,
    about = "Veterinary laboratory calculators with a local calculation history"
)]
struct Cli {
    /// Print results and records as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Language of history sentences (en, fa)
    #[arg(long, global = true)]
    locale: Option<Locale>,

    /// Log diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the calculators and the number of history entries
    Home,
    /// Mass of solute needed for a solution
    Solution {
        #[command(subcommand)]
        action: SolutionAction,
    },
    /// Solve C1·V1 = C2·V2 for C2 or V2
    Dilution {
        /// Stock concentration
        #[arg(long)]
        c1: String,
        /// Stock volume
        #[arg(long)]
        v1: String,
        /// Final concentration; when given, V2 is solved
        #[arg(long)]
        c2: Option<String>,
        /// Final volume; used to solve C2 when --c2 is absent
        #[arg(long)]
        v2: Option<String>,
    },
    /// Geometric serial dilution series
    Serial {
        /// Initial concentration
        #[arg(long)]
        init: String,
        /// Dilution factor per step
        #[arg(long)]
        factor: String,
        /// Number of steps (whole number)
        #[arg(long)]
        steps: String,
    },
    /// Total dose, stock volume and infusion rate
    Dose {
        /// Dose in mg/kg
        #[arg(long)]
        dose: String,
        /// Body weight in kg
        #[arg(long)]
        weight: String,
        /// Stock concentration in mg/mL
        #[arg(long)]
        conc: Option<String>,
        /// Infusion duration in minutes
        #[arg(long)]
        duration: Option<String>,
        /// Infusion set drop factor in gtt/mL (default from config)
        #[arg(long)]
        drop_factor: Option<String>,
    },
    /// Convert a value between units of one category (mass, volume, temp, molar)
    Convert {
        category: String,
        value: String,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// Henderson–Hasselbalch buffer calculations
    Buffer {
        #[command(subcommand)]
        action: BufferAction,
    },
    /// Browse, delete and export calculation history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
enum SolutionAction {
    /// Grams from molarity, volume and molar weight
    Molarity {
        /// Molarity in mol/L
        #[arg(long)]
        molarity: String,
        /// Volume in mL
        #[arg(long)]
        volume: String,
        /// Molar weight in g/mol
        #[arg(long)]
        mw: String,
    },
    /// Grams from % w/v and volume
    Percent {
        #[arg(long)]
        percent: String,
        /// Volume in mL
        #[arg(long)]
        volume: String,
    },
}

#[derive(Subcommand)]
enum BufferAction {
    /// pH from pKa and [A-]/[HA]
    Ph {
        #[arg(long)]
        pka: String,
        /// [A-]/[HA] ratio
        #[arg(long)]
        ratio: String,
    },
    /// [A-]/[HA] needed to reach a target pH
    Ratio {
        #[arg(long)]
        pka: String,
        #[arg(long)]
        target_ph: String,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List history entries, newest first
    List {
        /// Number of entries to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// Show one entry by its position in the list
    Show { index: usize },
    /// Delete one entry by its position in the list
    Rm { index: usize },
    /// Export history as CSV
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("VETLAB_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn or_exit(r: anyhow::Result<i32>) -> i32 {
    r.unwrap_or_else(|e| {
        eprintln!("[vetlab] error: {e:#}");
        1
    })
}

fn request_for(command: &Commands, settings: &Settings) -> Option<CalcRequest> {
    let owned = |v: &Option<String>| v.clone().unwrap_or_default();
    let request = match command {
        Commands::Solution {
            action:
                SolutionAction::Molarity {
                    molarity,
                    volume,
                    mw,
                },
        } => CalcRequest::MolarityToMass {
            molarity: molarity.clone(),
            volume_ml: volume.clone(),
            molar_weight: mw.clone(),
        },
        Commands::Solution {
            action: SolutionAction::Percent { percent, volume },
        } => CalcRequest::PercentToMass {
            percent: percent.clone(),
            volume_ml: volume.clone(),
        },
        Commands::Dilution { c1, v1, c2, v2 } => CalcRequest::Dilution {
            c1: c1.clone(),
            v1: v1.clone(),
            c2: owned(c2),
            v2: owned(v2),
        },
        Commands::Serial {
            init,
            factor,
            steps,
        } => CalcRequest::Serial {
            init: init.clone(),
            factor: factor.clone(),
            steps: steps.clone(),
        },
        Commands::Dose {
            dose,
            weight,
            conc,
            duration,
            drop_factor,
        } => CalcRequest::Dose {
            dose_mg_per_kg: dose.clone(),
            weight_kg: weight.clone(),
            concentration_mg_per_ml: owned(conc),
            duration_min: owned(duration),
            drop_factor: drop_factor
                .clone()
                .unwrap_or_else(|| settings.drop_factor.to_string()),
        },
        Commands::Convert {
            category,
            value,
            from,
            to,
        } => CalcRequest::Convert {
            category: category.clone(),
            value: value.clone(),
            from: from.clone(),
            to: to.clone(),
        },
        Commands::Buffer {
            action: BufferAction::Ph { pka, ratio },
        } => CalcRequest::BufferPh {
            pka: pka.clone(),
            ratio: ratio.clone(),
        },
        Commands::Buffer {
            action: BufferAction::Ratio { pka, target_ph },
        } => CalcRequest::BufferRatio {
            pka: pka.clone(),
            target_ph: target_ph.clone(),
        },
        Commands::Home | Commands::History { .. } => return None,
    };
    Some(request)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = Settings::load();
    let locale = cli.locale.unwrap_or(settings.locale);
    tracing::debug!(%locale, drop_factor = settings.drop_factor, "settings loaded");

    let command = cli.command.unwrap_or(Commands::Home);
    let exit_code = match &command {
        Commands::Home => or_exit(history_cmd::cmd_home(locale, cli.json)),
        Commands::History { action } => or_exit(match action {
            HistoryAction::List { limit } => history_cmd::cmd_history_list(*limit, cli.json),
            HistoryAction::Show { index } => history_cmd::cmd_history_show(*index, cli.json),
            HistoryAction::Rm { index } => history_cmd::cmd_history_rm(*index),
            HistoryAction::Export { output } => {
                history_cmd::cmd_history_export(output.as_deref())
            }
        }),
        calculator => match request_for(calculator, &settings) {
            Some(request) => or_exit(calc_cmd::cmd_calculate(&request, locale, cli.json)),
            None => 0,
        },
    };
    std::process::exit(exit_code);
}
