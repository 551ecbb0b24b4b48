use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use mediscout_core::{Condition, ImageDescriptor, MediscoutConfig, Prediction, Registration};
use mediscout_engine::explorer::{SortDirection, SortKey};
use mediscout_engine::{
    cohort_analytics, explore, export_csv, record_prediction, AccountStore, CohortCache,
    ExplorerQuery, HealthSubmission, JsonFileStore, SymptomMatcher, EXPORT_FILE_NAME,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Parser, Debug)]
#[command(
    name = "mediscout",
    about = "Synthetic community-health cohort and simulated symptom checker."
)]
struct Args {
    /// JSON file holding the cached cohort, accounts and session.
    #[arg(long, default_value = "mediscout-store.json")]
    store: PathBuf,
    /// JSON file overriding cohort and matcher settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for a reproducible cohort.
    #[arg(long)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the cached cohort, generating it on first use.
    Cohort,
    /// Discard the cached cohort and generate a new one.
    Regenerate,
    /// Write the cohort as CSV.
    Export {
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        output: PathBuf,
    },
    /// Print the dashboard aggregates.
    Stats,
    /// Search, filter and sort the cohort.
    Explore {
        #[arg(long)]
        search: Option<String>,
        /// Exact condition label.
        #[arg(long)]
        condition: Option<String>,
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
        #[arg(long)]
        descending: bool,
    },
    /// Run the symptom matcher without recording anything.
    Predict {
        symptoms: String,
        /// File name of an attached image.
        #[arg(long)]
        image: Option<String>,
        /// Skip the simulated inference delay.
        #[arg(long)]
        no_delay: bool,
    },
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        age: String,
        #[arg(long, default_value = "")]
        gender: String,
        #[arg(long, default_value = "")]
        location: String,
    },
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Show the logged-in account and its health history.
    Whoami,
    /// Record a health entry for the logged-in account.
    Submit {
        symptoms: String,
        #[arg(long, default_value = "")]
        temperature: String,
        #[arg(long, default_value = "")]
        weight: String,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        no_delay: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortArg {
    Id,
    Date,
    Age,
    Gender,
    Location,
    Condition,
    Risk,
    Triage,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Id => SortKey::Id,
            SortArg::Date => SortKey::Date,
            SortArg::Age => SortKey::Age,
            SortArg::Gender => SortKey::Gender,
            SortArg::Location => SortKey::Location,
            SortArg::Condition => SortKey::ConditionAssigned,
            SortArg::Risk => SortKey::SimulatedRiskScore,
            SortArg::Triage => SortKey::SimulatedAiTriageCategory,
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<MediscoutConfig> {
    let Some(path) = path else {
        return Ok(MediscoutConfig::default());
    };
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read config {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("Invalid config {}", path.display()))
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_matcher(
    matcher: &SymptomMatcher,
    symptoms: &str,
    image: Option<&ImageDescriptor>,
    no_delay: bool,
) -> Prediction {
    if no_delay {
        matcher.predict(symptoms, image)
    } else {
        matcher.predict_with_latency(symptoms, image).await
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let mut store = JsonFileStore::open(&args.store)
        .with_context(|| format!("Could not open store {}", args.store.display()))?;
    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let now = Utc::now();
    let today = now.date_naive();
    let matcher = SymptomMatcher::new(config.matcher.clone());

    match args.command {
        Command::Cohort => {
            let cohort = CohortCache::new(&mut store, config.cohort).get_cohort(&mut rng, today)?;
            print_json(&cohort)?;
        }
        Command::Regenerate => {
            let cohort =
                CohortCache::new(&mut store, config.cohort).regenerate_cohort(&mut rng, today)?;
            info!("regenerated cohort of {} records", cohort.len());
        }
        Command::Export { output } => {
            let cohort = CohortCache::new(&mut store, config.cohort).get_cohort(&mut rng, today)?;
            match export_csv(&cohort)? {
                Some(csv) => {
                    std::fs::write(&output, csv)
                        .with_context(|| format!("Could not write {}", output.display()))?;
                    info!("exported {} records to {}", cohort.len(), output.display());
                }
                None => println!("No data to export."),
            }
        }
        Command::Stats => {
            let cohort = CohortCache::new(&mut store, config.cohort).get_cohort(&mut rng, today)?;
            print_json(&cohort_analytics(&cohort))?;
        }
        Command::Explore {
            search,
            condition,
            sort,
            descending,
        } => {
            let condition = match condition {
                Some(label) => match Condition::from_label(&label) {
                    Some(condition) => Some(condition),
                    None => bail!("Unknown condition label: {label}"),
                },
                None => None,
            };
            let query = ExplorerQuery {
                search,
                condition,
                sort_key: sort.map(SortKey::from),
                direction: if descending {
                    SortDirection::Descending
                } else {
                    SortDirection::Ascending
                },
            };
            let cohort = CohortCache::new(&mut store, config.cohort).get_cohort(&mut rng, today)?;
            print_json(&explore(&cohort, &query))?;
        }
        Command::Predict {
            symptoms,
            image,
            no_delay,
        } => {
            let image = image.map(ImageDescriptor::named);
            let prediction = run_matcher(&matcher, &symptoms, image.as_ref(), no_delay).await;
            print_json(&prediction)?;
        }
        Command::Register {
            username,
            password,
            name,
            age,
            gender,
            location,
        } => {
            let mut accounts = AccountStore::new(&mut store);
            let mut session = accounts.restore_session();
            let registration = Registration {
                username,
                password,
                name,
                age,
                gender,
                location,
            };
            let account = accounts.register(&mut session, registration, now)?;
            println!("Registered and logged in as {} ({}).", account.name, account.id);
        }
        Command::Login { username, password } => {
            let mut accounts = AccountStore::new(&mut store);
            let mut session = accounts.restore_session();
            let account = accounts.login(&mut session, &username, &password)?;
            println!("Welcome back, {}.", account.name);
        }
        Command::Logout => {
            let mut accounts = AccountStore::new(&mut store);
            let mut session = accounts.restore_session();
            accounts.logout(&mut session)?;
            println!("Logged out.");
        }
        Command::Whoami => {
            let session = AccountStore::new(&mut store).restore_session();
            match session.current_user() {
                Some(user) => print_json(user)?,
                None => println!("Not logged in."),
            }
        }
        Command::Submit {
            symptoms,
            temperature,
            weight,
            image,
            no_delay,
        } => {
            let mut accounts = AccountStore::new(&mut store);
            let mut session = accounts.restore_session();
            let form = HealthSubmission {
                symptoms,
                temperature,
                weight,
                image: image.map(ImageDescriptor::named),
            };
            form.validate()?;
            session.require_user()?;

            let prediction =
                run_matcher(&matcher, &form.symptoms, form.image.as_ref(), no_delay).await;
            let record = record_prediction(&mut accounts, &mut session, form, prediction, now)?;
            print_json(&record)?;
        }
    }

    Ok(())
}
