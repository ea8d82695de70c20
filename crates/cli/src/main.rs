use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use neuromatch_core::{
    classify, CoreConfig, QueryVector, ReferenceTable, UserStore, DEFAULT_DATASET_PATH,
    DEFAULT_USER_DATA_DIR,
};

#[derive(Parser)]
#[command(name = "neuromatch")]
#[command(about = "Neuromatch screening service CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one set of clinical values against the reference dataset
    Classify {
        /// Path to the reference dataset CSV
        #[arg(long, default_value = DEFAULT_DATASET_PATH)]
        dataset: PathBuf,
        /// Age in years
        age: f64,
        /// Memory loss severity
        memory_loss: f64,
        /// Behaviour change severity
        behaviour: f64,
        /// Tremor severity
        tremors: f64,
        /// Coordination loss severity
        coordination: f64,
        /// Seizure severity
        seizures: f64,
        /// Vision loss severity
        vision: f64,
        /// Copper level
        copper: f64,
    },
    /// Show the disease distribution of the reference dataset
    Distribution {
        /// Path to the reference dataset CSV
        #[arg(long, default_value = DEFAULT_DATASET_PATH)]
        dataset: PathBuf,
    },
    /// List registered users
    ListUsers {
        /// Directory holding the stored user records
        #[arg(long, default_value = DEFAULT_USER_DATA_DIR)]
        data_dir: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Classify {
            dataset,
            age,
            memory_loss,
            behaviour,
            tremors,
            coordination,
            seizures,
            vision,
            copper,
        }) => {
            let table = ReferenceTable::load(&dataset)?;
            let query = QueryVector {
                age,
                memory_loss,
                behaviour,
                tremors,
                coordination,
                seizures,
                vision,
                copper,
            };
            let result = classify(&query.as_features(), &table)?;
            println!("Best match: {}", result);
        }
        Some(Commands::Distribution { dataset }) => {
            let table = ReferenceTable::load(&dataset)?;
            for entry in table.label_distribution() {
                println!("{}: {}", entry.label, entry.count);
            }
        }
        Some(Commands::ListUsers { data_dir }) => {
            let cfg = Arc::new(CoreConfig::new(PathBuf::from(DEFAULT_DATASET_PATH), data_dir));
            let store = UserStore::new(cfg);
            let users = store.list();
            if users.is_empty() {
                println!("No users found.");
            } else {
                for user in users {
                    println!(
                        "ID: {}, Username: {}, Email: {}, Created: {}",
                        user.id.simple(),
                        user.username,
                        user.email,
                        user.created_at.to_rfc3339()
                    );
                }
            }
        }
        None => {
            println!("Use 'neuromatch --help' for commands");
        }
    }

    Ok(())
}
