//! Stamp CLI client

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use stamp_client::{ClientConfig, RecordStorage, StampClient};
use stamp_core::StampRecord;
use stamp_types::Digest;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "stamp")]
#[command(about = "Timestamp content and verify its Merkle inclusion proofs", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, default_value = "stamp.toml")]
    config: PathBuf,

    /// Server URL, overrides the configuration file
    #[arg(short, long)]
    server: Option<String>,

    /// Storage directory, overrides the configuration file
    #[arg(short = 'd', long)]
    storage_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct PollArgs {
    /// Wait for a pending proof
    #[arg(long, conflicts_with = "no_wait")]
    wait: bool,

    /// Fail immediately if the proof is not yet available
    #[arg(long)]
    no_wait: bool,

    /// Wait budget in seconds (one fetch per second)
    #[arg(long)]
    timeout: Option<f64>,
}

#[derive(Args, Clone)]
struct CandidateArgs {
    /// File whose content should match the stamp ("-" for stdin)
    file: Option<PathBuf>,

    /// Hex SHA-256 of the content instead of a file
    #[arg(long, conflicts_with = "file")]
    hash: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the SHA-256 of a file ("-" for stdin)
    Hash { file: PathBuf },

    /// Submit content for timestamping
    Submit {
        #[command(flatten)]
        candidate: CandidateArgs,
    },

    /// Show the server's current view of a stamp
    Status { stamp_id: String },

    /// Retrieve a stamp with its proof and store it locally
    Fetch {
        stamp_id: String,

        #[command(flatten)]
        poll: PollArgs,
    },

    /// Verify content against a stamp's Merkle proof
    Verify {
        stamp_id: String,

        #[command(flatten)]
        candidate: CandidateArgs,

        #[command(flatten)]
        poll: PollArgs,

        /// Use the locally stored record instead of the server
        #[arg(long)]
        offline: bool,
    },

    /// List all stored stamps
    List,

    /// Show details of a stored stamp
    Show { stamp_id: String },

    /// Export a stored stamp as JSON
    Export {
        stamp_id: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a stamp from JSON
    Import { file: PathBuf },

    /// Write a default configuration file
    ConfigInit {
        /// Destination (defaults to --config)
        path: Option<PathBuf>,
    },
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut data = Vec::new();
        std::io::stdin().read_to_end(&mut data)?;
        Ok(data)
    } else {
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

/// Resolve the content hash from `--hash` or a file
fn candidate_hash(client: &StampClient, args: &CandidateArgs) -> Result<String> {
    match (&args.hash, &args.file) {
        (Some(hash), _) => Ok(Digest::normalize_hex(hash)
            .with_context(|| format!("Invalid hash: {}", hash))?),
        (None, Some(file)) => Ok(client.hash_data(&read_input(file)?)),
        (None, None) => bail!("Provide a file or --hash"),
    }
}

fn poll_settings(config: &ClientConfig, args: &PollArgs) -> (bool, f64) {
    let wait = if args.wait {
        true
    } else if args.no_wait {
        false
    } else {
        config.poll.wait
    };
    (wait, args.timeout.unwrap_or(config.poll.timeout_secs))
}

fn print_record(record: &StampRecord) {
    println!("Stamp ID:      {}", record.stamp_id());
    println!("Status:        {}", record.status());
    println!("Original Hash: {}", record.original_hash());
    if record.hash() != record.original_hash() {
        println!("Filed Under:   {}", record.hash());
    }
    if record.nonce().is_empty() {
        println!("Nonce:         (legacy)");
    } else {
        println!("Nonce:         {}", record.nonce());
    }
    match record.proof() {
        Some(proof) => {
            println!("Leaf Hash:     {}", proof.leaf_hash);
            println!("Leaf Index:    {}", proof.leaf_index);
            println!("Path Length:   {}", proof.siblings.len());
            println!("Root Hash:     {}", proof.root_hash);
        }
        None => println!("Proof:         not yet available"),
    }
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::load_or_default(&cli.config)?;
    if let Some(server) = &cli.server {
        config.server.url = server.clone();
    }
    if let Some(dir) = &cli.storage_dir {
        config.storage.dir = dir.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays usable in pipelines
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;
    let client = StampClient::from_config(&config)?;

    match &cli.command {
        Commands::Hash { file } => {
            println!("{}", client.hash_data(&read_input(file)?));
        }

        Commands::Submit { candidate } => {
            let hash = candidate_hash(&client, candidate)?;
            let ack = client.submit_hash(&hash).await?;

            println!("Hash submitted successfully");
            println!("Hash:     {}", ack.hash);
            match &ack.stamp_id {
                Some(id) => println!("Stamp ID: {}", id),
                None => println!("Stamp ID: (not returned by server)"),
            }
        }

        Commands::Status { stamp_id } => {
            let record = client.status(stamp_id).await?;
            print_record(&record);
        }

        Commands::Fetch { stamp_id, poll } => {
            let (wait, timeout) = poll_settings(&config, poll);
            let record = client.get_stamp(stamp_id, wait, timeout).await?;

            let storage = RecordStorage::open(&config.storage.dir)?;
            storage.store(&record)?;

            println!("Stamp retrieved and stored");
            print_record(&record);
        }

        Commands::Verify {
            stamp_id,
            candidate,
            poll,
            offline,
        } => {
            let hash = candidate_hash(&client, candidate)?;
            let storage = RecordStorage::open(&config.storage.dir)?;

            let record = if *offline {
                let record = storage
                    .get(stamp_id)?
                    .ok_or_else(|| anyhow::anyhow!("No stored record for stamp: {}", stamp_id))?;
                client.verify_record(&record, &hash)?;
                record
            } else {
                let (wait, timeout) = poll_settings(&config, poll);
                let record = client.verify(stamp_id, &hash, wait, timeout).await?;
                storage.store(&record)?;
                record
            };

            println!("Stamp verified successfully");
            print_record(&record);
        }

        Commands::List => {
            let storage = RecordStorage::open(&config.storage.dir)?;
            let records = storage.list()?;

            if records.is_empty() {
                println!("No stored stamps");
            } else {
                println!("Stored stamps ({})", records.len());
                println!();
                for record in records {
                    print_record(&record);
                    println!();
                }
            }
        }

        Commands::Show { stamp_id } => {
            let storage = RecordStorage::open(&config.storage.dir)?;
            let record = storage
                .get(stamp_id)?
                .ok_or_else(|| anyhow::anyhow!("No stored record for stamp: {}", stamp_id))?;

            println!("Stamp Record");
            println!("============");
            print_record(&record);
            if let Some(proof) = record.proof() {
                let path = proof.siblings.iter().zip(&proof.directions);
                for (i, (sibling, right)) in path.enumerate() {
                    let side = if *right { "R" } else { "L" };
                    println!("  [{}] {} {}", i, side, sibling);
                }
            }
        }

        Commands::Export { stamp_id, output } => {
            let storage = RecordStorage::open(&config.storage.dir)?;
            let json = storage.export_json(stamp_id)?;

            if let Some(output_path) = output {
                std::fs::write(output_path, json)?;
                println!("Stamp exported to {}", output_path.display());
            } else {
                println!("{}", json);
            }
        }

        Commands::Import { file } => {
            let storage = RecordStorage::open(&config.storage.dir)?;
            let json = std::fs::read_to_string(file)?;
            let stamp_id = storage.import_json(&json)?;

            println!("Stamp imported successfully");
            println!("Stamp ID: {}", stamp_id);
        }

        Commands::ConfigInit { path } => {
            let path = path.as_ref().unwrap_or(&cli.config);
            if path.exists() {
                bail!("Configuration file already exists: {}", path.display());
            }
            ClientConfig::default().to_file(path)?;
            println!("Default configuration saved to {}", path.display());
        }
    }

    Ok(())
}
