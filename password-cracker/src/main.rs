use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use batch_hasher::{
    Coordinator, DEFAULT_CONCURRENCY, DEFAULT_ITERATIONS, DEFAULT_KEY_LENGTH_BITS, Pbkdf2Sha1,
};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use password_cracker::{
    DISCOVERED_SALT, Error, cross_reference, read_breach_database, read_passwords,
    write_passwords_and_hashes,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "password-cracker")]
#[command(about = "Hash common passwords in parallel and match them against a breached database")]
struct Args {
    /// File of common passwords, one per line
    #[arg(short, long)]
    passwords: PathBuf,

    /// Breached database of `user_id,hash` records
    #[arg(short, long)]
    breach_db: PathBuf,

    /// Where to write the computed `password,hash` pairs
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Salt the breached hashes were produced with
    #[arg(long, default_value = DISCOVERED_SALT)]
    salt: String,

    /// Number of batches hashed in parallel
    #[arg(short = 'j', long, default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// PBKDF2 iteration count
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: u32,

    /// Derived key length in bits
    #[arg(long, default_value_t = DEFAULT_KEY_LENGTH_BITS)]
    key_length: u32,

    /// Overwrite the output file if it exists
    #[arg(long)]
    force: bool,

    /// Disable progress bar
    #[arg(long)]
    no_progress: bool,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let start = Instant::now();

    // Validate arguments
    if args.concurrency == 0 {
        return Err(Error::InvalidArgs("--concurrency must be at least 1".to_string()));
    }
    let primitive = Arc::new(Pbkdf2Sha1::new(args.iterations, args.key_length)?);

    // Refuse to clobber the output file before spending time hashing
    if let Some(output) = &args.output {
        if output.exists() && !args.force {
            return Err(Error::FileExists { path: output.clone() });
        }
    }

    // Load the common passwords
    let passwords = read_passwords(&args.passwords).await?;
    let total = passwords.len() as u64;

    println!(
        "Hashing {} passwords in {} batches ({} iterations)",
        total,
        args.concurrency.min(passwords.len()),
        args.iterations
    );

    // Create shared state
    let progress_counter = Arc::new(AtomicU64::new(0));

    // Set up progress bar
    let progress_bar = if !args.no_progress && total > 0 {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    // Spawn progress updater task
    let progress_counter_clone = Arc::clone(&progress_counter);
    let progress_bar_clone = progress_bar.clone();
    let progress_task = tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_millis(100)).await;
            let current = progress_counter_clone.load(Ordering::Relaxed);
            if let Some(ref pb) = progress_bar_clone {
                pb.set_position(current);
            }
            if current >= total {
                break;
            }
        }
    });

    // Hash every batch in parallel and wait for all of them
    let coordinator = Coordinator::new(primitive, &args.salt, args.concurrency)
        .with_progress(Arc::clone(&progress_counter));
    let result = coordinator.generate_all_hashes(&passwords).await;

    // Clean up progress
    progress_task.abort();
    if let Some(pb) = progress_bar {
        pb.finish_with_message("hashed");
    }
    let password_to_hashes = result?;

    // Write password and hash pairs
    if let Some(output) = &args.output {
        write_passwords_and_hashes(output, &password_to_hashes, args.force).await?;
        println!("Wrote output of batch hashing to {}", output.display());
    }

    // Match against the breached database
    let hash_to_user_ids = read_breach_database(&args.breach_db).await?;
    let report = cross_reference(&password_to_hashes, &hash_to_user_ids);

    for cracked in &report.cracked {
        println!("Users {:?} are using the password {}", cracked.user_ids, cracked.password);
    }

    println!("We found the password for {} users", report.user_count());
    println!("Total time elapsed: {} milliseconds", start.elapsed().as_millis());
    Ok(())
}
