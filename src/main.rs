use std::process;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use shamir_split::{
    combine_shares, split_secret, verify_split, SchemeConfig, ShamirError,
    DEFAULT_MERSENNE_EXPONENT,
};

/// Split a secret into shares with Shamir's scheme, or put it back together.
#[derive(Parser, Debug)]
#[command(name = "shamir-split", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split an ASCII secret into n shares, any t of which recover it.
    Split {
        /// Secret to split.
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        secret: String,
        /// Number of shares to split the secret into.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        n: i64,
        /// Threshold needed to piece the secret back together.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        t: i64,
        /// Work modulo the Mersenne prime 2^p - 1.
        #[arg(long, default_value_t = DEFAULT_MERSENNE_EXPONENT)]
        prime_exponent: u32,
        /// Print the shares as a JSON document.
        #[arg(long)]
        json: bool,
        /// Recombine the first and last t shares before printing anything.
        #[arg(long)]
        verify: bool,
    },
    /// Recover a secret from share pairs: <x1> <bundle1> <x2> <bundle2> ...
    Combine {
        /// Must match the exponent used to split.
        #[arg(long, default_value_t = DEFAULT_MERSENNE_EXPONENT)]
        prime_exponent: u32,
        #[arg(value_name = "X BUNDLE")]
        shares: Vec<String>,
    },
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Split {
            secret,
            n,
            t,
            prime_exponent,
            json,
            verify,
        } => {
            let config = SchemeConfig::mersenne(prime_exponent)?;
            let outcome = split_secret(&config, &secret, n, t)?;
            if verify {
                verify_split(&config, &secret, &outcome).context("self-check")?;
            }

            if json {
                let report = serde_json::to_string_pretty(&outcome.report(&config))
                    .context("rendering shares as JSON")?;
                println!("{report}");
            } else {
                println!("Secret to split: {secret}");
                for bundle in &outcome.bundles {
                    println!("Share {}: {}", bundle.index(), bundle);
                }
            }
            if verify {
                let note = format!(
                    "Verified: first and last {} shares reconstruct the secret.",
                    outcome.params.threshold
                );
                if json {
                    eprintln!("{note}");
                } else {
                    println!("{note}");
                }
            }
        }
        Command::Combine {
            prime_exponent,
            shares,
        } => {
            let config = SchemeConfig::mersenne(prime_exponent)?;
            println!("{}", combine_shares(&config, &shares)?);
        }
    }
    Ok(())
}

fn usage() -> ! {
    println!("Expected 'split' or 'combine' subcommands.");
    println!("{}", Cli::command().render_usage());
    process::exit(1);
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                process::exit(0);
            }
            ErrorKind::MissingSubcommand
            | ErrorKind::InvalidSubcommand
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => usage(),
            _ => {
                println!("{}", e.render());
                process::exit(1);
            }
        },
    };

    if let Err(err) = run(cli.command) {
        match err.downcast_ref::<ShamirError>() {
            Some(e) if !e.is_fatal() => {
                eprintln!("Error: {err:#}");
                eprintln!("See `shamir-split --help` for example usage.");
                process::exit(1);
            }
            _ => {
                eprintln!("Fatal: {err:#}");
                process::exit(2);
            }
        }
    }
}
