//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--store <path>`: Use this rules file
//! - `--offline`: Never call the external geo service
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//!
//! # Scope selectors
//!
//! Admin commands address a scope with a single selector argument:
//! `zip:94105` (exact code), `zip:941` (region prefix),
//! `city:Sacramento, CA`, `state:CA`, or `national`.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::types::Partition;

/// Curbside - tiered ZIP-code lookup for local disposal and recycling rules
#[derive(Parser, Debug)]
#[command(name = "curb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this rules file instead of ~/.curbside/rules.json
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Never call the external geo service (city/state tiers are skipped)
    #[arg(long, global = true)]
    pub offline: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up disposal rules for a ZIP code
    #[command(
        long_about = "Look up disposal rules for a ZIP code.\n\n\
            Rules are resolved through an ordered fallback: exact ZIP, then \
            city, then state, then 3-digit region prefix, then the national \
            default. The first matching tier wins and the output names which \
            tier answered.\n\n\
            A code that is not 5 digits, or that the geographic database does \
            not know, is rejected as invalid; that is a different outcome from \
            a valid code with no stored rules.",
        after_help = "\
EXAMPLES:
    # What do I do with a bottle and a cup in 94105?
    curb lookup 94105 --item bottle --item cup

    # Show every stored rule that applies to this ZIP
    curb lookup 94105

    # Nothing stored anywhere? Synthesize a starter rule set and keep it
    curb lookup 89049 --cache"
    )]
    Lookup {
        /// 5-digit ZIP code
        zip: String,

        /// Only show instructions for these item labels (repeatable)
        #[arg(long = "item", value_name = "LABEL")]
        items: Vec<String>,

        /// If nothing but the national default matches, synthesize a
        /// rule set for this ZIP and save it
        #[arg(long)]
        cache: bool,

        /// Machine-readable JSON output
        #[arg(long)]
        json: bool,
    },

    /// Create or remove a scope (one ZIP, city, state, or region entry)
    Scope {
        #[command(subcommand)]
        action: ScopeAction,
    },

    /// Edit per-item instructions within a scope
    Rule {
        #[command(subcommand)]
        action: RuleAction,
    },

    /// Set the waste service provider for a scope
    Provider {
        #[command(subcommand)]
        action: ProviderAction,
    },

    /// Show the rule store, one partition, or one scope
    Show {
        /// Partition to show (all partitions when omitted)
        #[arg(value_enum)]
        partition: Option<PartitionArg>,

        /// Scope key within the partition
        key: Option<String>,

        /// Machine-readable JSON output
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Scope lifecycle operations.
#[derive(Subcommand, Debug)]
pub enum ScopeAction {
    /// Create a scope, seeded with a generic default instruction
    #[command(
        long_about = "Create a scope, seeded with a generic default instruction.\n\n\
            The selector names the partition and key: 'zip:94105', 'zip:941' \
            (region prefix), 'city:Sacramento, CA', or 'state:CA'. Creating a \
            scope that already exists is an error and leaves it untouched."
    )]
    Create {
        /// Scope selector (e.g. 'zip:94105', 'city:Sacramento, CA')
        scope: String,
    },

    /// Remove a scope and all its rules
    Remove {
        /// Scope selector (e.g. 'zip:94105', 'city:Sacramento, CA')
        scope: String,
    },
}

/// Instruction edit operations.
#[derive(Subcommand, Debug)]
pub enum RuleAction {
    /// Add or update the instruction for an item in a scope
    Set {
        /// Scope selector (e.g. 'zip:94105', 'state:CA', 'national')
        scope: String,
        /// Item label (e.g. 'bottle'), or 'default' for the fallback
        item: String,
        /// Instruction text (may be empty)
        text: String,
    },

    /// Remove an item's instruction from a scope
    Remove {
        /// Scope selector (e.g. 'zip:94105', 'state:CA', 'national')
        scope: String,
        /// Item label to remove (no error if absent)
        item: String,
    },
}

/// Provider edit operations.
#[derive(Subcommand, Debug)]
pub enum ProviderAction {
    /// Set the waste service provider (company) for a scope
    Set {
        /// Scope selector (e.g. 'zip:94105', 'state:CA', 'national')
        scope: String,
        /// Provider name
        company: String,
    },
}

/// Partition names as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PartitionArg {
    /// Exact codes and region prefixes
    Zips,
    /// City-level scopes
    Cities,
    /// State-level scopes
    States,
    /// The national default
    National,
}

impl From<PartitionArg> for Partition {
    fn from(arg: PartitionArg) -> Self {
        match arg {
            PartitionArg::Zips => Partition::Zips,
            PartitionArg::Cities => Partition::Cities,
            PartitionArg::States => Partition::States,
            PartitionArg::National => Partition::National,
        }
    }
}

/// Supported completion shells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
