use std::path::PathBuf;

use clap::Parser;

/// Find a k-anonymous representation of a delimited-text table.
#[derive(Debug, Parser)]
#[command(
    name = "veil",
    version,
    about = "Datafly k-anonymization for delimited-text tables",
    long_about = "Generalizes quasi-identifier columns through their domain\n\
        generalization hierarchies until every combination of values appears\n\
        in at least k rows, suppressing at most k residual rows.\n\n\
        EXAMPLES:\n\
        \n  veil -i patients.csv -q age zip -g age.csv zip.csv -k 3 -o out.csv\n\
        \n  veil -i db.csv -q city -g city.csv -k 2 -o anon.csv --report run.json"
)]
pub struct Cli {
    /// Path to the table to anonymize
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Names of the quasi-identifier attributes
    #[arg(
        short = 'q',
        long = "quasi-identifier",
        value_name = "NAME",
        num_args = 1..,
        required = true
    )]
    pub quasi_identifiers: Vec<String>,

    /// Paths to the hierarchy files, same count and order as the QI names
    #[arg(
        short = 'g',
        long = "hierarchy",
        value_name = "FILE",
        num_args = 1..,
        required = true
    )]
    pub hierarchies: Vec<PathBuf>,

    /// Anonymity level: every surviving QI combination appears in at least k rows
    #[arg(short, long, value_name = "K")]
    pub k: usize,

    /// Path of the anonymized output table
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: PathBuf,

    /// Write a JSON run summary to this path
    #[arg(long = "report", value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Increase verbosity (-v for run milestones, -vv for per-round detail)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_are_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_a_full_invocation() {
        let cli = Cli::parse_from([
            "veil", "-i", "in.csv", "-q", "age", "zip", "-g", "age.csv", "zip.csv", "-k", "3",
            "-o", "out.csv",
        ]);
        assert_eq!(cli.quasi_identifiers, ["age", "zip"]);
        assert_eq!(cli.hierarchies.len(), 2);
        assert_eq!(cli.k, 3);
        assert!(cli.report.is_none());
        assert_eq!(cli.verbose, 0);
    }
}
