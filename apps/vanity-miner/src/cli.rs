//! [apps/vanity-miner/src/cli.rs]
//! Command-line surface.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Searches for secp256k1 keypairs whose P2PKH address begins with the given prefixes."
)]
pub struct Cli {
    /// Address prefixes to search for (each must start with '1').
    #[arg(required = true)]
    pub prefixes: Vec<String>,

    /// Stop after this many hits.
    #[arg(short = 'c', long = "count", default_value_t = 1)]
    pub max_count: u64,

    /// Case-insensitive prefix matching.
    #[arg(short = 'i', long = "case-insensitive")]
    pub case_insensitive: bool,

    /// Keep searching indefinitely, ignoring --count.
    #[arg(short = 'k', long = "keep-going")]
    pub keep_going: bool,

    /// Quiet mode: emit one CSV line per hit, no status line.
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Worker thread count (clamped to [1, 2 * available CPUs]).
    #[arg(short = 't', long = "threads")]
    pub threads: Option<usize>,

    /// Verbose: dump the compiled pattern table and raise log verbosity.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// Clamps the requested worker count against `[1, 2 * available_cpus]`.
    pub fn clamped_thread_count(&self, available_cpus: usize) -> usize {
        let requested = self.threads.unwrap_or(available_cpus).max(1);
        requested.min(2 * available_cpus.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_with_threads(threads: Option<usize>) -> Cli {
        Cli {
            prefixes: vec!["1A".to_string()],
            max_count: 1,
            case_insensitive: false,
            keep_going: false,
            quiet: false,
            threads,
            verbose: false,
        }
    }

    #[test]
    fn zero_threads_clamps_up_to_one() {
        let cli = cli_with_threads(Some(0));
        assert_eq!(cli.clamped_thread_count(4), 1);
    }

    #[test]
    fn excessive_threads_clamp_to_twice_cpu_count() {
        let cli = cli_with_threads(Some(999));
        assert_eq!(cli.clamped_thread_count(4), 8);
    }

    #[test]
    fn unset_threads_defaults_to_cpu_count() {
        let cli = cli_with_threads(None);
        assert_eq!(cli.clamped_thread_count(4), 4);
    }
}
