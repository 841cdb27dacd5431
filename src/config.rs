//! Run configuration for the `lineup` binary.
//!
//! Flags:
//!
//! ```text
//!   --catalog FILE   Entity catalog JSON (required)
//!   --team T         Pool to place: good or bad (default: good)
//!   --threads N      Worker threads, 1 sweeps on the calling thread (default: 4)
//!   --top N          Ranked results to write (default: 10)
//!   --rank POLICY    Ranking policy, e.g. "components:high,miss:high"
//!   --progress N     Configurations between progress reports (default: 65536)
//!   --show R         Print the board at rank R
//!   --output FILE    Write JSONL here instead of stdout
//!   --quiet          Suppress progress and summary output
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use crate::board::entity::Team;
use crate::error::ConfigError;
use crate::rank::RankPolicy;
use crate::search::sweep::{SweepOptions, DEFAULT_YIELD_EVERY};

/// Configuration for one catalog sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Path to the catalog JSON.
    pub catalog: Option<PathBuf>,
    /// Which team's nine entities to place.
    pub team: Team,
    /// Worker threads for the sweep.
    pub threads: usize,
    /// Number of ranked results to emit.
    pub top: usize,
    /// Comparator used for ranking.
    pub policy: RankPolicy,
    /// Configurations between progress reports (0 = none).
    pub yield_every: u64,
    /// Rank whose board should be printed.
    pub show: Option<usize>,
    /// Output file for JSONL (stdout when unset).
    pub output: Option<PathBuf>,
    /// Suppress progress and summary output.
    pub quiet: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            catalog: None,
            team: Team::Good,
            threads: 4,
            top: 10,
            policy: RankPolicy::default(),
            yield_every: DEFAULT_YIELD_EVERY,
            show: None,
            output: None,
            quiet: false,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone)]
pub enum Invocation {
    Run(SweepConfig),
    Help,
}

fn value<I>(flag: &str, args: &mut I) -> Result<String, ConfigError>
where
    I: Iterator<Item = String>,
{
    args.next()
        .ok_or_else(|| ConfigError::MissingValue(flag.to_string()))
}

fn parsed<T: FromStr, I>(flag: &str, args: &mut I) -> Result<T, ConfigError>
where
    I: Iterator<Item = String>,
{
    let raw = value(flag, args)?;
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: raw,
    })
}

impl SweepConfig {
    /// Parses flags (without the program name).
    pub fn from_args<I>(args: I) -> Result<Invocation, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = SweepConfig::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" => config.catalog = Some(PathBuf::from(value(&arg, &mut args)?)),
                "--team" => {
                    let raw = value(&arg, &mut args)?;
                    config.team = match Team::from_name(&raw) {
                        Some(t @ (Team::Good | Team::Bad)) => t,
                        _ => {
                            return Err(ConfigError::InvalidValue {
                                flag: arg.clone(),
                                value: raw,
                            })
                        }
                    };
                }
                "--threads" => config.threads = parsed(&arg, &mut args)?,
                "--top" => config.top = parsed(&arg, &mut args)?,
                "--rank" => config.policy = value(&arg, &mut args)?.parse()?,
                "--progress" => config.yield_every = parsed(&arg, &mut args)?,
                "--show" => config.show = Some(parsed(&arg, &mut args)?),
                "--output" => config.output = Some(PathBuf::from(value(&arg, &mut args)?)),
                "--quiet" => config.quiet = true,
                "--help" | "-h" => return Ok(Invocation::Help),
                _ => return Err(ConfigError::UnknownArgument(arg.clone())),
            }
        }

        if config.catalog.is_none() {
            return Err(ConfigError::MissingCatalog);
        }
        if config.threads == 0 {
            return Err(ConfigError::InvalidValue {
                flag: "--threads".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(Invocation::Run(config))
    }

    /// Sweep knobs derived from this configuration.
    pub fn sweep_options(&self) -> SweepOptions {
        SweepOptions {
            yield_every: self.yield_every,
            threads: self.threads,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RankPolicyError;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run(list: &[&str]) -> Result<SweepConfig, ConfigError> {
        match SweepConfig::from_args(args(list))? {
            Invocation::Run(c) => Ok(c),
            Invocation::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn defaults() {
        let c = run(&["--catalog", "c.json"]).unwrap();
        assert_eq!(c.catalog, Some(PathBuf::from("c.json")));
        assert_eq!(c.team, Team::Good);
        assert_eq!(c.threads, 4);
        assert_eq!(c.top, 10);
        assert_eq!(c.policy, RankPolicy::default());
        assert!(!c.quiet);
        assert_eq!(c.sweep_options().yield_every, DEFAULT_YIELD_EVERY);
    }

    #[test]
    fn all_flags() {
        let c = run(&[
            "--catalog", "c.json", "--team", "bad", "--threads", "2", "--top", "3", "--rank",
            "miss:high", "--progress", "100", "--show", "1", "--output", "out.jsonl", "--quiet",
        ])
        .unwrap();
        assert_eq!(c.team, Team::Bad);
        assert_eq!(c.threads, 2);
        assert_eq!(c.top, 3);
        assert_eq!(c.policy.to_string(), "miss:high");
        assert_eq!(c.yield_every, 100);
        assert_eq!(c.show, Some(1));
        assert_eq!(c.output, Some(PathBuf::from("out.jsonl")));
        assert!(c.quiet);
    }

    #[test]
    fn help() {
        assert!(matches!(
            SweepConfig::from_args(args(&["--help"])),
            Ok(Invocation::Help)
        ));
    }

    #[test]
    fn errors() {
        assert_eq!(run(&[]).unwrap_err(), ConfigError::MissingCatalog);
        assert_eq!(
            run(&["--catalog"]).unwrap_err(),
            ConfigError::MissingValue("--catalog".to_string())
        );
        assert_eq!(
            run(&["--catalog", "c.json", "--bogus"]).unwrap_err(),
            ConfigError::UnknownArgument("--bogus".to_string())
        );
        assert_eq!(
            run(&["--catalog", "c.json", "--threads", "many"]).unwrap_err(),
            ConfigError::InvalidValue {
                flag: "--threads".to_string(),
                value: "many".to_string()
            }
        );
        assert!(matches!(
            run(&["--catalog", "c.json", "--threads", "0"]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            run(&["--catalog", "c.json", "--team", "vehicle"]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(
            run(&["--catalog", "c.json", "--rank", "miss"]).unwrap_err(),
            ConfigError::Policy(RankPolicyError::MalformedKey("miss".to_string()))
        );
    }
}
