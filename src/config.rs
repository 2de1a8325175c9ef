//! Experiment configuration loading and validation.
//!
//! The config is a flat `key value` text file (one pair per line) kept
//! compatible with existing experiment setups. It is parsed once at startup
//! into an immutable [`Config`]; everything downstream borrows it read-only.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default document compiler invoked on each rendered list.
pub const DEFAULT_COMPILER: &str = "xelatex";

/// Default number of points on the rating scale.
pub const DEFAULT_SCALE_POINTS: u32 = 7;

/// Immutable experiment parameters, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Stimuli file name, relative to the inputs directory.
    pub stimuli: PathBuf,
    /// Fillers file name, relative to the inputs directory.
    pub fillers: PathBuf,
    /// Document template file name, relative to the inputs directory.
    pub template: PathBuf,
    /// Number of conditions per item.
    pub no_conds: u32,
    /// Number of presentation lists.
    pub no_lists: u32,
    /// Target filler:item ratio, as configured (`f:i`).
    pub filler_ratio: (u32, u32),
    /// Experiment name, used in output file names.
    pub ex_name: String,
    /// Shuffle seed; `None` means OS entropy (non-reproducible).
    pub seed: Option<u64>,
    /// Compiler command line for rendered documents.
    pub compiler: String,
    /// Width of the rating scale rendered under each stimulus.
    pub scale_points: u32,
}

/// Parse the raw `key value` pairs out of config text.
///
/// Blank lines and `#` comments are skipped. Later occurrences of a key
/// override earlier ones.
fn parse_pairs(text: &str) -> BTreeMap<String, String> {
    let mut pairs = BTreeMap::new();
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once(char::is_whitespace) else {
            tracing::warn!(line = raw, "config line has no value; skipping");
            continue;
        };
        pairs.insert(key.to_string(), value.trim().to_string());
    }
    pairs
}

pub fn parse_config(text: &str) -> Result<Config> {
    let mut pairs = parse_pairs(text);

    let stimuli = PathBuf::from(take_required(&mut pairs, "stimuli")?);
    let fillers = PathBuf::from(take_required(&mut pairs, "fillers")?);
    let template = PathBuf::from(take_required(&mut pairs, "template")?);
    let no_conds = parse_u32(&take_required(&mut pairs, "no_conds")?, "no_conds")?;
    let no_lists = parse_u32(&take_required(&mut pairs, "no_lists")?, "no_lists")?;
    let filler_ratio = parse_ratio(&take_required(&mut pairs, "filler_ratio")?)?;
    let ex_name = take_required(&mut pairs, "ex_name")?;

    let seed = match pairs.remove("seed") {
        Some(value) => Some(value.parse::<u64>().map_err(|e| Error::InvalidKey {
            key: "seed",
            value,
            reason: e.to_string(),
        })?),
        None => None,
    };
    let compiler = pairs
        .remove("compiler")
        .unwrap_or_else(|| DEFAULT_COMPILER.to_string());
    let scale_points = match pairs.remove("scale_points") {
        Some(value) => parse_u32(&value, "scale_points")?,
        None => DEFAULT_SCALE_POINTS,
    };

    for key in pairs.keys() {
        tracing::warn!(key = %key, "ignoring unrecognized config key");
    }

    let config = Config {
        stimuli,
        fillers,
        template,
        no_conds,
        no_lists,
        filler_ratio,
        ex_name,
        seed,
        compiler,
        scale_points,
    };
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text)
}

impl Config {
    /// Structural validation beyond per-key parsing.
    pub fn validate(&self) -> Result<()> {
        if self.no_conds < 2 {
            return Err(Error::InvalidKey {
                key: "no_conds",
                value: self.no_conds.to_string(),
                reason: "an experiment needs at least two conditions".to_string(),
            });
        }
        if self.no_lists == 0 {
            return Err(Error::InvalidKey {
                key: "no_lists",
                value: self.no_lists.to_string(),
                reason: "must be positive".to_string(),
            });
        }
        // The rotation in assign::assign_list only yields a balanced square
        // when every item has one condition per list.
        if self.no_lists != self.no_conds {
            return Err(Error::ListConditionMismatch {
                no_lists: self.no_lists,
                no_conds: self.no_conds,
            });
        }
        if self.scale_points == 0 || self.scale_points > 9 {
            return Err(Error::InvalidKey {
                key: "scale_points",
                value: self.scale_points.to_string(),
                reason: "must be between 1 and 9".to_string(),
            });
        }
        if self.ex_name.contains(std::path::is_separator) {
            return Err(Error::InvalidKey {
                key: "ex_name",
                value: self.ex_name.clone(),
                reason: "must not contain path separators".to_string(),
            });
        }
        Ok(())
    }
}

fn take_required(pairs: &mut BTreeMap<String, String>, key: &'static str) -> Result<String> {
    pairs.remove(key).ok_or(Error::MissingKey { key })
}

fn parse_u32(value: &str, key: &'static str) -> Result<u32> {
    let parsed = value.parse::<u32>().map_err(|e| Error::InvalidKey {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    Ok(parsed)
}

fn parse_ratio(value: &str) -> Result<(u32, u32)> {
    let invalid = |reason: &str| Error::InvalidKey {
        key: "filler_ratio",
        value: value.to_string(),
        reason: reason.to_string(),
    };
    let (f, i) = value
        .split_once(':')
        .ok_or_else(|| invalid("expected the form f:i"))?;
    let f = f
        .trim()
        .parse::<u32>()
        .map_err(|_| invalid("numerator is not a number"))?;
    let i = i
        .trim()
        .parse::<u32>()
        .map_err(|_| invalid("denominator is not a number"))?;
    if f == 0 || i == 0 {
        return Err(invalid("both parts must be positive"));
    }
    Ok((f, i))
}
