use std::borrow::Cow;

use lazy_static::lazy_static;
use thiserror::Error;

pub const DEFAULT_TRIALS:usize = 10_000;
pub const DEFAULT_DECADES:u32 = 4;
// 10^19 is the largest power of ten a 64-bit window size holds
pub const MAX_DECADES:u32 = 19;

#[derive(Error,Debug,PartialEq,Eq)]
pub enum ConfigError {
    #[error("{decades} decades of window sizes do not fit in a usize, at most {MAX_DECADES} are supported")]
    TooManyDecades{decades:u32},
}

type Result<T> = std::result::Result<T,ConfigError>;

// window sizes 1..9, 10..90, ... up to the last decade, then 10^decades
pub fn geometric_windows(decades:u32) -> Result<Vec<usize>> {
    let too_many = || ConfigError::TooManyDecades {decades};
    if decades > MAX_DECADES {
        return Err(too_many());
    }
    let mut windows = Vec::with_capacity(decades as usize*9 + 1);
    let mut base:usize = 1;
    for _ in 0..decades {
        for step in 1..10 {
            windows.push(base.checked_mul(step).ok_or_else(too_many)?);
        }
        base = base.checked_mul(10).ok_or_else(too_many)?;
    }
    windows.push(base);
    Ok(windows)
}

lazy_static! {
    // DEFAULT_DECADES is below MAX_DECADES
    static ref DEFAULT_WINDOWS:Vec<usize> = geometric_windows(DEFAULT_DECADES).unwrap_or_default();
}

pub fn default_windows() -> &'static [usize] {
    DEFAULT_WINDOWS.as_slice()
}

/// Knobs of one parameter sweep over window sizes.
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct SweepConfig {
    pub trials:usize,
    pub decades:u32,
    // None means seed from the os entropy source
    pub seed:Option<u64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {trials:DEFAULT_TRIALS,decades:DEFAULT_DECADES,seed:None}
    }
}

impl SweepConfig {
    pub fn window_sizes(&self) -> Result<Cow<'static,[usize]>> {
        if self.decades == DEFAULT_DECADES {
            return Ok(Cow::Borrowed(default_windows()));
        }
        geometric_windows(self.decades).map(Cow::Owned)
    }
}
