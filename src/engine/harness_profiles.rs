//! Named harness profiles: bundles of trial count, seed, generator shape and
//! champion. Loaded from TOML at runtime for the CLIs.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::engine::bot_strategy::CHAMPION;
use crate::engine::error::ProfileError;
use crate::engine::generator::GeneratorParams;

/// Fully resolved harness settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessParams {
    pub trials: usize,
    pub seed: u64,
    pub generator: GeneratorParams,
    pub champion: String,
    pub extended_library: bool,
    pub parallel: bool,
    pub halt_on_failure: bool,
}

impl Default for HarnessParams {
    fn default() -> Self {
        Self {
            trials: 9999,
            seed: 42,
            generator: GeneratorParams::default(),
            champion: CHAMPION.to_string(),
            extended_library: false,
            parallel: false,
            halt_on_failure: true,
        }
    }
}

/// A named profile. Every field is optional and falls back to
/// `HarnessParams::default()`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct HarnessProfile {
    pub description: Option<String>,
    pub trials: Option<usize>,
    pub seed: Option<u64>,
    pub min_pots: Option<usize>,
    pub max_pots: Option<usize>,
    pub max_value: Option<u32>,
    pub champion: Option<String>,
    pub extended_library: Option<bool>,
    pub parallel: Option<bool>,
    pub halt_on_failure: Option<bool>,
}

/// Top-level TOML file structure.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct HarnessProfilesFile {
    #[serde(default)]
    pub profiles: HashMap<String, HarnessProfile>,
}

impl HarnessProfile {
    pub fn to_params(&self) -> HarnessParams {
        let d = HarnessParams::default();
        HarnessParams {
            trials: self.trials.unwrap_or(d.trials),
            seed: self.seed.unwrap_or(d.seed),
            generator: GeneratorParams {
                min_pots: self.min_pots.unwrap_or(d.generator.min_pots),
                max_pots: self.max_pots.unwrap_or(d.generator.max_pots),
                max_value: self.max_value.unwrap_or(d.generator.max_value),
            },
            champion: self.champion.clone().unwrap_or(d.champion),
            extended_library: self.extended_library.unwrap_or(d.extended_library),
            parallel: self.parallel.unwrap_or(d.parallel),
            halt_on_failure: self.halt_on_failure.unwrap_or(d.halt_on_failure),
        }
    }
}

impl HarnessProfilesFile {
    pub fn params_for(&self, name: &str) -> Result<HarnessParams, ProfileError> {
        self.profiles
            .get(name)
            .map(HarnessProfile::to_params)
            .ok_or_else(|| ProfileError::NotFound(name.to_string()))
    }
}

/// Command-line overrides layered on top of a profile.
#[derive(Debug, Clone, Default)]
pub struct HarnessOverrides {
    pub trials: Option<usize>,
    pub seed: Option<u64>,
    pub champion: Option<String>,
    pub min_pots: Option<usize>,
    pub max_pots: Option<usize>,
    pub max_value: Option<u32>,
    pub extended_library: bool,
    pub parallel: bool,
    pub collect: bool,
    /// Number of literal rows supplied. Sets `trials` unless it was given.
    pub fixed_rows: usize,
}

impl HarnessOverrides {
    pub fn apply(&self, params: &mut HarnessParams) {
        if let Some(v) = self.trials {
            params.trials = v;
        } else if self.fixed_rows > 0 {
            params.trials = self.fixed_rows;
        }
        if let Some(v) = self.seed {
            params.seed = v;
        }
        if let Some(v) = &self.champion {
            params.champion = v.clone();
        }
        if let Some(v) = self.min_pots {
            params.generator.min_pots = v;
        }
        if let Some(v) = self.max_pots {
            params.generator.max_pots = v;
        }
        if let Some(v) = self.max_value {
            params.generator.max_value = v;
        }
        // flags only ever switch a profile setting on
        params.extended_library |= self.extended_library;
        params.parallel |= self.parallel;
        if self.collect {
            params.halt_on_failure = false;
        }
    }
}

/// Resolve harness settings: built-in defaults, then the named profile, then
/// `overrides`.
///
/// A profiles file without a profile name is still loaded so a bad path or
/// malformed file is reported, but none of its profiles apply.
pub fn resolve_params(
    profile: Option<&str>,
    profiles_path: Option<&Path>,
    overrides: &HarnessOverrides,
) -> Result<HarnessParams, ProfileError> {
    let mut params = match (profile, profiles_path) {
        (Some(name), Some(path)) => load_profiles(path)?.params_for(name)?,
        (Some(name), None) => load_default_profiles().params_for(name)?,
        (None, Some(path)) => {
            let profiles = load_profiles(path)?;
            tracing::warn!(
                path = %path.display(),
                available = ?profiles.profiles.keys().collect::<Vec<_>>(),
                "profiles file given without a profile name, using built-in defaults"
            );
            HarnessParams::default()
        }
        (None, None) => HarnessParams::default(),
    };
    overrides.apply(&mut params);
    Ok(params)
}

/// Load profiles from a TOML file at the given path.
pub fn load_profiles(path: &Path) -> Result<HarnessProfilesFile, ProfileError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProfileError::Read {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ProfileError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Try to load profiles from well-known paths, returning an empty set if none found.
pub fn load_default_profiles() -> HarnessProfilesFile {
    let candidates = [
        "harness_profiles.toml",
        "../harness_profiles.toml",
        "/etc/pots/harness_profiles.toml",
    ];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_profiles(p) {
                Ok(profiles) => {
                    tracing::info!(path = %p.display(), count = profiles.profiles.len(), "loaded harness profiles");
                    return profiles;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load harness profiles");
                }
            }
        }
    }
    tracing::info!("no harness_profiles.toml found, using built-in defaults");
    HarnessProfilesFile::default()
}
