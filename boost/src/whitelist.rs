//! Per-environment, per-space boost settings.
//!
//! The table is configuration: built once at startup, then only read. A space
//! with no entry for an environment is not whitelisted there.
//!
//! ```toml
//! [production."gnosis.eth"]
//!
//! [production."aave.eth"]
//! bribe_disabled = true
//! ```

use agora_types::Environment;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use crate::error::BoostError;

/// Settings for one whitelisted space.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistSetting {
    /// Hide boosts whose eligibility type is `bribe`.
    #[serde(default, alias = "bribeDisabled")]
    pub bribe_disabled: bool,
}

type RawTable = BTreeMap<String, BTreeMap<String, WhitelistSetting>>;

/// Immutable lookup of [`WhitelistSetting`]s keyed by environment then space id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable", into = "RawTable")]
pub struct WhitelistPolicy {
    settings: HashMap<Environment, HashMap<String, WhitelistSetting>>,
}

static GLOBAL_POLICY: OnceLock<WhitelistPolicy> = OnceLock::new();

impl WhitelistPolicy {
    /// Build a policy from `(environment, space, setting)` entries.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Environment, S, WhitelistSetting)>,
        S: Into<String>,
    {
        let mut settings: HashMap<Environment, HashMap<String, WhitelistSetting>> = HashMap::new();
        for (env, space, setting) in entries {
            settings.entry(env).or_default().insert(space.into(), setting);
        }
        Self { settings }
    }

    /// Parse a policy from a TOML document of `[<env>."<space>"]` tables.
    pub fn from_toml_str(s: &str) -> Result<Self, BoostError> {
        toml::from_str(s).map_err(|e| BoostError::Config(e.to_string()))
    }

    pub fn setting(&self, env: Environment, space_id: &str) -> Option<&WhitelistSetting> {
        self.settings.get(&env)?.get(space_id)
    }

    /// Whether `space_id` may show boosts in `env`.
    pub fn is_whitelisted(&self, env: Environment, space_id: &str) -> bool {
        self.setting(env, space_id).is_some()
    }

    /// Whether bribe-type boosts are disabled for `space_id` in `env`.
    /// Spaces without an entry report `false`.
    pub fn bribe_disabled(&self, env: Environment, space_id: &str) -> bool {
        self.setting(env, space_id)
            .is_some_and(|setting| setting.bribe_disabled)
    }

    /// Whitelisted space ids for `env`, sorted.
    pub fn spaces(&self, env: Environment) -> Vec<&str> {
        let mut spaces: Vec<&str> = self
            .settings
            .get(&env)
            .map(|m| m.keys().map(String::as_str).collect())
            .unwrap_or_default();
        spaces.sort_unstable();
        spaces
    }

    /// Make this the process-wide policy. Only the first installation wins,
    /// and it must happen before the first call to [`global`](Self::global).
    pub fn install(self) -> Result<&'static WhitelistPolicy, BoostError> {
        let count = self.settings.values().map(HashMap::len).sum::<usize>();
        GLOBAL_POLICY
            .set(self)
            .map_err(|_| BoostError::AlreadyInstalled)?;
        tracing::info!(entries = count, "installed boost whitelist");
        Ok(Self::global())
    }

    /// The process-wide policy; empty if none was installed.
    pub fn global() -> &'static WhitelistPolicy {
        GLOBAL_POLICY.get_or_init(WhitelistPolicy::default)
    }
}

impl TryFrom<RawTable> for WhitelistPolicy {
    type Error = BoostError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        let mut settings = HashMap::new();
        for (env, spaces) in raw {
            let env: Environment = env.parse()?;
            settings.insert(env, spaces.into_iter().collect());
        }
        Ok(Self { settings })
    }
}

impl From<WhitelistPolicy> for RawTable {
    fn from(policy: WhitelistPolicy) -> Self {
        policy
            .settings
            .into_iter()
            .map(|(env, spaces)| (env.as_str().to_string(), spaces.into_iter().collect()))
            .collect()
    }
}
