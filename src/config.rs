//! Store configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@algotrek.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_ADMIN_NAME: &str = "Admin User";
pub const DEFAULT_ADMIN_DOMAIN: &str = "algotrek.com";

pub const DEMO_USER_EMAIL: &str = "user@algotrek.com";
pub const DEMO_USER_PASSWORD: &str = "user123";
pub const DEMO_USER_NAME: &str = "Test User";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Argon2 cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    pub memory_kib: u32,
    pub iterations: u32,
}

impl HashCost {
    /// Argon2's recommended defaults.
    pub const DEFAULT: Self = Self { memory_kib: 19_456, iterations: 2 };
    /// Smallest accepted cost. Only for tests and throwaway demos.
    pub const MIN: Self = Self { memory_kib: 8, iterations: 1 };
}

impl Default for HashCost {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// An account created when the store is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedAccount {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub admin: SeedAccount,
    /// Domain an email must carry to register as admin.
    pub admin_domain: String,
    /// Also seed `user@algotrek.com`. This occupies the single user slot.
    pub seed_demo_user: bool,
    pub hash_cost: HashCost,
    /// Where a consumer may cache the admin hint. `None` disables the cache.
    pub admin_hint_path: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            admin: SeedAccount {
                email: DEFAULT_ADMIN_EMAIL.into(),
                password: DEFAULT_ADMIN_PASSWORD.into(),
                full_name: DEFAULT_ADMIN_NAME.into(),
            },
            admin_domain: DEFAULT_ADMIN_DOMAIN.into(),
            seed_demo_user: false,
            hash_cost: HashCost::DEFAULT,
            admin_hint_path: None,
        }
    }
}

impl StoreConfig {
    /// Build typed store config from environment variables.
    ///
    /// Optional:
    /// - `ALGOTREK_ADMIN_EMAIL`, `ALGOTREK_ADMIN_PASSWORD`, `ALGOTREK_ADMIN_NAME`
    /// - `ALGOTREK_ADMIN_DOMAIN`: default `algotrek.com`
    /// - `ALGOTREK_SEED_DEMO_USER`: boolean, default false
    /// - `ALGOTREK_HASH_MEMORY_KIB`, `ALGOTREK_HASH_ITERATIONS`: Argon2 cost
    /// - `ALGOTREK_ADMIN_HINT_PATH`: file for the consumer-side admin hint
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`StoreConfig::from_env`], reading through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let admin = SeedAccount {
            email: var("ALGOTREK_ADMIN_EMAIL").unwrap_or(defaults.admin.email),
            password: var("ALGOTREK_ADMIN_PASSWORD").unwrap_or(defaults.admin.password),
            full_name: var("ALGOTREK_ADMIN_NAME").unwrap_or(defaults.admin.full_name),
        };
        let admin_domain = var("ALGOTREK_ADMIN_DOMAIN").unwrap_or(defaults.admin_domain);

        let seed_demo_user = match var("ALGOTREK_SEED_DEMO_USER") {
            Some(raw) => parse_bool(&raw)
                .ok_or(ConfigError::InvalidValue { key: "ALGOTREK_SEED_DEMO_USER", value: raw })?,
            None => defaults.seed_demo_user,
        };

        let memory_kib = var("ALGOTREK_HASH_MEMORY_KIB");
        let iterations = var("ALGOTREK_HASH_ITERATIONS");
        let hash_cost = HashCost {
            memory_kib: parse_u32("ALGOTREK_HASH_MEMORY_KIB", memory_kib, defaults.hash_cost.memory_kib)?,
            iterations: parse_u32("ALGOTREK_HASH_ITERATIONS", iterations, defaults.hash_cost.iterations)?,
        };

        let admin_hint_path = var("ALGOTREK_ADMIN_HINT_PATH").map(PathBuf::from);

        Ok(Self { admin, admin_domain, seed_demo_user, hash_cost, admin_hint_path })
    }

    /// The demo regular user seeded when `seed_demo_user` is set.
    #[must_use]
    pub fn demo_user() -> SeedAccount {
        SeedAccount {
            email: DEMO_USER_EMAIL.into(),
            password: DEMO_USER_PASSWORD.into(),
            full_name: DEMO_USER_NAME.into(),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_u32(key: &'static str, raw: Option<String>, default: u32) -> Result<u32, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
