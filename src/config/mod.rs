pub mod tracing;

use figment::providers::{Env, Format, Json};
use figment::Figment;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct AppCfg {
    pub database_url: String,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    #[serde(default = "default_db_pool_size")]
    pub db_pool_size: usize,
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,
    #[serde(default)]
    pub cors_origins: Vec<String>,
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_listen_addr() -> String {
    "0.0.0.0:3000".to_owned()
}

fn default_db_pool_size() -> usize {
    10
}

fn default_token_ttl_secs() -> i64 {
    24 * 60 * 60
}

fn default_run_migrations() -> bool {
    true
}

impl AppCfg {
    /// `appsettings.json`, overridden by `APP_*` environment variables.
    pub fn load() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Json::file("appsettings.json"))
            .merge(Env::prefixed("APP_"))
            .extract()
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::AppCfg;

    #[test]
    fn env_overrides_file_and_defaults_fill_the_rest() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "appsettings.json",
                r#"{ "database_url": "postgres://file/blog", "db_pool_size": 4 }"#,
            )?;
            jail.set_env("APP_DATABASE_URL", "postgres://env/blog");
            jail.set_env("APP_JWT_SECRET", "hunter2");

            let cfg = AppCfg::load()?;
            assert_eq!(cfg.database_url, "postgres://env/blog");
            assert_eq!(cfg.db_pool_size, 4);
            assert_eq!(cfg.jwt_secret, "hunter2");
            assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
            assert_eq!(cfg.token_ttl_secs, 86400);
            assert!(cfg.cors_origins.is_empty());
            assert!(cfg.run_migrations);
            Ok(())
        });
    }

    #[test]
    fn missing_secret_is_an_error() {
        Jail::expect_with(|jail| {
            jail.set_env("APP_DATABASE_URL", "postgres://env/blog");
            assert!(AppCfg::load().is_err());
            Ok(())
        });
    }
}
