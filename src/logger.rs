use env_logger::{Builder, Env};
use log::LevelFilter;

/// Environment variable overriding the default `warn` level, e.g. `HEREDITY_LOG=debug`.
pub const LOG_ENV: &str = "HEREDITY_LOG";

pub fn init_logger() {
    let env = Env::default().filter(LOG_ENV);
    Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_env(env)
        .init();
}
