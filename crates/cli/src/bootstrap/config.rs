use anyhow::Context;
use ferrous_lookup_domain::{CliOverrides, Config};

pub fn load_config(path: Option<&str>, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    Config::load(path, cli_overrides).context("Failed to load configuration")
}
