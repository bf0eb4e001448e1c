use marketpulse::error::{ConfigError, Error};
use marketpulse::infrastructure::config::registry::RegistryBackend;
use marketpulse::infrastructure::config::settings::Config;
use marketpulse::infrastructure::orchestration::scheduler::Cadence;

fn invalid_field(result: Result<Config, Error>) -> &'static str {
    match result {
        Err(Error::Config(ConfigError::InvalidValue { field, .. })) => field,
        other => panic!("expected an invalid value, got {other:?}"),
    }
}

#[test]
fn example_config_parses() {
    let content = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.toml"))
        .expect("read config.example.toml");
    let config = Config::parse_toml(&content).unwrap();

    assert_eq!(config.anchor().unwrap().as_str(), "XAU/USD");
    assert_eq!(config.rate_pair().unwrap().quote_currency(), "VND");
    assert_eq!(config.registry.backend, RegistryBackend::File);
}

#[test]
fn empty_config_uses_defaults() {
    let config = Config::parse_toml("").unwrap();

    assert_eq!(config.market.rate_ttl_secs, 6 * 60 * 60);
    assert_eq!(config.news.max_items, 7);
    assert_eq!(config.registry.path(), "users.txt");
    assert!(matches!(config.schedule.cadence().unwrap(), Cadence::Daily { .. }));
}

#[test]
fn interval_overrides_daily_schedule() {
    let config = Config::parse_toml("[schedule]\ninterval_secs = 60\n").unwrap();
    assert!(matches!(config.schedule.cadence().unwrap(), Cadence::Every(d) if d.as_secs() == 60));
}

#[test]
fn sqlite_backend_defaults_to_database_file() {
    let config = Config::parse_toml("[registry]\nbackend = \"sqlite\"\n").unwrap();
    assert_eq!(config.registry.path(), "marketpulse.db");
}

#[test]
fn malformed_symbols_are_rejected() {
    assert_eq!(
        invalid_field(Config::parse_toml("[market]\nsymbols = [\"BTCUSD\"]\n")),
        "symbols"
    );
    assert_eq!(
        invalid_field(Config::parse_toml("[market]\nrate_pair = \"VND\"\n")),
        "rate_pair"
    );
}

#[test]
fn empty_anchor_is_a_missing_field() {
    let result = Config::parse_toml("[market]\nanchor = \"  \"\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::MissingField { field: "anchor" }))
    ));
}

#[test]
fn schedule_values_are_checked() {
    assert_eq!(
        invalid_field(Config::parse_toml("[schedule]\ndaily_at = \"8am\"\n")),
        "daily_at"
    );
    assert_eq!(
        invalid_field(Config::parse_toml("[schedule]\nutc_offset_hours = 20\n")),
        "utc_offset_hours"
    );
    assert_eq!(
        invalid_field(Config::parse_toml("[schedule]\ninterval_secs = 0\n")),
        "interval_secs"
    );
}

#[test]
fn unknown_backend_is_a_parse_error() {
    let result = Config::parse_toml("[registry]\nbackend = \"redis\"\n");
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}
