//! `BETLEDGER_ADMINISTRATOR` handling.
//!
//! Kept in its own test binary with a single test: the variable is process
//! wide, and no other config test may observe it.

use betledger::config::{Config, ADMINISTRATOR_ENV};

const CONFIG: &str = r#"
[ledger]
administrator = "0xfile"
"#;

fn administrator() -> String {
    Config::parse_toml(CONFIG).unwrap().ledger.administrator
}

#[test]
fn environment_overrides_administrator_unless_blank() {
    std::env::remove_var(ADMINISTRATOR_ENV);
    assert_eq!(administrator(), "0xfile");

    std::env::set_var(ADMINISTRATOR_ENV, "0xenv");
    assert_eq!(administrator(), "0xenv");
    let settings = Config::parse_toml(CONFIG).unwrap().ledger.settings().unwrap();
    assert_eq!(settings.administrator.as_str(), "0xenv");

    std::env::set_var(ADMINISTRATOR_ENV, "  ");
    assert_eq!(administrator(), "0xfile");

    std::env::remove_var(ADMINISTRATOR_ENV);
    assert_eq!(administrator(), "0xfile");
}
