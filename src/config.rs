use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SimError};

/// one-off transfer between two named accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEntry {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub date: String,
}

/// one-off purchase charged to the buffer account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseEntry {
    pub amount: f64,
    pub date: String,
}

/// simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// path of the chart-of-accounts CSV
    pub accounts: String,
    /// simulation start, `%m/%d/%Y`, inclusive
    pub start_date: String,
    /// simulation end, `%m/%d/%Y`, exclusive
    pub end_date: String,
    #[serde(default)]
    pub fast_payoff_enabled: bool,
    /// buffer-account ceiling; the end-of-day sweep pushes anything above it
    /// into the reserve
    #[serde(default = "default_buffer_ceiling")]
    pub max_checking_balance: f64,
    #[serde(default)]
    pub payments: BTreeMap<String, PaymentEntry>,
    #[serde(default)]
    pub purchases: BTreeMap<String, PurchaseEntry>,
}

fn default_buffer_ceiling() -> f64 {
    7500.0
}

impl Settings {
    /// load settings from a YAML or JSON file, dispatched on extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content).map_err(|e| SimError::Config {
                message: format!("failed to parse {}: {e}", path.display()),
            }),
            _ => serde_saphyr::from_str(&content).map_err(|e| SimError::Config {
                message: format!("failed to parse {}: {e}", path.display()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    const YAML: &str = "\
accounts: demo/accounts.csv
start_date: 01/01/2026
end_date: 01/01/2027
fast_payoff_enabled: true
max_checking_balance: 9000.0
payments:
  piano_sale:
    from: PIANO
    to: CHGF
    amount: 500.0
    date: 06/15/2026
purchases:
  roof:
    amount: 2500.0
    date: 09/01/2026
";

    const JSON: &str = r#"{
  "accounts": "demo/accounts.csv",
  "start_date": "01/01/2026",
  "end_date": "01/01/2027"
}"#;

    fn write_fixture(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_loads_yaml() {
        let file = write_fixture(".yaml", YAML);
        let settings = Settings::load(file.path()).unwrap();

        assert_eq!(settings.accounts, "demo/accounts.csv");
        assert!(settings.fast_payoff_enabled);
        assert_eq!(settings.max_checking_balance, 9000.0);

        let payment = &settings.payments["piano_sale"];
        assert_eq!(payment.from, "PIANO");
        assert_eq!(payment.to, "CHGF");
        assert_eq!(payment.amount, 500.0);

        assert_eq!(settings.purchases["roof"].amount, 2500.0);
    }

    #[test]
    fn test_loads_json_and_applies_defaults() {
        let file = write_fixture(".json", JSON);
        let settings = Settings::load(file.path()).unwrap();

        assert!(!settings.fast_payoff_enabled);
        assert_eq!(settings.max_checking_balance, 7500.0);
        assert!(settings.payments.is_empty());
        assert!(settings.purchases.is_empty());
    }

    #[test]
    fn test_malformed_file_is_a_config_error() {
        let file = write_fixture(".json", "{ not json");
        assert!(matches!(
            Settings::load(file.path()),
            Err(SimError::Config { .. })
        ));
    }
}
