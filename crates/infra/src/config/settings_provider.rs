//! Company settings provider backed by loaded configuration.

use async_trait::async_trait;
use forgebid_core::ports::CompanySettingsProvider;
use forgebid_domain::{CompanyConfig, CompanySettings, Result as DomainResult};

/// `CompanySettingsProvider` serving settings resolved at startup from the
/// configuration layer.
pub struct ConfigSettingsProvider {
    settings: CompanySettings,
}

impl ConfigSettingsProvider {
    /// Build a provider from the company section of the loaded config.
    pub fn new(company: &CompanyConfig) -> Self {
        Self { settings: company.settings() }
    }

    /// Build a provider from already-materialized settings.
    pub fn from_settings(settings: CompanySettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl CompanySettingsProvider for ConfigSettingsProvider {
    async fn get_settings(&self) -> DomainResult<CompanySettings> {
        Ok(self.settings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn provider_serves_configured_markup() {
        let company = CompanyConfig {
            material_waste_pct: 5.0,
            labor_waste_pct: 2.0,
            overhead_pct: 12.0,
            profit_pct: 10.0,
            labor_rates: vec![52.0],
        };

        let provider = ConfigSettingsProvider::new(&company);
        let settings = provider.get_settings().await.expect("settings");
        assert_eq!(settings.markup.overhead_pct, 12.0);
        assert_eq!(settings.first_positive_rate(), Some(52.0));
    }
}
