//! Per-category integration settings.

use serde::{Deserialize, Serialize};

use super::category::{IntegrationCategory, IntegrationService};

/// Credentials for a configured integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationCredentials {
    /// API key or access token.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Store or tenant URL, e.g. `acme.myshopify.com`.
    #[serde(default)]
    pub store_url: Option<String>,
}

impl IntegrationCredentials {
    /// Whether an API key is present and non-blank.
    pub fn is_present(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// Whether the store URL refers to the given shop domain.
    ///
    /// Compares host names case-insensitively, ignoring scheme and trailing slashes.
    pub fn matches_store(&self, domain: &str) -> bool {
        self.store_url
            .as_deref()
            .is_some_and(|url| normalize_host(url) == normalize_host(domain))
    }
}

fn normalize_host(value: &str) -> String {
    let trimmed = value.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    without_scheme
        .split('/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Processability of an integration slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationState {
    /// Enabled with credentials.
    Ready,
    /// Switched off.
    Disabled,
    /// Enabled, but no credentials configured.
    MissingCredentials,
}

/// Settings for one integration category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationSettings {
    /// Whether the integration is switched on.
    #[serde(default)]
    pub enabled: bool,
    /// Which service fills this slot.
    #[serde(default)]
    pub service: Option<IntegrationService>,
    /// Service credentials.
    #[serde(default)]
    pub credentials: Option<IntegrationCredentials>,
}

impl IntegrationSettings {
    /// Classify the slot.
    pub fn state(&self) -> IntegrationState {
        if !self.enabled {
            return IntegrationState::Disabled;
        }
        match &self.credentials {
            Some(creds) if creds.is_present() => IntegrationState::Ready,
            _ => IntegrationState::MissingCredentials,
        }
    }
}

/// All integration slots of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integrations {
    #[serde(default)]
    pub ecommerce: IntegrationSettings,
    #[serde(default)]
    pub erp_crm: IntegrationSettings,
    #[serde(default)]
    pub iot: IntegrationSettings,
    #[serde(default)]
    pub bi_tools: IntegrationSettings,
}

impl Integrations {
    /// Borrow the settings for a category.
    pub fn get(&self, category: IntegrationCategory) -> &IntegrationSettings {
        match category {
            IntegrationCategory::Ecommerce => &self.ecommerce,
            IntegrationCategory::ErpCrm => &self.erp_crm,
            IntegrationCategory::Iot => &self.iot,
            IntegrationCategory::BiTools => &self.bi_tools,
        }
    }

    /// Replace the settings for a category.
    pub fn set(&mut self, category: IntegrationCategory, settings: IntegrationSettings) {
        match category {
            IntegrationCategory::Ecommerce => self.ecommerce = settings,
            IntegrationCategory::ErpCrm => self.erp_crm = settings,
            IntegrationCategory::Iot => self.iot = settings,
            IntegrationCategory::BiTools => self.bi_tools = settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(enabled: bool, api_key: Option<&str>) -> IntegrationSettings {
        IntegrationSettings {
            enabled,
            service: Some(IntegrationService::Shopify),
            credentials: Some(IntegrationCredentials {
                api_key: api_key.map(str::to_string),
                store_url: Some("https://Acme.myshopify.com/".into()),
            }),
        }
    }

    #[test]
    fn test_state_classification() {
        assert_eq!(settings(true, Some("k")).state(), IntegrationState::Ready);
        assert_eq!(settings(false, Some("k")).state(), IntegrationState::Disabled);
        assert_eq!(settings(true, None).state(), IntegrationState::MissingCredentials);
        assert_eq!(settings(true, Some("  ")).state(), IntegrationState::MissingCredentials);
    }

    #[test]
    fn test_store_match_ignores_scheme_and_case() {
        let creds = settings(true, Some("k")).credentials.unwrap();
        assert!(creds.matches_store("acme.myshopify.com"));
        assert!(!creds.matches_store("other.myshopify.com"));
    }

    #[test]
    fn test_missing_slots_default_to_disabled() {
        let parsed: Integrations = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.get(IntegrationCategory::Iot).state(), IntegrationState::Disabled);
    }
}
