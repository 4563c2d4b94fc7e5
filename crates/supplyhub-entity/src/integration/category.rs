//! Integration categories and the services that can fill them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A slot on the user's integration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationCategory {
    /// Storefronts (Shopify, WooCommerce).
    Ecommerce,
    /// ERP and CRM systems (SAP, Salesforce).
    ErpCrm,
    /// Sensor platforms (AWS IoT, Azure IoT).
    Iot,
    /// Reporting tools (Power BI, Tableau).
    BiTools,
}

impl IntegrationCategory {
    /// Return the category as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ecommerce => "ecommerce",
            Self::ErpCrm => "erp_crm",
            Self::Iot => "iot",
            Self::BiTools => "bi_tools",
        }
    }
}

impl fmt::Display for IntegrationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntegrationCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ecommerce" => Ok(Self::Ecommerce),
            "erp_crm" => Ok(Self::ErpCrm),
            "iot" => Ok(Self::Iot),
            "bi_tools" => Ok(Self::BiTools),
            other => Err(format!("Unknown integration category: {other}")),
        }
    }
}

/// A concrete third-party service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationService {
    Shopify,
    Woocommerce,
    Sap,
    Salesforce,
    AwsIot,
    AzureIot,
    PowerBi,
    Tableau,
}

impl IntegrationService {
    /// The category this service belongs to.
    pub fn category(&self) -> IntegrationCategory {
        match self {
            Self::Shopify | Self::Woocommerce => IntegrationCategory::Ecommerce,
            Self::Sap | Self::Salesforce => IntegrationCategory::ErpCrm,
            Self::AwsIot | Self::AzureIot => IntegrationCategory::Iot,
            Self::PowerBi | Self::Tableau => IntegrationCategory::BiTools,
        }
    }

    /// Return the service as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shopify => "shopify",
            Self::Woocommerce => "woocommerce",
            Self::Sap => "sap",
            Self::Salesforce => "salesforce",
            Self::AwsIot => "aws_iot",
            Self::AzureIot => "azure_iot",
            Self::PowerBi => "power_bi",
            Self::Tableau => "tableau",
        }
    }
}

impl fmt::Display for IntegrationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
