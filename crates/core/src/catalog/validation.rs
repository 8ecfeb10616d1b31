//! Registry validation rules.

use rust_decimal::Decimal;

use super::error::CatalogError;
use super::types::{BankAccount, Client, CompanySettings, Service};

/// Stateless validator for registry entries.
pub struct CatalogValidator;

impl CatalogValidator {
    /// Validates a client before it is added or updated.
    pub fn validate_client(client: &Client) -> Result<(), CatalogError> {
        require("client name", &client.name)
    }

    /// Validates a catalog service.
    ///
    /// Price must be non-negative and every rate must be a percentage.
    pub fn validate_service(service: &Service) -> Result<(), CatalogError> {
        require("service name", &service.name)?;
        if service.base_price < Decimal::ZERO {
            return Err(CatalogError::NegativeAmount {
                field: "base price",
                value: service.base_price,
            });
        }

        check_rate("ISS", service.iss_rate)?;
        for (tax, rate) in service.withholding.named() {
            check_rate(tax, rate)?;
        }
        Ok(())
    }

    /// Validates a bank account. Initial balance may be negative (overdraft).
    pub fn validate_bank_account(account: &BankAccount) -> Result<(), CatalogError> {
        require("bank account name", &account.name)
    }

    /// Validates company settings.
    pub fn validate_settings(settings: &CompanySettings) -> Result<(), CatalogError> {
        require("company name", &settings.company_name)
    }
}

fn require(field: &'static str, value: &str) -> Result<(), CatalogError> {
    if value.trim().is_empty() {
        return Err(CatalogError::MissingField(field));
    }
    Ok(())
}

fn check_rate(tax: &'static str, rate: Decimal) -> Result<(), CatalogError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
        return Err(CatalogError::InvalidRate { tax, rate });
    }
    Ok(())
}
