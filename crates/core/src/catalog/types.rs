//! Registry domain types.

use chrono::NaiveDateTime;
use gestor_shared::types::{AppointmentId, BankAccountId, ClientId, ServiceId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured fiscal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street name.
    pub street: String,
    /// Street number.
    pub number: String,
    /// Complement (apartment, suite).
    pub complement: Option<String>,
    /// District (bairro).
    pub district: String,
    /// City name.
    pub city: String,
    /// State abbreviation (UF).
    pub state: String,
    /// Postal code (CEP).
    pub postal_code: String,
    /// IBGE municipality code, required by most NFS-e portals.
    pub city_ibge_code: Option<String>,
}

impl Address {
    /// Renders the address on one line, skipping empty parts.
    #[must_use]
    pub fn one_line(&self) -> String {
        let mut street = self.street.clone();
        if !self.number.is_empty() {
            street = format!("{street}, {}", self.number);
        }
        if let Some(complement) = self.complement.as_deref().filter(|c| !c.is_empty()) {
            street = format!("{street} - {complement}");
        }
        let city = match (self.city.is_empty(), self.state.is_empty()) {
            (false, false) => format!("{}/{}", self.city, self.state),
            (false, true) => self.city.clone(),
            (true, _) => self.state.clone(),
        };

        [street, self.district.clone(), city, self.postal_code.clone()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" - ")
    }
}

/// A customer (tomador).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier.
    pub id: ClientId,
    /// Legal or display name.
    pub name: String,
    /// CPF or CNPJ.
    pub document: String,
    /// Municipal inscription, when the client has one.
    pub municipal_inscription: Option<String>,
    /// Contact e-mail.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Fiscal address.
    pub address: Address,
}

impl Client {
    /// Creates a client with an empty address.
    #[must_use]
    pub fn new(name: impl Into<String>, document: impl Into<String>) -> Self {
        Self {
            id: ClientId::new(),
            name: name.into(),
            document: document.into(),
            municipal_inscription: None,
            email: None,
            phone: None,
            address: Address::default(),
        }
    }
}

/// Federal withholding rates, each a percentage of the item's prorated net value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingRates {
    /// PIS rate.
    pub pis: Decimal,
    /// COFINS rate.
    pub cofins: Decimal,
    /// CSLL rate.
    pub csll: Decimal,
    /// IRRF rate.
    pub ir: Decimal,
    /// INSS rate.
    pub inss: Decimal,
}

impl WithholdingRates {
    /// Returns `(name, rate)` pairs in fiscal display order.
    #[must_use]
    pub fn named(&self) -> [(&'static str, Decimal); 5] {
        [
            ("PIS", self.pis),
            ("COFINS", self.cofins),
            ("CSLL", self.csll),
            ("IR", self.ir),
            ("INSS", self.inss),
        ]
    }
}

/// Catalog entry for a sellable service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Unique identifier.
    pub id: ServiceId,
    /// Display name.
    pub name: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Base unit price.
    pub base_price: Decimal,
    /// Item of the federal service list (LC 116).
    pub service_list_code: String,
    /// Municipal taxation code.
    pub municipal_code: String,
    /// CNAE activity code.
    pub cnae: String,
    /// ISS rate in percent.
    pub iss_rate: Decimal,
    /// Federal withholding rates.
    pub withholding: WithholdingRates,
}

impl Service {
    /// Creates a service with no fiscal codes and zero rates.
    #[must_use]
    pub fn new(name: impl Into<String>, base_price: Decimal) -> Self {
        Self {
            id: ServiceId::new(),
            name: name.into(),
            description: None,
            base_price,
            service_list_code: String::new(),
            municipal_code: String::new(),
            cnae: String::new(),
            iss_rate: Decimal::ZERO,
            withholding: WithholdingRates::default(),
        }
    }
}

/// A bank or cash account money flows through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    /// Unique identifier.
    pub id: BankAccountId,
    /// Display name.
    pub name: String,
    /// Bank name, if any.
    pub bank: Option<String>,
    /// Balance before any recorded movement.
    pub initial_balance: Decimal,
}

impl BankAccount {
    /// Creates an account.
    #[must_use]
    pub fn new(name: impl Into<String>, initial_balance: Decimal) -> Self {
        Self {
            id: BankAccountId::new(),
            name: name.into(),
            bank: None,
            initial_balance,
        }
    }
}

/// Appointment lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    /// Booked.
    #[serde(rename = "Agendado")]
    Scheduled,
    /// Done.
    #[serde(rename = "Concluído")]
    Completed,
    /// Called off.
    #[serde(rename = "Cancelado")]
    Cancelled,
}

impl AppointmentStatus {
    /// Returns the display name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "Agendado",
            Self::Completed => "Concluído",
            Self::Cancelled => "Cancelado",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A scheduled service for a client. Independent of the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Unique identifier.
    pub id: AppointmentId,
    /// Client served.
    pub client_id: ClientId,
    /// Service booked.
    pub service_id: ServiceId,
    /// When.
    pub date_time: NaiveDateTime,
    /// Free-text notes.
    pub notes: String,
    /// Lifecycle status.
    pub status: AppointmentStatus,
}

/// Company tax regime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxRegime {
    /// Simples Nacional.
    #[default]
    #[serde(rename = "Simples Nacional")]
    SimplesNacional,
    /// Microempreendedor Individual.
    #[serde(rename = "MEI")]
    Mei,
    /// Lucro Presumido.
    #[serde(rename = "Lucro Presumido")]
    LucroPresumido,
    /// Lucro Real.
    #[serde(rename = "Lucro Real")]
    LucroReal,
}

/// Process-wide company configuration. Not used by ledger computations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySettings {
    /// Legal name.
    pub company_name: String,
    /// Trade name.
    pub trade_name: Option<String>,
    /// CNPJ.
    pub document: String,
    /// Municipal inscription.
    pub municipal_inscription: Option<String>,
    /// Fiscal address.
    pub address: Address,
    /// Contact e-mail.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Tax regime.
    pub tax_regime: TaxRegime,
    /// Whether ISS is withheld by the client by default.
    pub iss_withheld_by_default: bool,
}
