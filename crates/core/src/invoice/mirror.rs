//! Invoice mirror (espelho).
//!
//! A read-only projection that gathers what a person needs to fill the
//! municipal NFS-e portal by hand: tomador identity, service classification,
//! gross value, federal withholdings, ISS and the item discrimination text.
//! Several sales of the same client can be grouped; retentions are computed
//! per sale and summed per tax before rounding.

use gestor_shared::types::SaleId;
use gestor_shared::types::money::{format_brl, round_money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::InvoiceError;
use crate::catalog::{Address, Client, Service};
use crate::sales::{RetentionBreakdown, Sale, TaxAmounts};

/// Tomador (service taker) block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorTomador {
    /// Name.
    pub name: String,
    /// CPF or CNPJ.
    pub document: String,
    /// Municipal inscription.
    pub municipal_inscription: Option<String>,
    /// E-mail.
    pub email: Option<String>,
    /// Structured address.
    pub address: Address,
    /// Address on one line.
    pub address_line: String,
}

/// Service classification codes, taken from the first item's service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorClassification {
    /// Service name.
    pub service_name: String,
    /// Federal service list item.
    pub service_list_code: String,
    /// Municipal taxation code.
    pub municipal_code: String,
    /// CNAE.
    pub cnae: String,
    /// ISS rate in percent.
    pub iss_rate: Decimal,
}

/// The assembled mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceMirror {
    /// Client block.
    pub tomador: MirrorTomador,
    /// Classification codes; `None` when the service left the catalog.
    pub classification: Option<MirrorClassification>,
    /// Service value after discounts.
    pub gross_amount: Decimal,
    /// Withholdings per tax, rounded.
    pub withheld: TaxAmounts,
    /// Sum of `withheld`.
    pub total_withheld: Decimal,
    /// ISS due.
    pub iss_amount: Decimal,
    /// `gross_amount - total_withheld`.
    pub liquid_amount: Decimal,
    /// Free-text item discrimination.
    pub discrimination: String,
    /// Sales covered.
    pub sale_ids: Vec<SaleId>,
}

impl InvoiceMirror {
    /// Builds the mirror for `sales`, all of which must belong to `client`.
    pub fn build(
        client: &Client,
        sales: &[&Sale],
        services: &[Service],
    ) -> Result<Self, InvoiceError> {
        if sales.is_empty() {
            return Err(InvoiceError::NoSales);
        }
        if sales.iter().any(|sale| sale.client_id != client.id) {
            return Err(InvoiceError::MixedClients);
        }

        let breakdown = RetentionBreakdown::for_sales(sales.iter().copied(), services).rounded();
        let total_withheld = breakdown.withheld.total();

        let classification = sales
            .iter()
            .flat_map(|sale| sale.items.first())
            .next()
            .and_then(|item| services.iter().find(|s| s.id == item.service_id))
            .map(|service| MirrorClassification {
                service_name: service.name.clone(),
                service_list_code: service.service_list_code.clone(),
                municipal_code: service.municipal_code.clone(),
                cnae: service.cnae.clone(),
                iss_rate: service.iss_rate,
            });

        Ok(Self {
            tomador: MirrorTomador {
                name: client.name.clone(),
                document: client.document.clone(),
                municipal_inscription: client.municipal_inscription.clone(),
                email: client.email.clone(),
                address: client.address.clone(),
                address_line: client.address.one_line(),
            },
            classification,
            gross_amount: breakdown.gross,
            withheld: breakdown.withheld,
            total_withheld,
            iss_amount: breakdown.iss,
            liquid_amount: round_money(breakdown.gross - total_withheld),
            discrimination: Self::discrimination(sales),
            sale_ids: sales.iter().map(|sale| sale.id).collect(),
        })
    }

    fn discrimination(sales: &[&Sale]) -> String {
        let mut lines: Vec<String> = sales
            .iter()
            .flat_map(|sale| &sale.items)
            .map(|item| {
                format!(
                    "{} x {} - {}",
                    item.quantity,
                    item.service_name,
                    format_brl(item.line_total())
                )
            })
            .collect();

        let discount: Decimal = sales.iter().map(|sale| sale.discount).sum();
        if discount > Decimal::ZERO {
            lines.push(format!("Desconto: {}", format_brl(discount)));
        }
        lines.join("\n")
    }
}
