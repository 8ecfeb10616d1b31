//! Demo ledger seeder for Gestor development and testing.
//!
//! Seeds a client, a service catalog, two bank accounts and a handful of
//! sales and payables through the ledger store, then prints the resulting
//! cash statement as JSON.
//!
//! Usage: cargo run --bin seeder

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gestor_core::cashflow::{DateRange, FinancialRecord, RecordType};
use gestor_core::catalog::{Address, BankAccount, Client, CompanySettings, Service, WithholdingRates};
use gestor_core::installment::{Installment, InstallmentKind, PaymentInput};
use gestor_core::sales::{PaymentMethod, Quote, QuoteStatus, Sale, SaleDraft, SaleItem};
use gestor_core::{CommandOutcome, LedgerCommand, LedgerState};
use gestor_shared::types::InvoiceId;
use gestor_shared::{AppConfig, LoggingConfig};
use gestor_store::{Clock, LedgerHandle, SystemClock};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config.logging);

    let (store, task) = LedgerHandle::from_config(&config.ledger, LedgerState::new())?;
    let today = SystemClock::from_config(&config.ledger)?.today();
    info!(timezone = %config.ledger.timezone, %today, "Ledger store ready");

    info!("Seeding registry...");
    let registry = seed_registry(&store).await?;

    info!("Seeding sales...");
    seed_sales(&store, &registry, today).await?;

    info!("Seeding payables...");
    seed_payables(&store, &registry, today).await?;

    let snapshot = store.snapshot();
    let statement = snapshot.cash_statement(DateRange::all());
    for account in &statement.accounts {
        info!(account = %account.name, balance = %account.balance, "Derived balance");
    }
    info!(
        income = %statement.total_income,
        expense = %statement.total_expense,
        net = %statement.net(),
        records = snapshot.financial_records().len(),
        "Seeding complete"
    );
    println!("{}", serde_json::to_string_pretty(&statement)?);

    drop(store);
    task.await?;
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.filter.clone().into());
    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Registry entries the later steps refer to.
struct Registry {
    client: Client,
    consulting: Service,
    support: Service,
    checking: BankAccount,
    cash: BankAccount,
}

async fn seed_registry(store: &LedgerHandle) -> anyhow::Result<Registry> {
    let mut client = Client::new("Padaria Pão Quente Ltda", "12.345.678/0001-90");
    client.email = Some("financeiro@paoquente.com.br".to_string());
    client.address = Address {
        street: "Rua XV de Novembro".to_string(),
        number: "1200".to_string(),
        complement: None,
        district: "Centro".to_string(),
        city: "Curitiba".to_string(),
        state: "PR".to_string(),
        postal_code: "80020-310".to_string(),
        city_ibge_code: Some("4106902".to_string()),
    };

    let mut consulting = Service::new("Consultoria contábil", dec!(1500));
    consulting.service_list_code = "17.19".to_string();
    consulting.municipal_code = "171901".to_string();
    consulting.cnae = "6920-6/01".to_string();
    consulting.iss_rate = dec!(5);
    consulting.withholding = WithholdingRates {
        pis: dec!(0.65),
        cofins: dec!(3),
        csll: dec!(1),
        ir: dec!(1.5),
        inss: Decimal::ZERO,
    };

    let support = Service::new("Suporte mensal", dec!(350));
    let checking = BankAccount::new("Conta Corrente", dec!(5000));
    let cash = BankAccount::new("Caixa", dec!(200));

    let settings = CompanySettings {
        company_name: "Escritório Exemplo Ltda".to_string(),
        document: "98.765.432/0001-10".to_string(),
        ..CompanySettings::default()
    };

    store
        .dispatch_all([
            LedgerCommand::UpdateSettings(settings),
            LedgerCommand::AddClient(client.clone()),
            LedgerCommand::AddService(consulting.clone()),
            LedgerCommand::AddService(support.clone()),
            LedgerCommand::AddBankAccount(checking.clone()),
            LedgerCommand::AddBankAccount(cash.clone()),
        ])
        .await?;
    info!(client = %client.name, services = 2, accounts = 2, "Registry seeded");

    Ok(Registry {
        client,
        consulting,
        support,
        checking,
        cash,
    })
}

async fn seed_sales(
    store: &LedgerHandle,
    registry: &Registry,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let client = &registry.client;

    // Immediate PIX sale.
    let mut pix = SaleDraft::new(
        client.id,
        client.name.clone(),
        vec![SaleItem::from_service(&registry.support, 1)],
        PaymentMethod::Pix,
    );
    pix.bank_account_id = Some(registry.cash.id);
    let pix_invoice = settle(store, pix.into_sale(today)).await?;

    // Quote imported into a boleto sale with retentions deducted.
    let quote = Quote::new(
        client.id,
        client.name.clone(),
        vec![SaleItem::from_service(&registry.consulting, 2)],
        dec!(200),
        today,
        today + Days::new(15),
    );
    store
        .dispatch_all([
            LedgerCommand::AddQuote(quote.clone()),
            LedgerCommand::UpdateQuoteStatus {
                quote_id: quote.id,
                status: QuoteStatus::Approved,
            },
        ])
        .await?;
    let services = store.snapshot().services().to_vec();
    let boleto = quote
        .to_sale_draft(PaymentMethod::Boleto, 3, None)
        .with_catalog_retentions(&services, true)
        .into_sale(today);
    let boleto_id = boleto.id;
    let boleto_invoice = settle(store, boleto).await?;

    store
        .dispatch(LedgerCommand::EmitInvoiceBatch {
            invoice_ids: vec![pix_invoice, boleto_invoice],
            number: "2026/0001".to_string(),
        })
        .await?;

    let snapshot = store.snapshot();
    let mirror = snapshot.invoice_mirror(&[pix_invoice, boleto_invoice])?;
    info!(
        gross = %mirror.gross_amount,
        withheld = %mirror.total_withheld,
        liquid = %mirror.liquid_amount,
        "Invoice mirror"
    );

    // First installment paid short, the gap granted as a discount.
    let first = snapshot
        .accounts_receivable()
        .iter()
        .find(|i| i.sale_id == Some(boleto_id))
        .map(|i| (i.id, i.amount))
        .ok_or_else(|| anyhow::anyhow!("boleto sale has no receivables"))?;
    let payment = PaymentInput::new(first.0, first.1 - dec!(10), registry.checking.id, today)
        .shortfall_as_discount();
    let outcome = store.dispatch(LedgerCommand::PayReceivable(payment)).await?;
    info!(?outcome, "Receivable paid");

    let receivables = store.snapshot().installments(InstallmentKind::Receivable).len();
    info!(receivables, "Sales seeded");
    Ok(())
}

async fn settle(store: &LedgerHandle, sale: Sale) -> anyhow::Result<InvoiceId> {
    match store.dispatch(LedgerCommand::SettleSale(sale)).await? {
        CommandOutcome::SaleSettled { invoice_id, .. } => Ok(invoice_id),
        other => anyhow::bail!("unexpected outcome: {other:?}"),
    }
}

async fn seed_payables(
    store: &LedgerHandle,
    registry: &Registry,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let mut rent = Installment::pending("Aluguel", dec!(2200), today)
        .with_category(Some("Aluguel".to_string()));
    rent.document_number = Some("BOL-5521".to_string());
    let internet = Installment::pending("Internet", dec!(189.90), today + Days::new(10))
        .with_category(Some("Utilidades".to_string()));

    store
        .dispatch(LedgerCommand::AddPayables(vec![rent.clone(), internet]))
        .await?;

    let payment = PaymentInput::new(rent.id, dec!(2244), registry.checking.id, today);
    store.dispatch(LedgerCommand::PayPayable(payment)).await?;

    let fee = FinancialRecord::new(today, "Tarifa bancária", dec!(29.90), RecordType::Expense, "Tarifas")
        .with_bank_account(registry.checking.id);
    store.dispatch(LedgerCommand::RecordCashEntry(fee)).await?;

    info!("Payables seeded");
    Ok(())
}
