//! Category names the engine writes on generated records.

/// Immediate-payment sale receipt.
pub const SALES: &str = "Vendas";
/// Principal received against a receivable installment.
pub const CUSTOMER_RECEIPT: &str = "Recebimento de Cliente";
/// Principal paid against a payable without its own category.
pub const OPERATING_EXPENSE: &str = "Despesa Operacional";
/// Shortfall forgiven on a receivable.
pub const DISCOUNT_GRANTED: &str = "Desconto Concedido";
/// Shortfall forgiven by a supplier on a payable.
pub const DISCOUNT_OBTAINED: &str = "Desconto Obtido";
/// Excess received on a receivable, booked as interest or late fee.
pub const INTEREST_RECEIVED: &str = "Juros/Multa Recebidos";
/// Excess paid on a payable.
pub const INTEREST_PAID: &str = "Juros Pagos";
