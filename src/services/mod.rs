//! Per-resource API methods.
//!
//! Thin, table-like layer over the dispatcher: every method checks the
//! database precondition, fills in a fixed path template and delegates to
//! the client's verb helpers. No branching beyond optional query
//! parameters lives here.

mod accounts;
mod customers;
mod documents;
mod invoices;
mod journals;
mod orders;
mod products;
mod templates;

pub use accounts::AccountsService;
pub use customers::CustomersService;
pub use documents::DocumentsService;
pub use invoices::InvoicesService;
pub use journals::JournalsService;
pub use orders::OrdersService;
pub use products::ProductsService;
pub use templates::TemplatesService;
