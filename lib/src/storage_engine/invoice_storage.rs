// lib/src/storage_engine/invoice_storage.rs

use chrono::{DateTime, NaiveDate, Utc};
use sled::Transactional;
use tracing::{debug, info};

use models::errors::HostelResult;
use models::hostel::{Invoice, InvoiceUpdate, NewInvoice, PaymentMethod};

use super::collection::not_found;
use super::filters::InvoiceFilter;
use super::sled_storage::HostelStore;
use super::storage_utils::{abort, claim_unique, finish, release_unique, tx_get, tx_put, tx_take};

const INVOICE_NUMBER: &str = "invoice number";

impl HostelStore {
    /// Creates an invoice, generating `INV-000001`-style numbers when none is given.
    pub fn create_invoice(&self, mut new_invoice: NewInvoice) -> HostelResult<Invoice> {
        let invoice_no = match new_invoice.invoice_no.take().map(|n| n.trim().to_string()) {
            Some(n) if !n.is_empty() => n,
            _ => self.generate_invoice_no()?,
        };
        let invoice = Invoice::from_new(new_invoice, invoice_no, Utc::now())?;

        finish((self.invoices.tree(), &self.invoice_numbers).transaction(|(invoices, numbers)| {
            claim_unique(numbers, &invoice.invoice_no, &invoice.id, INVOICE_NUMBER)?;
            tx_put(invoices, &invoice.id, &invoice)
        }))?;

        info!("Created invoice {} for {} ({:?})", invoice.invoice_no, invoice.resident_name, invoice.status);
        Ok(invoice)
    }

    fn generate_invoice_no(&self) -> HostelResult<String> {
        loop {
            let candidate = format!("INV-{:06}", self.next_sequence()?);
            if !self.invoice_numbers.contains_key(candidate.as_bytes())? {
                return Ok(candidate);
            }
        }
    }

    /// Stored invoice, without overdue evaluation.
    pub fn get_invoice(&self, id: &str) -> HostelResult<Invoice> {
        self.invoices.require(id)
    }

    /// Invoices as of `today`, newest first; the filter sees evaluated statuses.
    pub fn list_invoices(&self, filter: &InvoiceFilter, today: NaiveDate) -> HostelResult<Vec<Invoice>> {
        let mut invoices: Vec<Invoice> = self
            .invoices
            .list()?
            .into_iter()
            .map(|i| i.evaluated(today))
            .filter(|i| filter.matches(i))
            .collect();
        invoices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(invoices)
    }

    pub fn update_invoice(&self, id: &str, update: InvoiceUpdate) -> HostelResult<Invoice> {
        let now = Utc::now();
        let invoice = finish(self.invoices.tree().transaction(|invoices| {
            let mut invoice: Invoice = match tx_get(invoices, id)? {
                Some(invoice) => invoice,
                None => return abort(not_found::<Invoice>(id)),
            };
            if let Err(e) = invoice.apply_update(update.clone(), now) {
                return abort(e);
            }
            tx_put(invoices, &invoice.id, &invoice)?;
            Ok(invoice)
        }))?;

        debug!("Updated invoice {} ({:?})", invoice.invoice_no, invoice.status);
        Ok(invoice)
    }

    /// Deletes an unpaid invoice; paid ones are permanent.
    pub fn delete_invoice(&self, id: &str) -> HostelResult<Invoice> {
        let invoice = finish((self.invoices.tree(), &self.invoice_numbers).transaction(|(invoices, numbers)| {
            let invoice: Invoice = match tx_take(invoices, id)? {
                Some(invoice) => invoice,
                None => return abort(not_found::<Invoice>(id)),
            };
            if let Err(e) = invoice.ensure_mutable() {
                return abort(e);
            }
            release_unique(numbers, &invoice.invoice_no)?;
            Ok(invoice)
        }))?;

        info!("Deleted invoice {}", invoice.invoice_no);
        Ok(invoice)
    }

    /// Compare-and-set transition to Paid; a second caller sees a conflict.
    pub fn mark_invoice_paid(
        &self,
        id: &str,
        method: PaymentMethod,
        reference: Option<String>,
        now: DateTime<Utc>,
    ) -> HostelResult<Invoice> {
        finish(self.invoices.tree().transaction(|invoices| {
            let mut invoice: Invoice = match tx_get(invoices, id)? {
                Some(invoice) => invoice,
                None => return abort(not_found::<Invoice>(id)),
            };
            if let Err(e) = invoice.mark_paid(method, reference.clone(), now) {
                return abort(e);
            }
            tx_put(invoices, &invoice.id, &invoice)?;
            Ok(invoice)
        }))
    }
}
