// models/src/hostel/invoice.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{new_id, optional, positive, required};
use crate::errors::{HostelError, HostelResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Card,
    #[serde(rename = "UPI")]
    Upi,
    PayPal,
    #[default]
    Manual,
}

/// A single billing-period charge tied to a resident and room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub invoice_no: String,
    pub resident_name: String,
    pub room_number: String,
    pub amount: f64,
    pub month: String,
    pub status: InvoiceStatus,
    pub method: Option<PaymentMethod>,
    pub due_date: Option<NaiveDate>,
    pub paid_on: Option<DateTime<Utc>>,
    pub payment_ref: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    #[serde(default)]
    pub resident_name: String,
    #[serde(default)]
    pub room_number: String,
    pub amount: Option<f64>,
    #[serde(default)]
    pub month: String,
    pub status: Option<InvoiceStatus>,
    pub method: Option<PaymentMethod>,
    pub due_date: Option<NaiveDate>,
    pub paid_on: Option<DateTime<Utc>>,
    pub invoice_no: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceUpdate {
    pub resident_name: Option<String>,
    pub room_number: Option<String>,
    pub amount: Option<f64>,
    pub month: Option<String>,
    pub status: Option<InvoiceStatus>,
    pub method: Option<PaymentMethod>,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl Invoice {
    /// Builds an invoice; `invoice_no` is the caller-resolved unique number.
    pub fn from_new(new_invoice: NewInvoice, invoice_no: String, now: DateTime<Utc>) -> HostelResult<Self> {
        let mut invoice = Invoice {
            id: new_id(),
            invoice_no: required("invoiceNo", &invoice_no)?,
            resident_name: required("residentName", &new_invoice.resident_name)?,
            room_number: required("roomNumber", &new_invoice.room_number)?,
            amount: positive("amount", new_invoice.amount)?,
            month: required("month", &new_invoice.month)?,
            status: new_invoice.status.unwrap_or_default(),
            method: new_invoice.method,
            due_date: new_invoice.due_date,
            paid_on: None,
            payment_ref: None,
            notes: optional(new_invoice.notes),
            created_at: now,
        };
        if invoice.status == InvoiceStatus::Paid {
            invoice.paid_on = Some(new_invoice.paid_on.unwrap_or(now));
        }
        Ok(invoice)
    }

    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }

    /// Paid invoices are frozen against edit and delete.
    pub fn ensure_mutable(&self) -> HostelResult<()> {
        if self.is_paid() {
            return Err(HostelError::conflict(format!(
                "invoice {} is paid and can no longer be modified",
                self.invoice_no
            )));
        }
        Ok(())
    }

    pub fn mark_paid(
        &mut self,
        method: PaymentMethod,
        reference: Option<String>,
        now: DateTime<Utc>,
    ) -> HostelResult<()> {
        if self.is_paid() {
            return Err(HostelError::conflict(format!("invoice {} is already paid", self.invoice_no)));
        }
        self.status = InvoiceStatus::Paid;
        self.paid_on = Some(now);
        self.method = Some(method);
        self.payment_ref = optional(reference);
        Ok(())
    }

    pub fn apply_update(&mut self, update: InvoiceUpdate, now: DateTime<Utc>) -> HostelResult<()> {
        self.ensure_mutable()?;

        if let Some(name) = update.resident_name {
            self.resident_name = required("residentName", &name)?;
        }
        if let Some(room) = update.room_number {
            self.room_number = required("roomNumber", &room)?;
        }
        if let Some(amount) = update.amount {
            self.amount = positive("amount", Some(amount))?;
        }
        if let Some(month) = update.month {
            self.month = required("month", &month)?;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = Some(due_date);
        }
        if update.notes.is_some() {
            self.notes = optional(update.notes);
        }
        if update.method.is_some() {
            self.method = update.method;
        }
        match update.status {
            Some(InvoiceStatus::Paid) => {
                let method = self.method.unwrap_or_default();
                self.mark_paid(method, None, now)?;
            }
            Some(status) => self.status = status,
            None => {}
        }
        Ok(())
    }

    /// Read-time view: a pending invoice past its due date reports as overdue.
    pub fn evaluated(mut self, today: NaiveDate) -> Self {
        if self.status == InvoiceStatus::Pending && self.due_date.is_some_and(|due| due < today) {
            self.status = InvoiceStatus::Overdue;
        }
        self
    }
}
