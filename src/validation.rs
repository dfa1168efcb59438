use crate::error::{FieldErrors, LedgerError, Result};
use crate::utils::parse_local_ymd;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The "Record New Transaction" form as entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub date: String,
    pub income: Option<f64>,
    pub expense: Option<f64>,
    pub description: String,
    pub person_involved: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub income: Option<f64>,
    pub expense: Option<f64>,
    pub description: String,
    pub person_involved: String,
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

impl TransactionDraft {
    /// Every failing field with its message. Empty when the draft is valid.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.date.trim().is_empty() {
            errors.insert("date", "Date is required.");
        } else if parse_local_ymd(&self.date).is_none() {
            errors.insert("date", "Date must be a valid YYYY-MM-DD date.");
        }

        if self.income.is_none() && self.expense.is_none() {
            errors.insert("income", "Either Income or Expense is required.");
            errors.insert("expense", "Either Income or Expense is required.");
        }
        if self.income.is_some_and(|v| !is_non_negative(v)) {
            errors.insert("income", "Income must be a non-negative number.");
        }
        if self.expense.is_some_and(|v| !is_non_negative(v)) {
            errors.insert("expense", "Expense must be a non-negative number.");
        }

        if self.description.trim().is_empty() {
            errors.insert("description", "Description is required.");
        }
        if self.person_involved.trim().is_empty() {
            errors.insert("personInvolved", "Person involved is required.");
        }

        errors
    }

    pub fn submit(&self) -> Result<NewTransaction> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(LedgerError::FormErrors(errors));
        }

        let date = parse_local_ymd(&self.date).ok_or_else(|| {
            LedgerError::InvalidField {
                field: "date".to_string(),
                details: format!("'{}' is not a date", self.date),
            }
        })?;

        Ok(NewTransaction {
            date,
            income: self.income,
            expense: self.expense,
            description: self.description.trim().to_string(),
            person_involved: self.person_involved.trim().to_string(),
        })
    }
}

/// The pizza-family contribution form. `amount` is the raw text input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub telephone: String,
    pub amount: String,
    pub payment_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContribution {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub telephone: String,
    pub amount: f64,
    pub payment_date: NaiveDate,
}

fn invalid(field: &str, details: &str) -> LedgerError {
    LedgerError::InvalidField {
        field: field.to_string(),
        details: details.to_string(),
    }
}

impl ContributionDraft {
    /// Checks fields in form order and reports the first problem found.
    pub fn validate(&self) -> Result<NewContribution> {
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(invalid("name", "First and last name are required."));
        }

        let telephone = self.telephone.trim();
        if telephone.is_empty() {
            return Err(invalid("telephone", "Telephone is required."));
        }

        if self.payment_date.trim().is_empty() {
            return Err(invalid("paymentDate", "Payment date is required."));
        }
        let payment_date = parse_local_ymd(&self.payment_date)
            .ok_or_else(|| invalid("paymentDate", "Payment date must be a valid date."))?;

        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or_else(|| invalid("amount", "Amount must be a positive number."))?;

        let email = Some(self.email.trim())
            .filter(|e| !e.is_empty())
            .map(str::to_string);

        Ok(NewContribution {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email,
            telephone: telephone.to_string(),
            amount,
            payment_date,
        })
    }
}
