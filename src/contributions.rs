//! Pizza-family fundraiser: grouping flat contribution records into families.

use crate::schema::{coerce_amount, lenient_amount};
use crate::utils::parse_local_ymd;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Only the most recent payments are listed per family.
pub const MAX_LISTED_PAYMENTS: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PizzaContribution {
    pub id: i64,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub telephone: String,
    #[serde(default, deserialize_with = "amount_or_zero")]
    pub amount: f64,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub payment_date: String,
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn amount_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_amount(lenient_amount(deserializer)?))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyPayment {
    pub amount: f64,
    pub payment_date: String,
}

impl FamilyPayment {
    pub fn date(&self) -> Option<NaiveDate> {
        parse_local_ymd(&self.payment_date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyRow {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub telephone: String,
    /// Newest first, at most [`MAX_LISTED_PAYMENTS`].
    pub payments: Vec<FamilyPayment>,
}

impl FamilyRow {
    pub fn listed_total(&self) -> f64 {
        self.payments.iter().map(|p| p.amount).sum()
    }

    fn sort_value(&self, key: FamilySortKey) -> String {
        match key {
            FamilySortKey::FirstName => &self.first_name,
            FamilySortKey::LastName => &self.last_name,
            FamilySortKey::Email => &self.email,
            FamilySortKey::Telephone => &self.telephone,
        }
        .to_lowercase()
    }

    fn search_text(&self) -> String {
        [
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
            self.telephone.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }
}

/// Identity of a family: name, email and telephone, trimmed and case-folded.
pub fn family_key(contribution: &PizzaContribution) -> String {
    [
        contribution.first_name.as_str(),
        contribution.last_name.as_str(),
        contribution.email.as_deref().unwrap_or(""),
        contribution.telephone.as_str(),
    ]
    .iter()
    .map(|part| part.trim().to_lowercase())
    .collect::<Vec<_>>()
    .join("|")
}

/// One row per family in first-seen order. Display fields come from the
/// family's first record.
pub fn group_families(contributions: &[PizzaContribution]) -> Vec<FamilyRow> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<FamilyRow> = Vec::new();

    for c in contributions {
        let slot = *index.entry(family_key(c)).or_insert_with(|| {
            rows.push(FamilyRow {
                first_name: c.first_name.clone(),
                last_name: c.last_name.clone(),
                email: c.email.clone().unwrap_or_default(),
                telephone: c.telephone.clone(),
                payments: Vec::new(),
            });
            rows.len() - 1
        });

        rows[slot].payments.push(FamilyPayment {
            amount: c.amount,
            payment_date: c.payment_date.clone(),
        });
    }

    for row in &mut rows {
        // Option orders None first, so reversing puts undated payments last.
        row.payments.sort_by(|a, b| b.date().cmp(&a.date()));
        row.payments.truncate(MAX_LISTED_PAYMENTS);
    }

    rows
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FamilySortKey {
    FirstName,
    #[default]
    LastName,
    Email,
    Telephone,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyQuery {
    pub search: String,
    pub sort_key: FamilySortKey,
    pub direction: SortDirection,
}

impl FamilyQuery {
    /// Clicking the active column flips direction; another column sorts ascending.
    pub fn toggle_sort(&mut self, key: FamilySortKey) {
        if self.sort_key == key {
            self.direction = match self.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
        } else {
            self.sort_key = key;
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn apply(&self, rows: &[FamilyRow]) -> Vec<FamilyRow> {
        let needle = self.search.trim().to_lowercase();

        let mut view: Vec<FamilyRow> = rows
            .iter()
            .filter(|row| needle.is_empty() || row.search_text().contains(&needle))
            .cloned()
            .collect();

        view.sort_by(|a, b| {
            let primary = a.sort_value(self.sort_key).cmp(&b.sort_value(self.sort_key));
            let primary = match self.direction {
                SortDirection::Ascending => primary,
                SortDirection::Descending => primary.reverse(),
            };

            primary
                .then_with(|| a.last_name.to_lowercase().cmp(&b.last_name.to_lowercase()))
                .then_with(|| a.first_name.to_lowercase().cmp(&b.first_name.to_lowercase()))
        });

        view
    }
}

pub fn contributions_for_telephone<'a>(
    contributions: &'a [PizzaContribution],
    telephone: &str,
) -> Vec<&'a PizzaContribution> {
    let telephone = telephone.trim();
    contributions
        .iter()
        .filter(|c| c.telephone.trim() == telephone)
        .collect()
}

pub fn total_amount<'a>(contributions: impl IntoIterator<Item = &'a PizzaContribution>) -> f64 {
    contributions.into_iter().map(|c| c.amount).sum()
}

/// Suggested number for the next recorded payment, capped at the fourth.
pub fn next_payment_number(existing: usize) -> usize {
    (existing + 1).min(MAX_LISTED_PAYMENTS)
}

pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 100, n % 10) {
        (11..=13, _) => "th",
        (_, 1) => "st",
        (_, 2) => "nd",
        (_, 3) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}
