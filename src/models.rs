// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
    Savings,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
            TxKind::Savings => "savings",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            "savings" => Ok(TxKind::Savings),
            other => Err(LedgerError::invalid(format!(
                "Unknown transaction kind '{}' (use income|expense|savings)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    None,
    Weekly,
    Biweekly,
    Semimonthly,
    Monthly,
    Yearly,
}

impl Cadence {
    pub const ALL: [Cadence; 6] = [
        Cadence::None,
        Cadence::Weekly,
        Cadence::Biweekly,
        Cadence::Semimonthly,
        Cadence::Monthly,
        Cadence::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Cadence::None => "none",
            Cadence::Weekly => "weekly",
            Cadence::Biweekly => "biweekly",
            Cadence::Semimonthly => "semimonthly",
            Cadence::Monthly => "monthly",
            Cadence::Yearly => "yearly",
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, Cadence::None)
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cadence {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Cadence::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| {
                LedgerError::invalid(format!(
                    "Unknown cadence '{}' (use none|weekly|biweekly|semimonthly|monthly|yearly)",
                    s.trim()
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Checking,
    Savings,
    Tfsa,
    Fhsa,
    Rrsp,
    LabourFund,
    Investment,
    CreditCard,
    LineOfCredit,
    HomeEquityLine,
    Loan,
    Mortgage,
    CarLease,
}

impl AccountType {
    pub const ALL: [AccountType; 13] = [
        AccountType::Checking,
        AccountType::Savings,
        AccountType::Tfsa,
        AccountType::Fhsa,
        AccountType::Rrsp,
        AccountType::LabourFund,
        AccountType::Investment,
        AccountType::CreditCard,
        AccountType::LineOfCredit,
        AccountType::HomeEquityLine,
        AccountType::Loan,
        AccountType::Mortgage,
        AccountType::CarLease,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "checking",
            AccountType::Savings => "savings",
            AccountType::Tfsa => "tfsa",
            AccountType::Fhsa => "fhsa",
            AccountType::Rrsp => "rrsp",
            AccountType::LabourFund => "labour_fund",
            AccountType::Investment => "investment",
            AccountType::CreditCard => "credit_card",
            AccountType::LineOfCredit => "line_of_credit",
            AccountType::HomeEquityLine => "home_equity_line",
            AccountType::Loan => "loan",
            AccountType::Mortgage => "mortgage",
            AccountType::CarLease => "car_lease",
        }
    }

    /// Debt-bearing accounts; their balance is an amount owed.
    pub fn is_liability(&self) -> bool {
        matches!(
            self,
            AccountType::CreditCard
                | AccountType::LineOfCredit
                | AccountType::HomeEquityLine
                | AccountType::Loan
                | AccountType::Mortgage
                | AccountType::CarLease
        )
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        AccountType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| LedgerError::invalid(format!("Unknown account type '{}'", s.trim())))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub r#type: AccountType,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub kind: TxKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: i64,
    pub name: String,
    pub category_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub r#type: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub target_date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub description: String,
    pub amount: Decimal, // magnitude; direction comes from `kind`
    pub kind: TxKind,
    pub category: String,
    pub subcategory: Option<String>,
    pub cadence: Cadence,
    pub date: NaiveDate,
    pub account_id: Option<i64>,
    #[serde(default)]
    pub series_id: Option<String>,
}

/// A transaction payload that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub description: String,
    pub amount: Decimal,
    pub kind: TxKind,
    pub category: String,
    pub subcategory: Option<String>,
    pub cadence: Cadence,
    pub date: NaiveDate,
    pub account_id: Option<i64>,
    pub series_id: Option<String>,
}

impl NewTransaction {
    pub fn with_id(self, id: i64) -> Transaction {
        Transaction {
            id,
            description: self.description,
            amount: self.amount,
            kind: self.kind,
            category: self.category,
            subcategory: self.subcategory,
            cadence: self.cadence,
            date: self.date,
            account_id: self.account_id,
            series_id: self.series_id,
        }
    }
}

impl Transaction {
    pub fn template(&self) -> TransactionTemplate {
        TransactionTemplate {
            description: self.description.clone(),
            amount: self.amount,
            kind: self.kind,
            category: self.category.clone(),
            subcategory: self.subcategory.clone(),
            account_id: self.account_id,
        }
    }
}

/// The date-independent part of a transaction, from which recurring
/// occurrences are stamped out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionTemplate {
    pub description: String,
    pub amount: Decimal,
    pub kind: TxKind,
    pub category: String,
    pub subcategory: Option<String>,
    pub account_id: Option<i64>,
}

impl TransactionTemplate {
    pub fn instantiate(
        &self,
        cadence: Cadence,
        date: NaiveDate,
        series_id: Option<String>,
    ) -> NewTransaction {
        NewTransaction {
            description: self.description.clone(),
            amount: self.amount,
            kind: self.kind,
            category: self.category.clone(),
            subcategory: self.subcategory.clone(),
            cadence,
            date,
            account_id: self.account_id,
            series_id,
        }
    }
}

/// Read-side selection over stored transactions. Every bound is inclusive.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub kind: Option<TxKind>,
    pub category: Option<String>,
    pub account_id: Option<i64>,
}
