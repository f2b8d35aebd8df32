// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;
use crate::selection::FilterableColumn;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct ContractId(String);

impl ContractId {
    pub fn parse(input: &str) -> Result<Self, ModelError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ModelError::InvalidContractId {
                value: input.to_string(),
                reason: "contract id must not be empty",
            });
        }
        Ok(Self(s.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ContractId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Columns of the contract dataset, in file order, plus the derived duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    ContractId,
    Project,
    Status,
    Supplier,
    ContractType,
    TotalValue,
    RiskLevel,
    EsgScore,
    ComplianceScorePct,
    OpenPendingItems,
    DelayDays,
    SignatureDate,
    TerminationDate,
    FeeClause,
    ConfidentialityClause,
    EsgClause,
    CriticalStakeholder,
    DurationDays,
}

impl Column {
    /// Columns a source file must carry.
    pub const SOURCE: [Column; 17] = [
        Column::ContractId,
        Column::Project,
        Column::Status,
        Column::Supplier,
        Column::ContractType,
        Column::TotalValue,
        Column::RiskLevel,
        Column::EsgScore,
        Column::ComplianceScorePct,
        Column::OpenPendingItems,
        Column::DelayDays,
        Column::SignatureDate,
        Column::TerminationDate,
        Column::FeeClause,
        Column::ConfidentialityClause,
        Column::EsgClause,
        Column::CriticalStakeholder,
    ];

    /// Columns written by an export: the source set followed by the duration.
    pub const EXPORT: [Column; 18] = [
        Column::ContractId,
        Column::Project,
        Column::Status,
        Column::Supplier,
        Column::ContractType,
        Column::TotalValue,
        Column::RiskLevel,
        Column::EsgScore,
        Column::ComplianceScorePct,
        Column::OpenPendingItems,
        Column::DelayDays,
        Column::SignatureDate,
        Column::TerminationDate,
        Column::FeeClause,
        Column::ConfidentialityClause,
        Column::EsgClause,
        Column::CriticalStakeholder,
        Column::DurationDays,
    ];

    /// Header name in the delimited file.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::ContractId => "ID_Contrato",
            Self::Project => "Projeto",
            Self::Status => "Status",
            Self::Supplier => "Fornecedor",
            Self::ContractType => "Tipo_Contrato",
            Self::TotalValue => "Valor_Total",
            Self::RiskLevel => "Risco_Contratual",
            Self::EsgScore => "Score_ESG",
            Self::ComplianceScorePct => "Compliance_Score_Percent",
            Self::OpenPendingItems => "Pendencias_Abertas",
            Self::DelayDays => "Atraso_Dias",
            Self::SignatureDate => "Data_Assinatura",
            Self::TerminationDate => "Data_Termino",
            Self::FeeClause => "Clausula_Multa",
            Self::ConfidentialityClause => "Clausula_Confidencialidade",
            Self::EsgClause => "Clausula_ESG",
            Self::CriticalStakeholder => "Stakeholder_Critico",
            Self::DurationDays => "Duracao_Dias",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ContractId => "contract_id",
            Self::Project => "project",
            Self::Status => "status",
            Self::Supplier => "supplier",
            Self::ContractType => "contract_type",
            Self::TotalValue => "total_value",
            Self::RiskLevel => "risk_level",
            Self::EsgScore => "esg_score",
            Self::ComplianceScorePct => "compliance_score_pct",
            Self::OpenPendingItems => "open_pending_items",
            Self::DelayDays => "delay_days",
            Self::SignatureDate => "signature_date",
            Self::TerminationDate => "termination_date",
            Self::FeeClause => "fee_clause",
            Self::ConfidentialityClause => "confidentiality_clause",
            Self::EsgClause => "esg_clause",
            Self::CriticalStakeholder => "critical_stakeholder",
            Self::DurationDays => "duration_days",
        }
    }

    #[must_use]
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim();
        Self::EXPORT.into_iter().find(|c| c.header() == header)
    }

    #[must_use]
    pub fn filterable(self) -> Option<FilterableColumn> {
        FilterableColumn::ALL
            .into_iter()
            .find(|c| c.column() == self)
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = ModelError;

    /// Accepts the snake-case name (any case) or the exact file header.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::EXPORT
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted) || c.header() == wanted)
            .ok_or_else(|| ModelError::UnknownColumn(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseFlag {
    Fee,
    Confidentiality,
    Esg,
}

impl ClauseFlag {
    pub const ALL: [ClauseFlag; 3] = [ClauseFlag::Fee, ClauseFlag::Confidentiality, ClauseFlag::Esg];

    #[must_use]
    pub const fn column(self) -> Column {
        match self {
            Self::Fee => Column::FeeClause,
            Self::Confidentiality => Column::ConfidentialityClause,
            Self::Esg => Column::EsgClause,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    pub contract_id: ContractId,
    pub project: String,
    pub status: String,
    pub supplier: String,
    pub contract_type: String,
    pub total_value: Option<f64>,
    pub risk_level: String,
    pub esg_score: Option<f64>,
    pub compliance_score_pct: Option<f64>,
    pub open_pending_items: Option<u64>,
    pub delay_days: Option<i64>,
    pub signature_date: Option<NaiveDate>,
    pub termination_date: Option<NaiveDate>,
    pub fee_clause: bool,
    pub confidentiality_clause: bool,
    pub esg_clause: bool,
    pub critical_stakeholder: bool,
}

impl ContractRecord {
    #[must_use]
    pub fn category(&self, column: FilterableColumn) -> &str {
        match column {
            FilterableColumn::Project => &self.project,
            FilterableColumn::Status => &self.status,
            FilterableColumn::Supplier => &self.supplier,
            FilterableColumn::ContractType => &self.contract_type,
            FilterableColumn::RiskLevel => &self.risk_level,
        }
    }

    #[must_use]
    pub fn clause(&self, flag: ClauseFlag) -> bool {
        match flag {
            ClauseFlag::Fee => self.fee_clause,
            ClauseFlag::Confidentiality => self.confidentiality_clause,
            ClauseFlag::Esg => self.esg_clause,
        }
    }

    /// Source cell for `column`; the derived duration is always missing here.
    #[must_use]
    pub fn cell(&self, column: Column) -> CellValue<'_> {
        match column {
            Column::ContractId => CellValue::Text(self.contract_id.as_str()),
            Column::Project => CellValue::Text(&self.project),
            Column::Status => CellValue::Text(&self.status),
            Column::Supplier => CellValue::Text(&self.supplier),
            Column::ContractType => CellValue::Text(&self.contract_type),
            Column::TotalValue => CellValue::from_decimal(self.total_value),
            Column::RiskLevel => CellValue::Text(&self.risk_level),
            Column::EsgScore => CellValue::from_decimal(self.esg_score),
            Column::ComplianceScorePct => CellValue::from_decimal(self.compliance_score_pct),
            Column::OpenPendingItems => self
                .open_pending_items
                .map_or(CellValue::Missing, |v| CellValue::Integer(v as i64)),
            Column::DelayDays => self.delay_days.map_or(CellValue::Missing, CellValue::Integer),
            Column::SignatureDate => self.signature_date.map_or(CellValue::Missing, CellValue::Date),
            Column::TerminationDate => {
                self.termination_date.map_or(CellValue::Missing, CellValue::Date)
            }
            Column::FeeClause => CellValue::Flag(self.fee_clause),
            Column::ConfidentialityClause => CellValue::Flag(self.confidentiality_clause),
            Column::EsgClause => CellValue::Flag(self.esg_clause),
            Column::CriticalStakeholder => CellValue::Flag(self.critical_stakeholder),
            Column::DurationDays => CellValue::Missing,
        }
    }
}

/// Borrowed, typed view of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Text(&'a str),
    Decimal(f64),
    Integer(i64),
    Flag(bool),
    Date(NaiveDate),
    Missing,
}

impl CellValue<'_> {
    #[must_use]
    pub fn from_decimal(value: Option<f64>) -> Self {
        value.map_or(CellValue::Missing, CellValue::Decimal)
    }

    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Ordering between two present cells of the same column.
    #[must_use]
    pub fn compare(&self, other: &CellValue<'_>) -> Ordering {
        match (self, other) {
            (Self::Text(a), CellValue::Text(b)) => a.cmp(b),
            (Self::Decimal(a), CellValue::Decimal(b)) => a.total_cmp(b),
            (Self::Integer(a), CellValue::Integer(b)) => a.cmp(b),
            (Self::Flag(a), CellValue::Flag(b)) => a.cmp(b),
            (Self::Date(a), CellValue::Date(b)) => a.cmp(b),
            (Self::Missing, CellValue::Missing) => Ordering::Equal,
            (Self::Missing, _) => Ordering::Greater,
            (_, CellValue::Missing) => Ordering::Less,
            _ => Ordering::Equal,
        }
    }

    /// Text form used in delimited output; missing cells are empty.
    #[must_use]
    pub fn to_field(&self) -> String {
        match self {
            Self::Text(s) => (*s).to_string(),
            Self::Decimal(v) => v.to_string(),
            Self::Integer(v) => v.to_string(),
            Self::Flag(true) => "True".to_string(),
            Self::Flag(false) => "False".to_string(),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::Missing => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CellValue, Column, ContractId};
    use chrono::NaiveDate;
    use std::cmp::Ordering;

    #[test]
    fn headers_round_trip_through_lookup() {
        for column in Column::EXPORT {
            assert_eq!(Column::from_header(column.header()), Some(column));
            assert_eq!(column.name().parse::<Column>().expect("by name"), column);
        }
        assert!("Valor".parse::<Column>().is_err());
    }

    #[test]
    fn contract_id_is_trimmed_and_non_empty() {
        assert_eq!(ContractId::parse(" C-1 ").expect("id").as_str(), "C-1");
        assert!(ContractId::parse("   ").is_err());
    }

    #[test]
    fn long_contract_ids_are_accepted_verbatim() {
        let long = "C".repeat(300);
        assert_eq!(ContractId::parse(&long).expect("long id").as_str(), long);
    }

    #[test]
    fn missing_cells_order_after_present_ones() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 10).expect("date");
        assert_eq!(
            CellValue::Missing.compare(&CellValue::Date(date)),
            Ordering::Greater
        );
        assert_eq!(CellValue::Flag(true).to_field(), "True");
        assert_eq!(CellValue::Date(date).to_field(), "2023-01-10");
    }
}
