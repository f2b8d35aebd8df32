// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::io::Read;

use hub_contracts_model::{Column, ContractId, ContractRecord, ContractTable, ModelError};

use crate::cells::{parse_count, parse_date, parse_decimal, parse_flag, parse_integer};
use crate::LoadError;

const HEADER_LINE: u64 = 1;

/// Column positions resolved from the header row.
struct HeaderIndex {
    positions: BTreeMap<Column, usize>,
}

impl HeaderIndex {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let mut positions = BTreeMap::new();
        for (idx, raw) in headers.iter().enumerate() {
            let name = raw.trim_start_matches('\u{feff}');
            if let Some(column) = Column::from_header(name) {
                if positions.insert(column, idx).is_some() {
                    return Err(LoadError::parse(
                        HEADER_LINE,
                        Some(column.header()),
                        "column appears more than once",
                    ));
                }
            }
        }
        if let Some(missing) = Column::SOURCE
            .into_iter()
            .find(|c| !positions.contains_key(c))
        {
            return Err(LoadError::parse(
                HEADER_LINE,
                Some(missing.header()),
                "missing required column",
            ));
        }
        Ok(Self { positions })
    }

    fn cell<'r>(&self, record: &'r csv::StringRecord, column: Column) -> &'r str {
        self.positions
            .get(&column)
            .and_then(|idx| record.get(*idx))
            .unwrap_or("")
    }
}

fn csv_failure(err: &csv::Error) -> LoadError {
    let line = err.position().map_or(0, csv::Position::line);
    LoadError::parse(line, None, err.to_string())
}

/// Parses delimited contract text into a table.
pub fn decode_contracts<R: Read>(input: R) -> Result<ContractTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);
    let headers = reader.headers().map_err(|e| csv_failure(&e))?.clone();
    let index = HeaderIndex::resolve(&headers)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_failure(&e))?;
        let line = record.position().map_or(0, csv::Position::line);
        rows.push(decode_row(&index, &record, line)?);
    }

    ContractTable::new(rows).map_err(|err| match err {
        ModelError::DuplicateContractId(id) => LoadError::parse(
            0,
            Some(Column::ContractId.header()),
            format!("duplicate contract id `{id}`"),
        ),
        other => LoadError::parse(0, None, other.to_string()),
    })
}

fn decode_row(
    index: &HeaderIndex,
    record: &csv::StringRecord,
    line: u64,
) -> Result<ContractRecord, LoadError> {
    let text = |column: Column| index.cell(record, column).to_string();
    let typed = |column: Column, err: String| LoadError::parse(line, Some(column.header()), err);

    let contract_id = ContractId::parse(index.cell(record, Column::ContractId))
        .map_err(|e| typed(Column::ContractId, e.to_string()))?;

    let decimal = |column: Column| parse_decimal(index.cell(record, column)).map_err(|e| typed(column, e));
    let flag = |column: Column| parse_flag(index.cell(record, column)).map_err(|e| typed(column, e));
    let date = |column: Column| parse_date(index.cell(record, column)).map_err(|e| typed(column, e));

    Ok(ContractRecord {
        contract_id,
        project: text(Column::Project),
        status: text(Column::Status),
        supplier: text(Column::Supplier),
        contract_type: text(Column::ContractType),
        total_value: decimal(Column::TotalValue)?,
        risk_level: text(Column::RiskLevel),
        esg_score: decimal(Column::EsgScore)?,
        compliance_score_pct: decimal(Column::ComplianceScorePct)?,
        open_pending_items: parse_count(index.cell(record, Column::OpenPendingItems))
            .map_err(|e| typed(Column::OpenPendingItems, e))?,
        delay_days: parse_integer(index.cell(record, Column::DelayDays))
            .map_err(|e| typed(Column::DelayDays, e))?,
        signature_date: date(Column::SignatureDate)?,
        termination_date: date(Column::TerminationDate)?,
        fee_clause: flag(Column::FeeClause)?,
        confidentiality_clause: flag(Column::ConfidentialityClause)?,
        esg_clause: flag(Column::EsgClause)?,
        critical_stakeholder: flag(Column::CriticalStakeholder)?,
    })
}

#[cfg(test)]
mod tests {
    use super::decode_contracts;
    use crate::LoadError;

    const HEADER: &str = "ID_Contrato,Projeto,Status,Fornecedor,Tipo_Contrato,Valor_Total,Risco_Contratual,Score_ESG,Compliance_Score_Percent,Pendencias_Abertas,Atraso_Dias,Data_Assinatura,Data_Termino,Clausula_Multa,Clausula_Confidencialidade,Clausula_ESG,Stakeholder_Critico";

    #[test]
    fn decodes_rows_and_ignores_extra_columns() {
        let text = format!(
            "{HEADER},Observacao\nC-1, Alpha ,Ativo,Fornecedor A,Servico,1000.5,Baixo,7.5,92,2,0,2023-01-10,2023-02-09,True,False,True,False,ok\n"
        );
        let table = decode_contracts(text.as_bytes()).expect("decode");
        assert_eq!(table.len(), 1);
        let row = &table.rows()[0];
        assert_eq!(row.project, "Alpha");
        assert_eq!(row.total_value, Some(1000.5));
        assert_eq!(row.open_pending_items, Some(2));
        assert!(row.fee_clause && !row.confidentiality_clause && row.esg_clause);
    }

    #[test]
    fn missing_required_column_names_the_column() {
        let text = "ID_Contrato,Projeto\nC-1,Alpha\n";
        let err = decode_contracts(text.as_bytes()).expect_err("missing columns");
        match err {
            LoadError::ParseFailure { line, column, .. } => {
                assert_eq!(line, 1);
                assert_eq!(column.as_deref(), Some("Status"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unparsable_date_reports_line_and_column() {
        let text = format!(
            "{HEADER}\nC-1,Alpha,Ativo,F,Servico,1,Baixo,1,1,0,0,2023-01-10,2023-02-09,True,False,True,False\nC-2,Alpha,Ativo,F,Servico,1,Baixo,1,1,0,0,ontem,,True,False,True,False\n"
        );
        let err = decode_contracts(text.as_bytes()).expect_err("bad date");
        assert_eq!(err.kind(), "parse_failure");
        let message = err.to_string();
        assert!(message.contains("line 3"), "{message}");
        assert!(message.contains("Data_Assinatura"), "{message}");
    }

    #[test]
    fn duplicate_contract_ids_fail_the_load() {
        let text = format!(
            "{HEADER}\nC-1,Alpha,Ativo,F,Servico,1,Baixo,1,1,0,0,,,True,False,True,False\nC-1,Beta,Ativo,F,Servico,1,Baixo,1,1,0,0,,,True,False,True,False\n"
        );
        let err = decode_contracts(text.as_bytes()).expect_err("duplicate");
        assert!(err.to_string().contains("duplicate contract id `C-1`"));
    }

    #[test]
    fn long_contract_ids_still_load() {
        let id = "C".repeat(300);
        let text = format!(
            "{HEADER}\n{id},Alpha,Ativo,F,Servico,1,Baixo,1,1,0,0,,,True,False,True,False\n"
        );
        let table = decode_contracts(text.as_bytes()).expect("long id loads");
        assert_eq!(table.rows()[0].contract_id.as_str(), id);
    }
}
