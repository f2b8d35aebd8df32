// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDate;
use hub_contracts_model::{
    Column, ContractId, ContractRecord, ContractTable, FilterOptions, FilterSelection,
    FilterableColumn, ModelError,
};

fn record(id: &str, project: &str, status: &str) -> ContractRecord {
    ContractRecord {
        contract_id: ContractId::parse(id).expect("id"),
        project: project.to_string(),
        status: status.to_string(),
        supplier: "Fornecedor A".to_string(),
        contract_type: "Servico".to_string(),
        total_value: Some(100.0),
        risk_level: "Baixo".to_string(),
        esg_score: None,
        compliance_score_pct: None,
        open_pending_items: None,
        delay_days: None,
        signature_date: NaiveDate::from_ymd_opt(2023, 1, 10),
        termination_date: None,
        fee_clause: false,
        confidentiality_clause: true,
        esg_clause: false,
        critical_stakeholder: false,
    }
}

#[test]
fn duplicate_contract_ids_are_rejected() {
    let err = ContractTable::new(vec![record("C-1", "X", "Ativo"), record("C-1", "Y", "Ativo")])
        .expect_err("duplicate ids");
    assert_eq!(err, ModelError::DuplicateContractId("C-1".to_string()));
}

#[test]
fn select_copies_rows_in_source_order() {
    let table = ContractTable::new(vec![
        record("C-1", "X", "Ativo"),
        record("C-2", "Y", "Ativo"),
        record("C-3", "X", "Encerrado"),
    ])
    .expect("table");
    let subset = table.select(|r| r.project == "X");
    let ids: Vec<&str> = subset.rows().iter().map(|r| r.contract_id.as_str()).collect();
    assert_eq!(ids, vec!["C-1", "C-3"]);
    assert_eq!(table.len(), 3);
}

#[test]
fn default_selection_covers_every_distinct_value() {
    let table = ContractTable::new(vec![
        record("C-1", "X", "Ativo"),
        record("C-2", "Y", "Encerrado"),
    ])
    .expect("table");
    let options = FilterOptions::from_table(&table);
    assert_eq!(
        options.values(FilterableColumn::Project).to_vec(),
        vec!["X".to_string(), "Y".to_string()]
    );
    let selection = FilterSelection::all(&table);
    assert!(table.rows().iter().all(|r| selection.matches(r)));
    assert_eq!(
        selection
            .allowed(FilterableColumn::Status)
            .map(|s| s.iter().cloned().collect::<Vec<_>>()),
        Some(vec!["Ativo".to_string(), "Encerrado".to_string()])
    );
}

#[test]
fn record_cells_expose_typed_values() {
    let r = record("C-9", "X", "Ativo");
    assert_eq!(r.cell(Column::ContractId).to_field(), "C-9");
    assert_eq!(r.cell(Column::TotalValue).to_field(), "100");
    assert!(r.cell(Column::TerminationDate).is_missing());
    assert!(r.cell(Column::DurationDays).is_missing());
    assert_eq!(r.cell(Column::ConfidentialityClause).to_field(), "True");
}
