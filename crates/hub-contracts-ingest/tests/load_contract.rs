// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::PathBuf;

use hub_contracts_ingest::{
    read_contracts, read_contracts_with_report, DatasetCache, LoadError, LoadOutcome, LoadStage,
};
use tempfile::tempdir;

const HEADER: &str = "ID_Contrato,Projeto,Status,Fornecedor,Tipo_Contrato,Valor_Total,Risco_Contratual,Score_ESG,Compliance_Score_Percent,Pendencias_Abertas,Atraso_Dias,Data_Assinatura,Data_Termino,Clausula_Multa,Clausula_Confidencialidade,Clausula_ESG,Stakeholder_Critico";

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(path)
}

fn row(id: &str, project: &str) -> String {
    format!("{id},{project},Ativo,Fornecedor A,Servico,100,Baixo,5,50,1,0,2023-01-01,2023-01-31,True,False,True,False")
}

#[test]
fn fixture_loads_every_row_in_file_order() {
    let table = read_contracts(&fixture("tests/fixtures/contracts_small.csv")).expect("load");
    let ids: Vec<&str> = table.rows().iter().map(|r| r.contract_id.as_str()).collect();
    assert_eq!(ids, ["C-001", "C-002", "C-003", "C-004", "C-005", "C-006"]);

    let partial = &table.rows()[3];
    assert_eq!(partial.total_value, None);
    assert_eq!(partial.compliance_score_pct, None);
    assert_eq!(partial.termination_date, None);
    assert!(partial.critical_stakeholder);
}

#[test]
fn report_carries_source_hash_and_stages() {
    let path = fixture("tests/fixtures/contracts_small.csv");
    let (table, report) = read_contracts_with_report(&path).expect("load");
    let bytes = fs::read(&path).expect("read fixture");
    assert_eq!(report.source_sha256, hub_contracts_ingest::hash_bytes(&bytes));
    assert_eq!(
        hub_contracts_ingest::hash_file(&path).expect("hash file"),
        report.source_sha256
    );
    assert_eq!(report.row_count, table.len());
    let stages: Vec<LoadStage> = report.events.iter().map(|e| e.stage).collect();
    assert!(stages.contains(&LoadStage::Read));
    assert!(stages.contains(&LoadStage::Validate));
}

#[test]
fn missing_source_is_no_data_and_not_cached() {
    let dir = tempdir().expect("tmp");
    let path = dir.path().join("contracts.csv");
    let cache = DatasetCache::new();

    let outcome = cache.load(&path);
    assert!(outcome.is_empty());
    assert!(outcome.table().is_empty());
    assert!(matches!(
        outcome.error(),
        Some(LoadError::SourceUnavailable { .. })
    ));
    assert!(!cache.contains(&path));

    fs::write(&path, format!("{HEADER}\n{}\n", row("C-1", "Alpha"))).expect("write");
    match cache.load(&path) {
        LoadOutcome::Loaded(dataset) => assert_eq!(dataset.table.len(), 1),
        LoadOutcome::NoData { error } => panic!("expected data, got {error}"),
    }
}

#[test]
fn cache_reads_the_source_once_until_cleared() {
    let dir = tempdir().expect("tmp");
    let path = dir.path().join("contracts.csv");
    fs::write(&path, format!("{HEADER}\n{}\n", row("C-1", "Alpha"))).expect("write");
    let cache = DatasetCache::new();

    let first = cache.load(&path).table();
    fs::write(
        &path,
        format!("{HEADER}\n{}\n{}\n", row("C-1", "Alpha"), row("C-2", "Beta")),
    )
    .expect("rewrite");
    let second = cache.load(&path).table();
    assert_eq!(cache.source_reads(), 1);
    assert_eq!(first, second);
    assert_eq!(second.len(), 1);

    cache.clear();
    let third = cache.load(&path).table();
    assert_eq!(cache.source_reads(), 2);
    assert_eq!(third.len(), 2);
}

#[test]
fn header_only_source_loads_an_empty_table() {
    let dir = tempdir().expect("tmp");
    let path = dir.path().join("contracts.csv");
    fs::write(&path, format!("{HEADER}\n")).expect("write");
    let outcome = DatasetCache::new().load(&path);
    assert!(outcome.error().is_none());
    assert!(outcome.is_empty());
}

#[test]
fn parse_failures_surface_as_no_data() {
    let dir = tempdir().expect("tmp");
    let path = dir.path().join("contracts.csv");
    fs::write(
        &path,
        format!("{HEADER}\n{}\n", row("C-1", "Alpha").replace("2023-01-01", "01-2023-01")),
    )
    .expect("write");
    let outcome = DatasetCache::new().load(&path);
    let err = outcome.into_result().expect_err("bad date");
    assert_eq!(err.kind(), "parse_failure");
    assert!(err.to_string().contains("Data_Assinatura"), "{err}");
}

#[test]
fn concurrent_loads_share_a_single_read() {
    let dir = tempdir().expect("tmp");
    let path = dir.path().join("contracts.csv");
    fs::write(&path, format!("{HEADER}\n{}\n", row("C-1", "Alpha"))).expect("write");
    let cache = DatasetCache::new();

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                assert_eq!(cache.load(&path).table().len(), 1);
            });
        }
    });
    assert_eq!(cache.source_reads(), 1);
}
