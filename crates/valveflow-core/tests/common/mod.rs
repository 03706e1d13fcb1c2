use std::path::PathBuf;

use serde_json::{json, Value};
use tempfile::TempDir;

/// A small export covering a direct-signal order, a history-only order, a
/// split portion, a packaging order and one on an assembly line.
pub fn sample_export() -> Value {
    json!([
        {
            "_id": "SO-1001",
            "totalQty": 50,
            "executedQty": 0,
            "qtyPending": 50,
            "currentStage": "Semi QC",
            "stage_progress": { "Planning": "ok", "Material Issue": "ok", "Semi QC": "in progress" },
            "workflowHistory": [
                { "stage": "semi-qc", "enteredAt": "2024-01-03T00:00:00Z" }
            ]
        },
        {
            "_id": "SO-1002",
            "totalQty": 100,
            "executedQty": 0,
            "qtyPending": 100,
            "currentStage": "assembly",
            "urgent": true,
            "workflowHistory": [
                { "stage": "phosphating", "enteredAt": "2024-01-01T00:00:00Z", "exitedAt": "2024-01-02T00:00:00Z", "qtyProcessed": 100 },
                { "stage": "assembly", "enteredAt": "2024-01-02T00:00:00Z" }
            ]
        },
        {
            "_id": "SO-1003",
            "split_id": "SO-1003-B",
            "totalQty": 30,
            "executedQty": 10,
            "qtyPending": 20,
            "currentStage": "pdi2"
        },
        {
            "_id": "SO-1004",
            "totalQty": 5,
            "qtyPending": 5,
            "currentStage": "packaging"
        },
        {
            "_id": "SO-1005",
            "totalQty": 12,
            "qtyPending": 12,
            "currentStage": "assembly-b"
        }
    ])
}

/// Writes `export` to a fresh temporary directory and returns its path.
pub fn write_export(export: &Value) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("orders.json");
    std::fs::write(&path, export.to_string()).expect("Failed to write export");
    (temp_dir, path)
}
