//! SARIF 2.1.0 report.
//!
//! Rule ids are fixed: `syntax-error`, `semantic-error`,
//! `validation-warning`, `validation-hint`.

use serde_json::{json, Value};

use super::ReportError;
use crate::core::diagnostics::Severity;
use crate::model::Document;

const SCHEMA: &str = "https://json.schemastore.org/sarif-2.1.0.json";

const RULES: [(&str, &str); 4] = [
    ("syntax-error", "Lexical or syntactic error"),
    ("semantic-error", "Semantic validation error"),
    ("validation-warning", "Semantic validation warning"),
    ("validation-hint", "Semantic validation hint"),
];

fn level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info | Severity::Hint => "note",
    }
}

fn rule_id(code: Option<&'static str>, severity: Severity) -> &'static str {
    if let Some(code) = code {
        return code;
    }
    match severity {
        Severity::Error => "semantic-error",
        Severity::Warning => "validation-warning",
        Severity::Info | Severity::Hint => "validation-hint",
    }
}

/// Build a SARIF log for a set of documents.
pub fn sarif_report<'a>(
    documents: impl IntoIterator<Item = &'a Document>,
) -> Result<Value, ReportError> {
    let mut results = Vec::new();
    for document in documents {
        for diagnostic in &document.diagnostics {
            results.push(json!({
                "ruleId": rule_id(diagnostic.code, diagnostic.severity),
                "level": level(diagnostic.severity),
                "message": { "text": diagnostic.message },
                "locations": [{
                    "physicalLocation": {
                        "artifactLocation": { "uri": document.uri },
                        "region": {
                            "startLine": diagnostic.range.start.line + 1,
                            "startColumn": diagnostic.range.start.column + 1,
                            "endLine": diagnostic.range.end.line + 1,
                            "endColumn": diagnostic.range.end.column + 1,
                        }
                    }
                }]
            }));
        }
    }

    let rules: Vec<Value> = RULES
        .iter()
        .map(|(id, description)| {
            json!({
                "id": id,
                "shortDescription": { "text": description }
            })
        })
        .collect();

    Ok(json!({
        "$schema": SCHEMA,
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "sysmlc",
                    "version": env!("CARGO_PKG_VERSION"),
                    "rules": rules,
                }
            },
            "results": results,
        }]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::analyze_named;

    #[test]
    fn test_sarif_skeleton() {
        let doc = analyze_named("m.sysml", "part def A :> A;");
        let sarif = sarif_report([&doc]).unwrap();

        assert_eq!(sarif["version"], "2.1.0");
        let results = sarif["runs"][0]["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["ruleId"], "semantic-error");
        assert_eq!(results[0]["level"], "error");
        let region = &results[0]["locations"][0]["physicalLocation"]["region"];
        assert!(region["startLine"].as_u64().unwrap() >= 1);
    }

    #[test]
    fn test_sarif_rules_listed() {
        let doc = analyze_named("m.sysml", "package P;");
        let sarif = sarif_report([&doc]).unwrap();
        let rules = sarif["runs"][0]["tool"]["driver"]["rules"].as_array().unwrap();
        let ids: Vec<&str> = rules.iter().filter_map(|r| r["id"].as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "syntax-error",
                "semantic-error",
                "validation-warning",
                "validation-hint"
            ]
        );
    }
}
