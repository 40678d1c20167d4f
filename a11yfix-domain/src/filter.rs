use a11yfix_types::finding::Finding;

/// Restrict findings to the enabled rule ids.
///
/// A non-empty `include` keeps only its members; `exclude` is applied afterwards, so an id in
/// both lists is dropped. Ids that match no finding have no effect. Order is preserved.
pub fn filter_findings(findings: &[Finding], include: &[String], exclude: &[String]) -> Vec<Finding> {
    findings
        .iter()
        .filter(|f| include.is_empty() || include.iter().any(|i| *i == f.id))
        .filter(|f| !exclude.iter().any(|e| *e == f.id))
        .cloned()
        .collect()
}
