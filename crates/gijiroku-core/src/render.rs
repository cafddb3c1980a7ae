//! Markdown rendering of a summary document.
//!
//! Heading order is fixed; sections with no entries are omitted entirely.

use crate::types::SummaryDocument;

pub fn to_markdown(doc: &SummaryDocument) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("# 議事録".to_string());
    lines.push(String::new());

    lines.push("## メタデータ".to_string());
    lines.push(format!(
        "- **生成日時**: {}",
        doc.metadata.generated_at.to_rfc3339()
    ));
    lines.push(format!(
        "- **元ファイル**: `{}`",
        doc.metadata.transcript_s3_key
    ));
    if let Some(duration) = doc.metadata.transcript_duration {
        lines.push(format!("- **会議時間**: {duration}秒"));
    }
    lines.push(String::new());

    lines.push("## 要約".to_string());
    lines.push(doc.core.summary.clone());
    lines.push(String::new());

    if !doc.core.key_points.is_empty() {
        lines.push("## 重要なポイント".to_string());
        for point in &doc.core.key_points {
            lines.push(format!("- {point}"));
        }
        lines.push(String::new());
    }

    if !doc.core.decisions.is_empty() {
        lines.push("## 決定事項".to_string());
        for decision in &doc.core.decisions {
            lines.push(format!("- {decision}"));
        }
        lines.push(String::new());
    }

    if !doc.core.action_items.is_empty() {
        lines.push("## アクションアイテム".to_string());
        for item in &doc.core.action_items {
            let assignee = item.assignee.as_deref().unwrap_or("未割当");
            let deadline = item.deadline.as_deref().unwrap_or("期限未定");
            lines.push(format!("- [ ] **{}**", item.task));
            lines.push(format!("  - 担当: {assignee}"));
            lines.push(format!("  - 期限: {deadline}"));
        }
        lines.push(String::new());
    }

    if !doc.core.next_steps.is_empty() {
        lines.push("## 次のステップ".to_string());
        for step in &doc.core.next_steps {
            lines.push(format!("- {step}"));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
