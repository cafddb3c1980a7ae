//! Human-readable completion digest for the notification sink.

use gijiroku_core::SummaryDocument;

pub const SUBJECT: &str = "議事録生成完了";

/// Short digest: summary, key points, action item tasks, and the URI of
/// the primary written artifact.
pub fn build_digest(document: &SummaryDocument, artifact_uri: &str) -> String {
    let key_points = document
        .core
        .key_points
        .iter()
        .map(|point| format!("- {point}"))
        .collect::<Vec<_>>()
        .join("\n");
    let tasks = document
        .core
        .action_items
        .iter()
        .map(|item| format!("- {}", item.task))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "議事録の生成が完了しました\n\n【要約】\n{}\n\n【重要なポイント】\n{}\n\n【アクションアイテム】\n{}\n\n【詳細】\n{}\n",
        document.core.summary, key_points, tasks, artifact_uri
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gijiroku_core::{ActionItem, SummaryCore, SummaryMetadata};

    fn make_document() -> SummaryDocument {
        SummaryDocument {
            core: SummaryCore {
                summary: "進捗と課題を確認した。".to_string(),
                key_points: vec!["予定どおり".to_string(), "リスクは軽微".to_string()],
                decisions: vec!["継続する".to_string()],
                action_items: vec![ActionItem {
                    task: "レポートを送る".to_string(),
                    assignee: None,
                    deadline: None,
                }],
                next_steps: vec![],
            },
            metadata: SummaryMetadata {
                transcript_s3_key: "transcripts/mtg.json".to_string(),
                generated_at: chrono::Utc::now(),
                transcript_length: 10,
                transcript_duration: None,
            },
        }
    }

    #[test]
    fn test_digest_contains_summary_points_tasks_and_uri() {
        let digest = build_digest(&make_document(), "file:///data/minutes/summaries/mtg.json");
        assert!(digest.contains("議事録の生成が完了しました"));
        assert!(digest.contains("進捗と課題を確認した。"));
        assert!(digest.contains("- 予定どおり"));
        assert!(digest.contains("- リスクは軽微"));
        assert!(digest.contains("- レポートを送る"));
        assert!(digest.contains("file:///data/minutes/summaries/mtg.json"));
    }

    #[test]
    fn test_digest_with_empty_categories_still_renders() {
        let mut document = make_document();
        document.core.key_points.clear();
        document.core.action_items.clear();

        let digest = build_digest(&document, "file:///x");
        assert!(digest.contains("【重要なポイント】"));
        assert!(digest.contains("【アクションアイテム】"));
    }
}
