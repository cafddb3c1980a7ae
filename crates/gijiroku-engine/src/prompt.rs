//! Prompt construction for the summarization engine.
//!
//! The metadata block is never requested here: it is appended by the
//! pipeline after the engine responds.

pub const SYSTEM_PROMPT: &str = "あなたは会議の議事録を作成する専門家です。\
文字起こしテキストから、要約、重要なポイント、決定事項、アクションアイテムを抽出してください。";

/// Fixed-schema prompt embedding the transcript text.
pub fn summary_prompt(transcript: &str) -> String {
    format!(
        r#"以下は会議の文字起こしです。この内容を分析して、以下の形式でJSONを生成してください。

【文字起こしテキスト】
{transcript}

【出力形式】
{{
  "summary": "会議の要約（200-300文字程度）",
  "key_points": [
    "重要なポイント1",
    "重要なポイント2",
    "重要なポイント3"
  ],
  "decisions": [
    "決定事項1",
    "決定事項2"
  ],
  "action_items": [
    {{
      "task": "タスクの内容",
      "assignee": "担当者（不明な場合は null）",
      "deadline": "期限（不明な場合は null）"
    }}
  ],
  "next_steps": [
    "次のステップ1",
    "次のステップ2"
  ]
}}

注意事項:
- 日本語で出力してください
- JSONフォーマットを厳密に守ってください
- 文字起こしに含まれない情報は推測しないでください
- 該当する項目が見つからない場合は空の配列を返してください
"#
    )
}
