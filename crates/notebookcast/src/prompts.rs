//! Prompt text sent to the script model.

use crate::error::{PipelineError, Result};

pub const SYSTEM_PROMPT: &str = r#"
您是一位专业的播客制作人，需要将提供的文本转换为引人入胜的播客对话。

# 输出格式要求：
1. 严格按照以下 JSON 格式输出：
{
    "scratchpad": "准备笔记（可选）",
    "name_of_guest": "专家名称",
    "dialogue": [
        {
            "speaker": "Host (Jane)",  // 或 "Guest"
            "text": "对话内容"
        }
        // ... 更多对话
    ]
}

2. speaker 必须使用 "Host (Jane)" 或 "Guest"
3. 每段对话不超过 100 个汉字
4. 对话要自然流畅，符合表达习惯

# 内容要求：
1. 将复杂概念转化为通俗易懂的解释
2. 多使用生动的比喻和例子
3. 适当加入口语化表达，增加亲和力
4. 保持内容的专业性和准确性
5. 循序渐进地展开话题

请确保输出的 JSON 格式完全符合要求。
"#;

pub const QUESTION_MODIFIER: &str = "请回答以下问题：";
pub const TONE_MODIFIER: &str = "语气要求：";
pub const LANGUAGE_MODIFIER: &str = "输出语言：";

/// Length labels and the instruction each one appends
pub const LENGTH_MODIFIERS: [(&str, &str); 3] = [
    ("短篇 (1-2分钟)", "保持简短，约1-2分钟。"),
    ("中篇 (3-5分钟)", "适中长度，约3-5分钟。"),
    ("Short (1-2 min)", "Keep it short, about 1-2 minutes."),
];

/// Refinement pass: asks the model to polish its own draft.
pub const REFINEMENT_USER_MESSAGE: &str = "请优化对话内容";

pub fn length_modifier(label: &str) -> Option<&'static str> {
    LENGTH_MODIFIERS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, modifier)| *modifier)
}

/// The user-facing options that shape the system prompt
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptOptions<'a> {
    pub question: Option<&'a str>,
    pub tone: Option<&'a str>,
    pub length: Option<&'a str>,
    pub language: Option<&'a str>,
}

/// Append the question, tone, length and language modifiers that are set.
///
/// Blank strings count as unset. An unrecognized length label is an error.
pub fn build_system_prompt(options: &PromptOptions<'_>) -> Result<String> {
    let mut prompt = SYSTEM_PROMPT.to_string();

    if let Some(question) = non_blank(options.question) {
        prompt.push_str(&format!("\n\n{QUESTION_MODIFIER} {question}"));
    }
    if let Some(tone) = non_blank(options.tone) {
        prompt.push_str(&format!("\n\n{TONE_MODIFIER} {tone}."));
    }
    if let Some(length) = non_blank(options.length) {
        let modifier =
            length_modifier(length).ok_or_else(|| PipelineError::UnknownLength(length.into()))?;
        prompt.push_str(&format!("\n\n{modifier}"));
    }
    if let Some(language) = non_blank(options.language) {
        prompt.push_str(&format!("\n\n{LANGUAGE_MODIFIER} {language}."));
    }

    Ok(prompt)
}

/// System prompt for the refinement pass, embedding the draft as JSON.
pub fn refinement_prompt(system_prompt: &str, draft_json: &str) -> String {
    format!("{system_prompt}\n\n这是第一版对话:\n\n{draft_json}\n\n请改进对话，使其更自然流畅。")
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
