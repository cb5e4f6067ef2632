use crate::core::markdown::{Block, Inline};
use crate::domain::model::LearningPlan;

const BOLD: &str = "\x1b[1m";
const ITALIC: &str = "\x1b[3m";
const RESET: &str = "\x1b[0m";

pub fn format_inline(spans: &[Inline]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Inline::Text(t) => out.push_str(t),
            Inline::Strong(t) => {
                out.push_str(BOLD);
                out.push_str(t);
                out.push_str(RESET);
            }
            Inline::Em(t) => {
                out.push_str(ITALIC);
                out.push_str(t);
                out.push_str(RESET);
            }
        }
    }
    out
}

/// 把區塊樹排成終端文字。標題加粗、清單加圓點、段落原樣
pub fn format_document(blocks: &[Block]) -> String {
    let mut lines: Vec<String> = Vec::new();
    for block in blocks {
        match block {
            Block::Heading { level, spans } => {
                if !lines.is_empty() {
                    lines.push(String::new());
                }
                let indent = "#".repeat(*level as usize);
                lines.push(format!("{}{} {}{}", BOLD, indent, format_inline(spans), RESET));
            }
            Block::List { items } => {
                for item in items {
                    lines.push(format!("  • {}", format_inline(item)));
                }
            }
            Block::Paragraph { spans } => {
                if !lines.is_empty() {
                    lines.push(String::new());
                }
                lines.push(format_inline(spans));
            }
        }
    }
    lines.join("\n")
}

pub fn print_document(blocks: &[Block]) {
    println!("{}", format_document(blocks));
}

/// 終端版的學習旅程卡片：週次卡（主題、最多三個學習項目、實作任務）
/// 加上三個收尾章節
pub fn print_plan(plan: &LearningPlan, plan_id: Option<&str>) {
    println!();
    println!("🗺️  Your Learning Journey");
    println!();

    if !plan.skills.is_empty() {
        println!("🎯 Top Skills:");
        for skill in &plan.skills {
            println!("  • {}", skill);
        }
        println!();
    }

    for week in &plan.weeks {
        println!("[Week {}] {}", week.week, week.theme);
        for item in week.items.iter().take(3) {
            println!("  • {}", item);
        }
        if !week.task.is_empty() {
            println!("  HANDS-ON TASK: {}", week.task);
        }
        println!();
    }

    if !plan.accessibility.is_empty() {
        println!("♿ Accessibility: {}", plan.accessibility);
    }
    if !plan.assessment.is_empty() {
        println!("✅ Assessment: {}", plan.assessment);
    }
    if !plan.localization.is_empty() {
        println!("🌐 Localization: {}", plan.localization);
    }

    if let Some(id) = plan_id {
        println!();
        println!("✓ Saved to plan store: {}", id);
    }
}

/// 純文字回退原樣輸出，不經過 Markdown 渲染
pub fn print_raw(text: &str) {
    println!();
    println!("{}", text);
}
