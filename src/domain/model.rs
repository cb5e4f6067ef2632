use serde::{Deserialize, Serialize};
use std::fmt;

/// 生成輸出語言（固定六種選項）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Portuguese,
    Japanese,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Portuguese => "Portuguese",
            Language::Japanese => "Japanese",
        };
        write!(f, "{}", name)
    }
}

/// 一次生成請求的四個輸入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub role: String,
    pub goal: String,
    pub hours: u32,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Week {
    #[serde(default)]
    pub week: u32,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub task: String,
}

/// 四週學習路徑。所有欄位都允許缺省，服務端回傳的形狀不可信
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningPlan {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub weeks: Vec<Week>,
    #[serde(default)]
    pub accessibility: String,
    #[serde(default)]
    pub assessment: String,
    #[serde(default)]
    pub localization: String,
}

/// 生成服務的回覆：原始文字加上可選的結構化計畫
#[derive(Debug, Clone)]
pub struct GenerationReply {
    pub text: String,
    pub plan: Option<LearningPlan>,
}

/// 管道的最終結果。結構化與純文字兩種情況互斥，
/// 讓回退行為在型別層面窮盡
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    Structured {
        plan: LearningPlan,
        plan_id: Option<String>,
        raw_text: String,
    },
    RawText {
        text: String,
    },
}

/// 持久化的計畫記錄：請求中繼資料 + 攤平的計畫欄位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub role: String,
    pub goal: String,
    pub hours: u32,
    pub language: Language,
    #[serde(flatten)]
    pub plan: LearningPlan,
}

impl PlanRecord {
    pub fn new(request: &PlanRequest, plan: &LearningPlan) -> Self {
        Self {
            role: request.role.clone(),
            goal: request.goal.clone(),
            hours: request.hours,
            language: request.language,
            plan: plan.clone(),
        }
    }
}
