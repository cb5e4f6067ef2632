use crate::domain::model::PlanRequest;

/// 組出送往生成服務的指令文字。
///
/// 模板是確定性的：同一組輸入永遠產生同一段指令。輸出格式契約
/// （六項技能、四週各三個學習項目加一個實作任務、三個收尾章節）
/// 寫死在模板裡，並明確要求不要用程式碼區塊包裹。
pub fn build_prompt(request: &PlanRequest) -> String {
    format!(
        "You are an instructional design assistant for a corporate learning marketplace.\n\
         Company: OpenSesame (AI-powered catalog; skills-based curation; multilingual content).\n\
         Audience: {role}.\n\
         Learner's goal: {goal}.\n\
         Available time: ~{hours} hours/week.\n\
         Output language: {language}.\n\
         \n\
         TASK: Create a 4-week learning path. Return ONLY plain Markdown (NO code blocks, NO ```markdown tags).\n\
         \n\
         Format EXACTLY like this:\n\
         \n\
         ## Top Skills\n\
         1. Skill Name: Brief description\n\
         2. Skill Name: Brief description\n\
         (Continue for 6 skills)\n\
         \n\
         ## Learning Path\n\
         \n\
         **Week 1: Theme Title**\n\
         - Learning Item: Description\n\
         - Learning Item: Description\n\
         - Learning Item: Description\n\
         - Hands-on Task: Task description\n\
         \n\
         **Week 2: Theme Title**\n\
         - Learning Item: Description\n\
         - Learning Item: Description\n\
         - Learning Item: Description\n\
         - Hands-on Task: Task description\n\
         \n\
         (Continue for weeks 3-4)\n\
         \n\
         ## Accessibility\n\
         - Key accessibility considerations\n\
         \n\
         ## Assessment\n\
         - Scenario-based questions and rubric\n\
         \n\
         ## Localization\n\
         - Tips for {language} localization\n\
         \n\
         Keep it concrete, action-oriented, and workplace-relevant. DO NOT wrap output in code blocks.",
        role = request.role,
        goal = request.goal,
        hours = request.hours,
        language = request.language,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Language;

    fn request() -> PlanRequest {
        PlanRequest {
            role: "Data Analyst".to_string(),
            goal: "Learn SQL window functions".to_string(),
            hours: 5,
            language: Language::Spanish,
        }
    }

    #[test]
    fn test_prompt_embeds_all_four_inputs() {
        let prompt = build_prompt(&request());
        assert!(prompt.contains("Audience: Data Analyst."));
        assert!(prompt.contains("Learner's goal: Learn SQL window functions."));
        assert!(prompt.contains("~5 hours/week"));
        assert!(prompt.contains("Output language: Spanish."));
        assert!(prompt.contains("Tips for Spanish localization"));
    }

    #[test]
    fn test_prompt_pins_the_output_format() {
        let prompt = build_prompt(&request());
        assert!(prompt.contains("## Top Skills"));
        assert!(prompt.contains("(Continue for 6 skills)"));
        assert!(prompt.contains("**Week 1: Theme Title**"));
        assert!(prompt.contains("- Hands-on Task: Task description"));
        assert!(prompt.contains("(Continue for weeks 3-4)"));
        assert!(prompt.contains("## Accessibility"));
        assert!(prompt.contains("## Assessment"));
        assert!(prompt.contains("## Localization"));
    }

    #[test]
    fn test_prompt_forbids_code_block_wrapping() {
        let prompt = build_prompt(&request());
        assert!(prompt.contains("NO code blocks"));
        assert!(prompt.contains("DO NOT wrap output in code blocks"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_prompt(&request()), build_prompt(&request()));
    }
}
