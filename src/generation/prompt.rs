//! Per-section prompt templates.

use crate::models::{GenerationRequest, SectionKind};

/// " focusing on a, b" or empty
fn keyword_context(request: &GenerationRequest) -> String {
    let keywords = request.keyword_list();
    if keywords.is_empty() {
        String::new()
    } else {
        format!(" focusing on {}", keywords)
    }
}

/// " in the field of X" or empty
fn field_context(request: &GenerationRequest) -> String {
    let field = request.field_text();
    if field.is_empty() {
        String::new()
    } else {
        format!(" in the field of {}", field)
    }
}

/// Build the provider prompt for a request
///
/// The same prompt goes to every provider in the chain; provider-specific
/// framing (system messages) is added by the provider client.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let topic = request.topic.trim();
    let words = request.detail_level.word_target();
    let context = format!("{}{}", keyword_context(request), field_context(request));

    match &request.section_kind {
        SectionKind::Title => format!(
            "Generate ONE concise IEEE conference paper title about '{topic}'{context}. \
             Return ONLY the title text, nothing else. Maximum 12 words, no options or explanations."
        ),
        SectionKind::Abstract => format!(
            "Write a {words}-word IEEE-style abstract for '{topic}'{context}. \
             Structure: (1) Problem statement, (2) Approach/methodology, (3) Key results with specific metrics, \
             (4) Conclusions. Use numbered citations [1], [2]. End with 'Keywords:' followed by 5-7 relevant keywords."
        ),
        SectionKind::Introduction => format!(
            "Write Section 1. INTRODUCTION ({words} words) for '{topic}'{context}. \
             Include numbered subsections (1.1, 1.2). Use IEEE citations [1], [2]. \
             Cover: problem background, research gap, objectives, contributions."
        ),
        SectionKind::LiteratureReview => format!(
            "Write Section 2. RELATED WORK ({words} words) for '{topic}'{context}. \
             Use numbered subsections (2.1, 2.2). Include IEEE citations [1]-[5]. \
             Discuss recent work, compare approaches, identify gaps."
        ),
        SectionKind::Methodology => format!(
            "Write Section 3. METHODOLOGY ({words} words) for '{topic}'{context}. \
             Use subsections (3.1, 3.2). Include equations if relevant. \
             Describe experimental setup, algorithms, evaluation metrics."
        ),
        SectionKind::Results => format!(
            "Write Section 4. RESULTS ({words} words) for '{topic}'{context}. \
             Use subsections (4.1, 4.2). Present quantitative results and comparisons with baselines."
        ),
        SectionKind::Discussion => format!(
            "Write Section 5. DISCUSSION ({words} words) for '{topic}'{context}. \
             Analyze results, compare with related work, discuss implications and limitations."
        ),
        SectionKind::Conclusion => format!(
            "Write Section 6. CONCLUSION ({words} words) for '{topic}'{context}. \
             Summarize contributions, key findings, limitations, future work. No subsections needed."
        ),
        SectionKind::Custom(name) => format!(
            "Write about {} for {topic}{context} in about {words} words.",
            name.replace('_', " ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DetailLevel;

    #[test]
    fn test_title_prompt_embeds_context() {
        let request = GenerationRequest::new("graph coloring", SectionKind::Title)
            .keywords(["approximation", "heuristics"])
            .field("Computer Science");
        let prompt = build_prompt(&request);

        assert!(prompt.contains("'graph coloring' focusing on approximation, heuristics in the field of Computer Science."));
        assert!(prompt.contains("Return ONLY the title text"));
    }

    #[test]
    fn test_word_target_follows_detail_level() {
        let request = GenerationRequest::new("x", SectionKind::Abstract)
            .detail_level(DetailLevel::Advanced);
        assert!(build_prompt(&request).starts_with("Write a 300-word IEEE-style abstract for 'x'."));
    }

    #[test]
    fn test_custom_section_prompt() {
        let request = GenerationRequest::new("compilers", SectionKind::parse("threats_to_validity"));
        assert!(build_prompt(&request).starts_with("Write about threats to validity for compilers"));
    }
}
