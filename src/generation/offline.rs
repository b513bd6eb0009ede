//! Deterministic offline section templates.
//!
//! Used when no provider produced acceptable text. Output depends only on the
//! request, so identical requests always yield identical text.

use serde::Serialize;

use crate::models::{DetailLevel, GenerationRequest, SectionKind};
use crate::utils::text::{contains_term, title_case};

/// Coarse topic category used to pick template flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicCategory {
    AiHealthcare,
    Climate,
    Blockchain,
    General,
}

const CATEGORY_TERMS: [(TopicCategory, &[&str]); 3] = [
    (
        TopicCategory::AiHealthcare,
        &[
            "ai",
            "artificial intelligence",
            "machine learning",
            "healthcare",
            "medical",
        ],
    ),
    (
        TopicCategory::Climate,
        &["climate", "environment", "sustainability"],
    ),
    (
        TopicCategory::Blockchain,
        &["blockchain", "cryptocurrency", "finance"],
    ),
];

impl TopicCategory {
    /// Match topic and keywords against the category table, first hit wins
    pub fn classify(topic: &str, keywords: &[String]) -> Self {
        let text = format!("{} {}", topic, keywords.join(" "));
        CATEGORY_TERMS
            .iter()
            .find(|(_, terms)| terms.iter().any(|t| contains_term(&text, t)))
            .map(|(category, _)| *category)
            .unwrap_or(TopicCategory::General)
    }

    pub fn id(&self) -> &'static str {
        match self {
            TopicCategory::AiHealthcare => "ai_healthcare",
            TopicCategory::Climate => "climate",
            TopicCategory::Blockchain => "blockchain",
            TopicCategory::General => "general",
        }
    }

    /// Domain framing sentence, empty for the general category
    fn setting(&self) -> &'static str {
        match self {
            TopicCategory::AiHealthcare => {
                " In clinical settings, gains in diagnostic accuracy only matter when patient safety, data privacy and regulatory compliance are preserved."
            }
            TopicCategory::Climate => {
                " Environmental monitoring data and sustainability targets shape both the questions asked and the metrics used to judge progress."
            }
            TopicCategory::Blockchain => {
                " Decentralised ledgers and financial applications place strict demands on transparency, throughput and trust between participants."
            }
            TopicCategory::General => "",
        }
    }

    /// Evaluation focus used in methodology and results templates
    fn focus(&self) -> &'static str {
        match self {
            TopicCategory::AiHealthcare => "diagnostic accuracy and clinical workflow efficiency",
            TopicCategory::Climate => "predictive accuracy and environmental impact",
            TopicCategory::Blockchain => "transaction throughput and security guarantees",
            TopicCategory::General => "accuracy and computational efficiency",
        }
    }
}

struct Slots<'a> {
    topic: &'a str,
    keywords: String,
    field: String,
    category: TopicCategory,
}

impl<'a> Slots<'a> {
    fn new(request: &'a GenerationRequest) -> Self {
        let keywords = request.keyword_list();
        let field = request.field_text();
        Self {
            topic: request.topic.trim(),
            keywords: if keywords.is_empty() {
                String::new()
            } else {
                format!(", with particular attention to {}", keywords)
            },
            field: if field.is_empty() {
                String::new()
            } else {
                format!(" within {}", field)
            },
            category: TopicCategory::classify(&request.topic, &request.keywords),
        }
    }
}

/// Generate section text without any provider
///
/// Never fails and never returns an empty string.
pub fn generate_offline(request: &GenerationRequest) -> String {
    let slots = Slots::new(request);
    let text = match &request.section_kind {
        SectionKind::Title => title(request),
        SectionKind::Abstract => abstract_text(&slots, request),
        SectionKind::Introduction => introduction(&slots),
        SectionKind::LiteratureReview => literature_review(&slots),
        SectionKind::Methodology => methodology(&slots),
        SectionKind::Results => results(&slots),
        SectionKind::Discussion => discussion(&slots),
        SectionKind::Conclusion => conclusion(&slots),
        SectionKind::Custom(name) => custom(&slots, name),
    };

    if text.trim().is_empty() {
        "Untitled Research Study".to_string()
    } else {
        text
    }
}

fn title(request: &GenerationRequest) -> String {
    let topic = request.topic.trim();
    match request.keywords.iter().map(|k| k.trim()).find(|k| !k.is_empty()) {
        Some(keyword) => format!(
            "{} Applications in {}: A Comprehensive Analysis and Future Directions",
            title_case(keyword),
            topic
        ),
        None => format!(
            "Advanced {} Systems: Methodological Innovations and Practical Applications",
            topic
        ),
    }
}

fn abstract_text(s: &Slots<'_>, request: &GenerationRequest) -> String {
    let Slots {
        topic,
        keywords,
        field,
        category,
    } = s;

    let mut text = format!(
        "Background: {topic} is an active area of research{field} with growing practical relevance.{setting} \
         Objective: This study analyses current approaches to {topic}{keywords}, identifies their main limitations \
         and proposes a refined framework. \
         Methods: A mixed-methods design combines systematic literature analysis with comparative experimental \
         evaluation on established benchmark datasets. \
         Results: The proposed framework improves on baseline methods in {focus} while remaining practical to deploy. \
         Conclusions: The findings offer evidence-based guidance for applying {topic} in both research and industry.",
        setting = category.setting(),
        focus = category.focus(),
    );

    if request.detail_level == DetailLevel::Advanced {
        text.push_str(&format!(
            " Threats to validity and the generalisability of results beyond the studied {topic} settings are discussed in detail."
        ));
    }

    let keyword_list = request.keyword_list();
    if !keyword_list.is_empty() {
        text.push_str(&format!(" Keywords: {}.", keyword_list));
    }

    text
}

fn introduction(s: &Slots<'_>) -> String {
    let Slots {
        topic,
        keywords,
        field,
        category,
    } = s;
    format!(
        "The field of {topic}{field} has grown rapidly in recent years, driven by technological advances and wider \
         availability of data.{setting} Current approaches to {topic} show considerable promise but face limitations \
         in scalability, efficiency and real-world deployment. This work addresses gaps in existing methodologies{keywords}. \
         It first reviews the state of the art, then develops an enhanced methodology that targets the identified \
         limitations, and finally validates it empirically against established methods. Beyond its academic \
         contribution, the work offers practical guidance for practitioners adopting {topic}.",
        setting = category.setting(),
    )
}

fn literature_review(s: &Slots<'_>) -> String {
    let Slots {
        topic,
        keywords,
        field,
        category,
    } = s;
    format!(
        "Recent literature on {topic}{field} describes a dynamic research landscape marked by rapid methodological \
         progress.{setting} Published approaches fall broadly into analytical methods, learning-based solutions and \
         hybrid designs that combine the two. Each paradigm brings distinct strengths, and recent studies increasingly \
         compare them on shared benchmarks{keywords}. Persistent gaps include limited long-term evaluation, small or \
         homogeneous datasets and inconsistent reporting of metrics, which make results on {topic} difficult to \
         compare across studies.",
        setting = category.setting(),
    )
}

fn methodology(s: &Slots<'_>) -> String {
    let Slots {
        topic,
        keywords,
        field,
        category,
    } = s;
    format!(
        "This research follows a mixed-methods design for studying {topic}{field}{keywords}. The study proceeds in \
         three phases: establishing baselines from the literature, implementing the enhanced methodology, and \
         running a comparative evaluation. Data were gathered from public benchmark datasets and documented \
         application cases. Evaluation concentrates on {focus}, using repeated trials, group comparisons and \
         regression analysis. Statistical significance is assessed at p < 0.05, and effect sizes are reported to \
         judge practical relevance.",
        focus = category.focus(),
    )
}

fn results(s: &Slots<'_>) -> String {
    let Slots {
        topic,
        keywords,
        category,
        ..
    } = s;
    format!(
        "The evaluation of the proposed {topic} methodology shows consistent improvements over baseline methods \
         across the measured indicators{keywords}. Gains are most pronounced in {focus}, and variance across repeated \
         trials is lower than for the baselines, indicating more reliable behaviour. Comparative analysis across \
         scenarios reveals where each approach performs best, and the observed differences remain statistically \
         significant after correction for multiple comparisons.",
        focus = category.focus(),
    )
}

fn discussion(s: &Slots<'_>) -> String {
    let Slots {
        topic,
        keywords,
        field,
        category,
    } = s;
    format!(
        "The results suggest that careful methodological design yields measurable benefits for {topic}{field}.{setting} \
         Compared with related work, the proposed approach trades a modest increase in implementation effort for \
         clearer gains in robustness{keywords}. The main limitations are the scope of the evaluated scenarios and \
         the reliance on public benchmarks, so replication in operational settings is needed before the findings \
         on {topic} can be generalised.",
        setting = category.setting(),
    )
}

fn conclusion(s: &Slots<'_>) -> String {
    let Slots {
        topic,
        keywords,
        field,
        category,
    } = s;
    format!(
        "This study has provided a structured account of {topic}{field}, covering the current state of the field \
         and promising directions for its development.{setting} Its contributions are an analysis of existing \
         methodologies, the identification of key limitations and an enhanced approach that addresses them{keywords}. \
         The proposed framework is adaptable to specific requirements while maintaining strong performance. Future \
         work should broaden the experimental validation of {topic} and develop more comprehensive evaluation \
         frameworks.",
        setting = category.setting(),
    )
}

fn custom(s: &Slots<'_>, name: &str) -> String {
    let Slots {
        topic,
        keywords,
        field,
        ..
    } = s;
    let section = name.replace('_', " ");
    let section = if section.trim().is_empty() {
        "this topic".to_string()
    } else {
        section.trim().to_string()
    };
    format!(
        "This section provides an analysis of {section} in the context of {topic}{field}{keywords}. The discussion \
         connects theoretical foundations with practical implementation concerns and highlights factors that \
         influence performance and adoption. It closes with evidence-based recommendations for researchers and \
         practitioners working on {topic}."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_classification() {
        assert_eq!(
            TopicCategory::classify("AI for radiology triage", &[]),
            TopicCategory::AiHealthcare
        );
        assert_eq!(
            TopicCategory::classify("coastal erosion", &["climate".to_string()]),
            TopicCategory::Climate
        );
        assert_eq!(
            TopicCategory::classify("smart contract auditing", &["blockchain".to_string()]),
            TopicCategory::Blockchain
        );
        assert_eq!(
            TopicCategory::classify("detailed graph coloring", &[]),
            TopicCategory::General
        );
    }

    #[test]
    fn test_title_with_and_without_keywords() {
        let with = GenerationRequest::new("graph coloring", SectionKind::Title).keywords(["approximation"]);
        assert_eq!(
            generate_offline(&with),
            "Approximation Applications in graph coloring: A Comprehensive Analysis and Future Directions"
        );

        let without = GenerationRequest::new("graph coloring", SectionKind::Title);
        assert_eq!(
            generate_offline(&without),
            "Advanced graph coloring Systems: Methodological Innovations and Practical Applications"
        );
    }

    #[test]
    fn test_every_section_mentions_topic() {
        let mut kinds = SectionKind::STANDARD.to_vec();
        kinds.push(SectionKind::Custom("future_work".into()));

        for kind in kinds {
            let request = GenerationRequest::new("federated learning", kind.clone())
                .keywords(["privacy"])
                .field("Computer Science");
            let text = generate_offline(&request);
            assert!(text.contains("federated learning"), "{} missing topic", kind);
            assert!(!text.contains("Error"));
        }
    }

    #[test]
    fn test_abstract_lists_keywords_and_setting() {
        let request = GenerationRequest::new("carbon capture", SectionKind::Abstract)
            .keywords(["sustainability", "policy"]);
        let text = generate_offline(&request);
        assert!(text.ends_with("Keywords: sustainability, policy."));
        assert!(text.contains("sustainability targets"));
    }

    #[test]
    fn test_offline_is_deterministic() {
        let request = GenerationRequest::new("graph coloring", SectionKind::Results)
            .detail_level(DetailLevel::Advanced);
        assert_eq!(generate_offline(&request), generate_offline(&request));
    }
}
