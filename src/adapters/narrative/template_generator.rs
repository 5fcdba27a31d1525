//! Template Narrative Generator - Deterministic prose from type profiles.
//!
//! Needs no network access and never fails, which makes it the fallback for
//! every other generator.

use async_trait::async_trait;

use crate::domain::enneagram::TypeProfile;
use crate::domain::foundation::Locale;
use crate::ports::{
    GeneratedNarrative, Interpretation, NarrativeError, NarrativeGenerator, NarrativeRequest,
    NarrativeSource, StrengthsContext,
};

/// Strengths quoted in the synergy section.
const MAX_QUOTED_STRENGTHS: usize = 5;

/// Builds interpretations from the static type profiles.
#[derive(Debug, Clone, Default)]
pub struct TemplateNarrativeGenerator;

impl TemplateNarrativeGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Renders all sections synchronously.
    pub fn render(&self, request: &NarrativeRequest) -> Interpretation {
        let locale = request.locale;
        let t = request.primary_type;
        let w = request.wing;
        let profile = TypeProfile::for_type(t);
        let wing_profile = TypeProfile::for_type(w);
        let growth = TypeProfile::for_type(profile.growth_direction);
        let instinct = request.instinct.display_name(locale);

        let (type_overview, wing_influence, instinct_focus, growth_path, career_insights) = match locale {
            Locale::En => (
                format!(
                    "You are {} ({}). {}",
                    profile.name.en, profile.nickname.en, profile.core_motivation.en
                ),
                format!(
                    "The {}w{} combination colours your core with qualities of {}, such as {}.",
                    t,
                    w,
                    wing_profile.name.en,
                    wing_profile.traits(locale, 2)
                ),
                format!("Your {} instinct is your primary focus.", instinct),
                format!(
                    "For growth, develop the positive qualities of Type {}. Cultivating traits like {} will be beneficial.",
                    profile.growth_direction,
                    growth.traits(locale, 3)
                ),
                format!(
                    "Your {} type thrives in roles where you can leverage traits like {}. Seek environments that allow you to express these strengths.",
                    profile.name.en,
                    profile.traits(locale, 2)
                ),
            ),
            Locale::Kr => (
                format!(
                    "당신은 {}({})입니다. {}",
                    profile.name.kr, profile.nickname.kr, profile.core_motivation.kr
                ),
                format!(
                    "{}w{} 조합은 {}의 {} 같은 특성을 기본 유형에 더합니다.",
                    t,
                    w,
                    wing_profile.name.kr,
                    wing_profile.traits(locale, 2)
                ),
                format!("{} 본능이 당신의 주요 초점입니다.", instinct),
                format!(
                    "성장을 위해 Type {}의 긍정적 특성을 개발하세요. {} 같은 특성을 기르는 것이 도움이 됩니다.",
                    profile.growth_direction,
                    growth.traits(locale, 3)
                ),
                format!(
                    "당신의 {} 유형은 {} 특성을 활용할 수 있는 역할에서 빛납니다. 이러한 강점을 발휘할 수 있는 환경을 찾으세요.",
                    profile.name.kr,
                    profile.traits(locale, 2)
                ),
            ),
        };

        Interpretation {
            type_overview,
            wing_influence,
            instinct_focus,
            strengths_synergy: request
                .strengths
                .as_ref()
                .and_then(|s| strengths_synergy(s, profile, locale)),
            growth_path,
            career_insights,
            integrated_insight: None,
        }
    }
}

fn strengths_synergy(strengths: &StrengthsContext, profile: &TypeProfile, locale: Locale) -> Option<String> {
    if strengths.is_empty() {
        return None;
    }
    let quoted = strengths.leading(MAX_QUOTED_STRENGTHS).join(", ");
    Some(match locale {
        Locale::En => format!(
            "Your discovered strengths ({}) naturally complement your {} type. Consciously leveraging these strengths can enhance the positive aspects of your type.",
            quoted, profile.name.en
        ),
        Locale::Kr => format!(
            "발견된 강점({})은 {} 유형과 자연스럽게 연결됩니다. 이 강점들을 의식적으로 활용하면 유형의 긍정적 특성을 더욱 발휘할 수 있습니다.",
            quoted, profile.name.kr
        ),
    })
}

#[async_trait]
impl NarrativeGenerator for TemplateNarrativeGenerator {
    async fn generate(&self, request: &NarrativeRequest) -> Result<GeneratedNarrative, NarrativeError> {
        Ok(GeneratedNarrative {
            interpretation: self.render(request),
            source: NarrativeSource::Fallback,
        })
    }

    fn name(&self) -> &'static str {
        "template"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enneagram::{EnneagramType, Instinct};

    fn request(locale: Locale, strengths: Option<StrengthsContext>) -> NarrativeRequest {
        NarrativeRequest {
            primary_type: EnneagramType::Four,
            wing: EnneagramType::Five,
            instinct: Instinct::Sx,
            confidence: "medium".into(),
            strengths,
            locale,
        }
    }

    #[test]
    fn english_sections_reference_the_profile() {
        let i = TemplateNarrativeGenerator::new().render(&request(Locale::En, None));
        assert!(i.type_overview.starts_with("You are The Individualist (The Romantic)."));
        assert!(i.wing_influence.contains("4w5"));
        assert!(i.wing_influence.contains("The Investigator"));
        assert_eq!(i.instinct_focus, "Your Intimate instinct is your primary focus.");
        assert!(i.growth_path.contains("Type 1"));
        assert!(i.growth_path.contains("Wise, Discerning, Realistic"));
        assert!(i.strengths_synergy.is_none());
    }

    #[test]
    fn korean_sections_use_korean_text() {
        let i = TemplateNarrativeGenerator::new().render(&request(Locale::Kr, None));
        assert!(i.type_overview.starts_with("당신은 개인주의자(낭만주의자)입니다."));
        assert!(i.instinct_focus.starts_with("친밀"));
    }

    #[test]
    fn strengths_add_a_synergy_section() {
        let strengths = StrengthsContext {
            skills: vec!["Design".into()],
            attitudes: vec![],
            values: vec!["Beauty".into()],
        };
        let i = TemplateNarrativeGenerator::new().render(&request(Locale::En, Some(strengths)));
        let synergy = i.strengths_synergy.unwrap();
        assert!(synergy.contains("(Design, Beauty)"));

        let empty = TemplateNarrativeGenerator::new().render(&request(Locale::En, Some(StrengthsContext::default())));
        assert!(empty.strengths_synergy.is_none());
    }

    #[tokio::test]
    async fn generate_reports_fallback_source() {
        let generated = TemplateNarrativeGenerator::new()
            .generate(&request(Locale::En, None))
            .await
            .unwrap();
        assert_eq!(generated.source, NarrativeSource::Fallback);
    }
}
