//! Reference profiles for the nine types, used by template narratives and
//! returned alongside interpretations.

use serde::Serialize;

use super::types::EnneagramType;
use crate::domain::foundation::Locale;

/// A string in both supported locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Localized {
    pub en: &'static str,
    pub kr: &'static str,
}

impl Localized {
    pub fn get(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.en,
            Locale::Kr => self.kr,
        }
    }
}

const fn l(en: &'static str, kr: &'static str) -> Localized {
    Localized { en, kr }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeProfile {
    #[serde(rename = "type")]
    pub enneagram_type: EnneagramType,
    pub name: Localized,
    pub nickname: Localized,
    pub core_motivation: Localized,
    pub growth_direction: EnneagramType,
    pub stress_direction: EnneagramType,
    pub healthy_traits: [Localized; 3],
}

impl TypeProfile {
    pub fn for_type(t: EnneagramType) -> &'static TypeProfile {
        &PROFILES[t.index()]
    }

    /// Healthy traits joined for prose, first `n` only.
    pub fn traits(&self, locale: Locale, n: usize) -> String {
        self.healthy_traits
            .iter()
            .take(n)
            .map(|t| t.get(locale))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

use EnneagramType::*;

static PROFILES: [TypeProfile; 9] = [
    TypeProfile {
        enneagram_type: One,
        name: l("The Reformer", "개혁가"),
        nickname: l("The Perfectionist", "완벽주의자"),
        core_motivation: l(
            "To be right, to strive higher and improve everything, to be consistent with their ideals.",
            "올바르게 되고, 더 높이 노력하고 모든 것을 개선하며, 이상과 일관성을 유지하고자 합니다.",
        ),
        growth_direction: Seven,
        stress_direction: Four,
        healthy_traits: [l("Wise", "지혜로운"), l("Discerning", "분별력 있는"), l("Realistic", "현실적인")],
    },
    TypeProfile {
        enneagram_type: Two,
        name: l("The Helper", "조력자"),
        nickname: l("The Giver", "베푸는 자"),
        core_motivation: l(
            "To be loved, to express feelings for others, to be needed and appreciated.",
            "사랑받고, 다른 사람들에 대한 감정을 표현하며, 필요하고 감사받는 것.",
        ),
        growth_direction: Four,
        stress_direction: Eight,
        healthy_traits: [
            l("Unconditionally loving", "무조건적으로 사랑하는"),
            l("Humble", "겸손한"),
            l("Altruistic", "이타적인"),
        ],
    },
    TypeProfile {
        enneagram_type: Three,
        name: l("The Achiever", "성취자"),
        nickname: l("The Performer", "수행자"),
        core_motivation: l(
            "To be affirmed, to distinguish themselves from others, to be admired.",
            "인정받고, 다른 사람들과 구별되며, 존경받는 것.",
        ),
        growth_direction: Six,
        stress_direction: Nine,
        healthy_traits: [l("Authentic", "진정한"), l("Self-accepting", "자기 수용적인"), l("Inner-directed", "내면 지향적인")],
    },
    TypeProfile {
        enneagram_type: Four,
        name: l("The Individualist", "개인주의자"),
        nickname: l("The Romantic", "낭만주의자"),
        core_motivation: l(
            "To express themselves and their individuality, to create and surround themselves with beauty.",
            "자신과 개성을 표현하고, 아름다움을 창조하고 그것으로 둘러싸이는 것.",
        ),
        growth_direction: One,
        stress_direction: Two,
        healthy_traits: [l("Creative", "창의적인"), l("Inspired", "영감 받은"), l("Self-renewing", "자기 갱신적인")],
    },
    TypeProfile {
        enneagram_type: Five,
        name: l("The Investigator", "탐구자"),
        nickname: l("The Observer", "관찰자"),
        core_motivation: l(
            "To possess knowledge, to understand the environment, to have everything figured out.",
            "지식을 소유하고, 환경을 이해하며, 모든 것을 파악하는 것.",
        ),
        growth_direction: Eight,
        stress_direction: Seven,
        healthy_traits: [l("Visionary", "비전 있는"), l("Pioneering", "선구적인"), l("Objective", "객관적인")],
    },
    TypeProfile {
        enneagram_type: Six,
        name: l("The Loyalist", "충성가"),
        nickname: l("The Skeptic", "회의론자"),
        core_motivation: l(
            "To have security and support, to fight against anxiety and insecurity.",
            "안전과 지원을 받고, 불안과 불안정에 맞서 싸우는 것.",
        ),
        growth_direction: Nine,
        stress_direction: Three,
        healthy_traits: [l("Courageous", "용감한"), l("Self-affirming", "자기 긍정적인"), l("Trusting", "신뢰하는")],
    },
    TypeProfile {
        enneagram_type: Seven,
        name: l("The Enthusiast", "열정가"),
        nickname: l("The Adventurer", "모험가"),
        core_motivation: l(
            "To maintain freedom and happiness, to avoid missing out on worthwhile experiences.",
            "자유와 행복을 유지하고, 가치 있는 경험을 놓치지 않는 것.",
        ),
        growth_direction: Five,
        stress_direction: One,
        healthy_traits: [l("Appreciative", "감사하는"), l("Grateful", "고마워하는"), l("Satisfied", "만족하는")],
    },
    TypeProfile {
        enneagram_type: Eight,
        name: l("The Challenger", "도전자"),
        nickname: l("The Protector", "보호자"),
        core_motivation: l(
            "To be self-reliant, to prove their strength, to resist weakness.",
            "자립하고, 자신의 강함을 증명하며, 약함에 저항하는 것.",
        ),
        growth_direction: Two,
        stress_direction: Five,
        healthy_traits: [l("Magnanimous", "관대한"), l("Heroic", "영웅적인"), l("Self-mastering", "자기 통제적인")],
    },
    TypeProfile {
        enneagram_type: Nine,
        name: l("The Peacemaker", "평화주의자"),
        nickname: l("The Mediator", "중재자"),
        core_motivation: l(
            "To have inner stability and peace of mind, to create harmony in their environment.",
            "내면의 안정과 마음의 평화를 갖고, 환경에서 조화를 만드는 것.",
        ),
        growth_direction: Three,
        stress_direction: Six,
        healthy_traits: [l("Self-possessed", "침착한"), l("Autonomous", "자율적인"), l("Serene", "평온한")],
    },
];
