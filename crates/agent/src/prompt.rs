//! Prompt assembly for C8's LLM path.

use scam_honeypot_config::category::CategoryConfig;
use scam_honeypot_config::persona::PersonaProfile;
use scam_honeypot_core::{LanguageStyle, MessageRecord, Role};

/// Builds the prompt sent to the injected `TextGenerator`: persona voice,
/// category framing, recent transcript, and a flow-derived playing hint.
pub fn build_prompt(
    persona: &PersonaProfile,
    category: &CategoryConfig,
    transcript: &[&MessageRecord],
    hint: &str,
    language_style: LanguageStyle,
) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!(
        "You are playing a {} ({}-{} years old, {}), being targeted by a {} scam. \
         Tech literacy: {:?}. Stay fully in character, never reveal you suspect a scam.\n",
        persona_label(persona),
        persona.age_range.0,
        persona.age_range.1,
        persona.occupation,
        category.category.as_label(),
        persona.tech_literacy,
    ));

    prompt.push_str(&format!(
        "Write in {}. Keep the reply under 200 characters, one or two short sentences.\n",
        language_style_label(language_style)
    ));

    prompt.push_str(&format!("Playing direction: {hint}\n"));

    prompt.push_str("Recent conversation:\n");
    for message in transcript {
        let speaker = match message.role {
            Role::Scammer => "Caller",
            Role::Agent => "You",
        };
        prompt.push_str(&format!("{speaker}: {}\n", message.content));
    }

    prompt.push_str("Reply only with your next line, nothing else.");
    prompt
}

fn persona_label(persona: &PersonaProfile) -> &'static str {
    use scam_honeypot_core::PersonaType::*;
    match persona.persona_type {
        ElderlyAnxious => "anxious elderly person",
        TechNaive => "tech-unfamiliar shopkeeper",
        DesperateJobseeker => "unemployed graduate desperate for work",
        GreedyInvestor => "small business owner chasing high returns",
        WorriedParent => "worried parent",
        RuralFarmer => "farmer with poor connectivity and little formal schooling",
        YoungStudent => "college student",
        BusyProfessional => "busy IT professional",
        LonelySenior => "lonely retired teacher",
        FirstTimeSeller => "first-time online seller",
        ScaredVictim => "frightened victim",
        TrustingHousewife => "trusting homemaker",
    }
}

fn language_style_label(style: LanguageStyle) -> &'static str {
    match style {
        LanguageStyle::PlainEnglish => "plain English",
        LanguageStyle::HinglishLight => "mostly English with occasional Hindi words",
        LanguageStyle::HinglishHeavy => "heavy Hinglish, mostly romanized Hindi",
        LanguageStyle::HinglishHeavyEnglish => "a natural Hinglish mix",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scam_honeypot_config::category::category_config;
    use scam_honeypot_config::persona::persona_profile;
    use scam_honeypot_core::{PersonaType, ScamCategory};

    #[test]
    fn prompt_includes_persona_and_hint() {
        let persona = persona_profile(PersonaType::ElderlyAnxious);
        let category = category_config(ScamCategory::DigitalArrest);
        let prompt = build_prompt(persona, category, &[], "show fear", LanguageStyle::HinglishHeavy);
        assert!(prompt.contains("anxious elderly person"));
        assert!(prompt.contains("show fear"));
        assert!(prompt.contains("digital_arrest"));
    }
}
