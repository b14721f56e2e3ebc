//! C3's category catalog and C7's per-category engagement config.
//!
//! Each category carries a keyword set (used by the classifier), a
//! severity, typical tactics, a recommended persona-type candidate list
//! (first candidate used deterministically for early turns, the rest
//! sampled randomly thereafter — see C12 persona selection), and the
//! engagement config the strategy engine looks up by category.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use scam_honeypot_core::{PersonaType, ScamCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplianceLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone)]
pub struct CategoryConfig {
    pub category: ScamCategory,
    pub severity: u8,
    pub keywords: &'static [&'static str],
    pub tactics: &'static [&'static str],
    pub persona_candidates: &'static [PersonaType],
    pub max_turns: u32,
    pub compliance_level: ComplianceLevel,
    pub fear_response: bool,
}

static CATALOG: Lazy<HashMap<ScamCategory, CategoryConfig>> = Lazy::new(|| {
    use ScamCategory::*;
    let mut m = HashMap::new();

    m.insert(DigitalArrest, CategoryConfig {
        category: DigitalArrest,
        severity: 10,
        keywords: &[
            "digital arrest", "cbi officer", "police verification", "video call verification",
            "do not disconnect", "money laundering case", "narcotics parcel", "arrest warrant",
        ],
        tactics: &["authority-impersonation", "fear-inducement", "isolation", "continuous-surveillance"],
        persona_candidates: &[PersonaType::ElderlyAnxious, PersonaType::WorriedParent],
        max_turns: 12,
        compliance_level: ComplianceLevel::High,
        fear_response: true,
    });

    m.insert(KycPhishing, CategoryConfig {
        category: KycPhishing,
        severity: 8,
        keywords: &["kyc", "verify kyc", "account blocked", "account suspended", "update kyc", "pan card"],
        tactics: &["urgency-pressure", "account-threat"],
        persona_candidates: &[PersonaType::TechNaive, PersonaType::RuralFarmer],
        max_turns: 8,
        compliance_level: ComplianceLevel::Medium,
        fear_response: true,
    });

    m.insert(InvestmentFraud, CategoryConfig {
        category: InvestmentFraud,
        severity: 7,
        keywords: &["guaranteed return", "double your money", "investment scheme", "trading app", "crypto profit"],
        tactics: &["greed-appeal", "social-proof", "fake-urgency"],
        persona_candidates: &[PersonaType::GreedyInvestor, PersonaType::BusyProfessional],
        max_turns: 10,
        compliance_level: ComplianceLevel::Medium,
        fear_response: false,
    });

    m.insert(JobScam, CategoryConfig {
        category: JobScam,
        severity: 6,
        keywords: &["work from home", "part time job", "registration fee", "joining fee", "job offer"],
        tactics: &["hope-appeal", "fee-extraction"],
        persona_candidates: &[PersonaType::DesperateJobseeker, PersonaType::YoungStudent],
        max_turns: 8,
        compliance_level: ComplianceLevel::Low,
        fear_response: false,
    });

    m.insert(CustomsParcel, CategoryConfig {
        category: CustomsParcel,
        severity: 6,
        keywords: &["customs officer", "customs duty", "parcel held", "clearance fee", "courier pending"],
        tactics: &["authority-impersonation", "fee-extraction"],
        persona_candidates: &[PersonaType::FirstTimeSeller, PersonaType::TechNaive],
        max_turns: 10,
        compliance_level: ComplianceLevel::Medium,
        fear_response: true,
    });

    m.insert(RomanceScam, CategoryConfig {
        category: RomanceScam,
        severity: 7,
        keywords: &["i love you", "lonely", "gift stuck in customs", "need money for ticket", "relationship"],
        tactics: &["emotional-manipulation", "long-game", "isolation"],
        persona_candidates: &[PersonaType::LonelySenior, PersonaType::TrustingHousewife],
        max_turns: 15,
        compliance_level: ComplianceLevel::Low,
        fear_response: false,
    });

    m.insert(Sextortion, CategoryConfig {
        category: Sextortion,
        severity: 9,
        keywords: &["video call recording", "share your pictures", "leak", "blackmail", "expose"],
        tactics: &["shame-inducement", "fear-inducement", "fast-extraction"],
        persona_candidates: &[PersonaType::ScaredVictim, PersonaType::YoungStudent],
        max_turns: 5,
        compliance_level: ComplianceLevel::High,
        fear_response: true,
    });

    m.insert(QrCodeScam, CategoryConfig {
        category: QrCodeScam,
        severity: 6,
        keywords: &["scan qr", "qr code", "receive payment", "collect money"],
        tactics: &["trick-direction-reversal"],
        persona_candidates: &[PersonaType::FirstTimeSeller, PersonaType::RuralFarmer],
        max_turns: 6,
        compliance_level: ComplianceLevel::Medium,
        fear_response: false,
    });

    m.insert(LotteryScam, CategoryConfig {
        category: LotteryScam,
        severity: 5,
        keywords: &["lottery winner", "lucky draw", "prize money", "claim your prize"],
        tactics: &["greed-appeal", "fee-extraction"],
        persona_candidates: &[PersonaType::RuralFarmer, PersonaType::LonelySenior],
        max_turns: 10,
        compliance_level: ComplianceLevel::Low,
        fear_response: false,
    });

    m.insert(LoanFraud, CategoryConfig {
        category: LoanFraud,
        severity: 6,
        keywords: &["instant loan", "no documents loan", "processing fee", "loan approved"],
        tactics: &["fee-extraction", "fake-urgency"],
        persona_candidates: &[PersonaType::DesperateJobseeker, PersonaType::WorriedParent],
        max_turns: 10,
        compliance_level: ComplianceLevel::Medium,
        fear_response: false,
    });

    m.insert(TechSupportScam, CategoryConfig {
        category: TechSupportScam,
        severity: 6,
        keywords: &["virus detected", "remote access", "install anydesk", "computer infected"],
        tactics: &["fear-inducement", "remote-access-extraction"],
        persona_candidates: &[PersonaType::TechNaive, PersonaType::LonelySenior],
        max_turns: 8,
        compliance_level: ComplianceLevel::Medium,
        fear_response: true,
    });

    m.insert(InsuranceFraud, CategoryConfig {
        category: InsuranceFraud,
        severity: 5,
        keywords: &["policy lapse", "premium due", "insurance bonus", "policy matured"],
        tactics: &["urgency-pressure", "fee-extraction"],
        persona_candidates: &[PersonaType::WorriedParent, PersonaType::BusyProfessional],
        max_turns: 8,
        compliance_level: ComplianceLevel::Low,
        fear_response: false,
    });

    m.insert(ElectricityDisconnection, CategoryConfig {
        category: ElectricityDisconnection,
        severity: 6,
        keywords: &["electricity bill", "power will be disconnected", "meter update", "bill unpaid"],
        tactics: &["urgency-pressure", "fear-inducement"],
        persona_candidates: &[PersonaType::RuralFarmer, PersonaType::TrustingHousewife],
        max_turns: 8,
        compliance_level: ComplianceLevel::Medium,
        fear_response: true,
    });

    m.insert(OnlineShoppingFraud, CategoryConfig {
        category: OnlineShoppingFraud,
        severity: 5,
        keywords: &["order cancelled", "refund pending", "cashback offer", "delivery failed"],
        tactics: &["fee-extraction", "fake-urgency"],
        persona_candidates: &[PersonaType::FirstTimeSeller, PersonaType::YoungStudent],
        max_turns: 8,
        compliance_level: ComplianceLevel::Low,
        fear_response: false,
    });

    m.insert(SocialMediaImpersonation, CategoryConfig {
        category: SocialMediaImpersonation,
        severity: 5,
        keywords: &["friend request", "stuck abroad", "need money urgently", "lost my wallet"],
        tactics: &["trust-exploitation", "fake-urgency"],
        persona_candidates: &[PersonaType::TrustingHousewife, PersonaType::YoungStudent],
        max_turns: 8,
        compliance_level: ComplianceLevel::Low,
        fear_response: false,
    });

    m.insert(Unknown, CategoryConfig {
        category: Unknown,
        severity: 5,
        keywords: &[],
        tactics: &[],
        persona_candidates: &[PersonaType::TechNaive],
        max_turns: 10,
        compliance_level: ComplianceLevel::Low,
        fear_response: false,
    });

    m
});

pub fn category_config(category: ScamCategory) -> &'static CategoryConfig {
    CATALOG
        .get(&category)
        .expect("every ScamCategory variant has a catalog entry")
}

pub fn all_category_configs() -> impl Iterator<Item = &'static CategoryConfig> {
    CATALOG.values()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_resolves() {
        for &cat in ScamCategory::ALL {
            let cfg = category_config(cat);
            assert_eq!(cfg.category, cat);
        }
        let unknown = category_config(ScamCategory::Unknown);
        assert_eq!(unknown.max_turns, 10);
    }

    #[test]
    fn romance_scam_has_longest_engagement() {
        let romance = category_config(ScamCategory::RomanceScam).max_turns;
        for cfg in all_category_configs() {
            assert!(cfg.max_turns <= romance);
        }
    }

    #[test]
    fn sextortion_has_shortest_engagement() {
        let sextortion = category_config(ScamCategory::Sextortion).max_turns;
        for cfg in all_category_configs() {
            assert!(cfg.max_turns >= sextortion);
        }
    }
}
