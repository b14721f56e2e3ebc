//! C5 — the immutable persona catalog.
//!
//! Twelve persona types, each an immutable profile with three phrase
//! pools authored in a Hinglish/Hindi-English register for low-tech
//! personas and plain professional English for high-tech ones. Selection
//! of *which* candidate to play is owned by the pipeline (C12) /
//! response generator (C8); this module only holds data.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use scam_honeypot_core::{LanguageStyle, PersonaType, TechLiteracy};

#[derive(Debug, Clone)]
pub struct PersonaProfile {
    pub persona_type: PersonaType,
    pub age_range: (u8, u8),
    pub occupation: &'static str,
    pub tech_literacy: TechLiteracy,
    pub language_style: LanguageStyle,
    pub emotional_triggers: &'static [&'static str],
    pub typical: &'static [&'static str],
    pub delay: &'static [&'static str],
    pub exit: &'static [&'static str],
    /// Sampled instead of `typical`/`delay` when the scammer's message
    /// reads as formal English and this persona is low-tech — confusion
    /// at the register itself, not at the scam. Empty for personas whose
    /// tech literacy never triggers that branch.
    pub confusion: &'static [&'static str],
}

static CATALOG: Lazy<HashMap<PersonaType, PersonaProfile>> = Lazy::new(|| {
    use PersonaType::*;
    let mut m = HashMap::new();

    m.insert(ElderlyAnxious, PersonaProfile {
        persona_type: ElderlyAnxious,
        age_range: (65, 80),
        occupation: "retired",
        tech_literacy: TechLiteracy::VeryLow,
        language_style: LanguageStyle::HinglishHeavy,
        emotional_triggers: &["fear", "authority", "family safety"],
        typical: &[
            "Beta, mujhe samajh nahi aa raha, aap phir se bataiye na.",
            "Hai bhagwan, kya hua mere account ko?",
            "Main ghar pe akeli hun, bahut dar lag raha hai.",
            "Ek second beta, mera chashma dhundh rahi hun.",
            "Aap police se ho? Mujhe kuch nahi pata tha.",
            "Theek hai theek hai, aap jo boliye main karti hun.",
        ],
        delay: &[
            "Ruko beta, mera haath kaanp raha hai phone pakadte hue.",
            "Mujhe apne bete ko bulana padega, wo samjhayega.",
            "Thoda time dijiye, internet slow chal raha hai yahan.",
        ],
        exit: &[
            "Beta mujhe bahut neend aa rahi hai, kal baat karte hain.",
            "Mera phone ka balance khatam ho raha hai, phir call karti hun.",
            "Koi mere ghar aa gaya hai, baad mein baat karenge.",
        ],
        confusion: &[
            "Beta English mein mat boliye, mujhe Hindi mein samjhaiye.",
            "Itna bada-bada word bol rahe ho, mujhe kuch samajh nahi aaya.",
        ],
    });

    m.insert(TechNaive, PersonaProfile {
        persona_type: TechNaive,
        age_range: (40, 55),
        occupation: "shopkeeper",
        tech_literacy: TechLiteracy::Low,
        language_style: LanguageStyle::HinglishHeavy,
        emotional_triggers: &["confusion", "inconvenience"],
        typical: &[
            "Yeh app kaise download karu, samajh nahi aaraha.",
            "Mera phone purana hai, sab kuch slow chalta hai.",
            "Aap bol rahe ho to sahi hi hoga, par thoda explain karo.",
            "Screen pe kuch aa raha hai, kya karu ab?",
            "Mujhe computer wala kaam nahi aata.",
            "Accha accha, ek minute rukiye, likh leta hun.",
        ],
        delay: &[
            "Net chala gaya tha, abhi wapas aaya hai.",
            "Dukaan mein customer aa gaya, do minute.",
            "Beta ko bulakar dikhata hun screen, wait karo.",
        ],
        exit: &[
            "Dukaan band karne ka time ho gaya, kal dekhte hain.",
            "Mera phone hang ho raha hai, baad mein try karta hun.",
            "Ghar jaana hai abhi, phir baat karenge.",
        ],
        confusion: &[
            "Itni fast English mein mat boliye, thoda Hindi mein samjhao.",
            "Mujhe yeh bade-bade word samajh nahi aate, saaf-saaf bolo.",
        ],
    });

    m.insert(DesperateJobseeker, PersonaProfile {
        persona_type: DesperateJobseeker,
        age_range: (22, 30),
        occupation: "unemployed graduate",
        tech_literacy: TechLiteracy::Medium,
        language_style: LanguageStyle::HinglishLight,
        emotional_triggers: &["hope", "financial pressure"],
        typical: &[
            "Sir yeh job genuine hai na? Bahut zaroorat hai mujhe.",
            "Salary kitni milegi aur kab se start hoga?",
            "Maine interview diya tha pehle bhi, hamesha reject ho jaata hoon.",
            "Documents kya kya lagenge sir?",
            "Work from home hai ya office aana padega?",
            "Please thoda detail mein bataiye, family ko bhi batana hai.",
        ],
        delay: &[
            "Sir mummy bula rahi hain, ek second.",
            "Mera data pack khatam ho gaya, wifi dhoondh raha hoon.",
            "Pehle thoda soch leta hoon, itna bada decision hai.",
        ],
        exit: &[
            "Sir mujhe doosri jagah interview ke liye jaana hai, baad mein baat karte hain.",
            "Thoda time dijiye sir, family se discuss karna hai.",
            "Network issue ho raha hai yahan, phir call karta hoon.",
        ],
        confusion: &[],
    });

    m.insert(GreedyInvestor, PersonaProfile {
        persona_type: GreedyInvestor,
        age_range: (35, 50),
        occupation: "small business owner",
        tech_literacy: TechLiteracy::Medium,
        language_style: LanguageStyle::HinglishLight,
        emotional_triggers: &["greed", "fear of missing out"],
        typical: &[
            "Kitna return milega is scheme mein, monthly ya yearly?",
            "Pehle chote amount se start kar sakta hoon kya?",
            "Mere jaan-pehchaan wale bhi invest karna chahte hain.",
            "App ka naam kya hai, Play Store pe dikh raha hai?",
            "Withdrawal kitni jaldi ho jaata hai?",
            "Aapke company ka office kahan hai, visit kar sakta hoon?",
        ],
        delay: &[
            "Ek minute, apna CA se confirm kar leta hoon.",
            "Bank mein hoon abhi, thodi der mein baat karta hoon.",
            "Thoda soch ke batata hoon, itna bada amount hai.",
        ],
        exit: &[
            "Abhi meeting mein jaana hai, shaam ko baat karte hain.",
            "Mujhe pehle apne dost se verify karna hai, phir batata hoon.",
            "Signal nahi aa raha yahan, baad mein connect karta hoon.",
        ],
        confusion: &[],
    });

    m.insert(WorriedParent, PersonaProfile {
        persona_type: WorriedParent,
        age_range: (40, 55),
        occupation: "homemaker",
        tech_literacy: TechLiteracy::Low,
        language_style: LanguageStyle::HinglishHeavy,
        emotional_triggers: &["family safety", "fear"],
        typical: &[
            "Mera beta theek to hai na? Kuch hua kya usko?",
            "Aap kaunsa hospital se bol rahe ho?",
            "Please mujhe bataiye kya hua, main pareshan ho rahi hoon.",
            "Uska phone kyun nahi lag raha abhi?",
            "Main abhi nikalti hoon, address bataiye.",
            "Kitna paisa chahiye, main intezaam karti hoon.",
        ],
        delay: &[
            "Ek second, apne pati ko bula rahi hoon.",
            "Mera haath kaanp raha hai, thoda ruko.",
            "Neighbour se madad maang rahi hoon, wait kijiye.",
        ],
        exit: &[
            "Main hospital ja rahi hoon abhi, wahan se baat karungi.",
            "Phone ki battery khatam ho rahi hai, charger dhoondh rahi hoon.",
            "Mera pati aa gaye hain, unse baat kijiye... hello?",
        ],
        confusion: &[
            "Please Hindi mein boliye, English mujhe kam samajh aati hai.",
            "Itna mushkil English, thoda aasan shabdon mein bataiye.",
        ],
    });

    m.insert(RuralFarmer, PersonaProfile {
        persona_type: RuralFarmer,
        age_range: (45, 60),
        occupation: "farmer",
        tech_literacy: TechLiteracy::VeryLow,
        language_style: LanguageStyle::HinglishHeavy,
        emotional_triggers: &["confusion", "authority"],
        typical: &[
            "Mobile mein network kam aata hai yahan gaon mein.",
            "Bank waala kaam beta mera ladka dekhta hai shahar se.",
            "Aap sarkari office se ho kya?",
            "Mujhe padhna likhna thoda kam aata hai.",
            "Kya karna padega mujhe bataiye saaf saaf.",
            "Kheti ka kaam chhodkar aaya hoon baat karne.",
        ],
        delay: &[
            "Khet mein hoon abhi, ghar ja ke baat karta hoon.",
            "Network chala gaya tha yahan, abhi aaya.",
            "Beta ko phone milata hoon, wo samjhega.",
        ],
        exit: &[
            "Ab andhera ho raha hai, kal subah baat karenge.",
            "Mujhe paani dena hai khet mein, baad mein call karta hoon.",
            "Mobile ka charge khatam, gaon mein bijli nahi hai abhi.",
        ],
        confusion: &[
            "English nahi aati mujhe sahab, Hindi mein boliye.",
            "Itna bada shabd bole, mera kuch samajh mein nahi aaya.",
        ],
    });

    m.insert(YoungStudent, PersonaProfile {
        persona_type: YoungStudent,
        age_range: (18, 23),
        occupation: "college student",
        tech_literacy: TechLiteracy::Medium,
        language_style: LanguageStyle::HinglishLight,
        emotional_triggers: &["confusion", "social pressure"],
        typical: &[
            "Wait this is about my account? I didn't even register anywhere.",
            "Bhai ye sach mein legit hai na, scam to nahi?",
            "Mujhe abhi class join karni hai, jaldi bataiye.",
            "Mera parents ka account hai ye, unko bataun kya?",
            "Kitna time lagega ye process complete karne mein?",
            "App ka link bhejo, main dekhta hoon.",
        ],
        delay: &[
            "Ek sec, professor dekh raha hai phone.",
            "Hostel mein wifi slow hai bahut.",
            "Roommate bula raha hai, ruko.",
        ],
        exit: &[
            "Exam hai kal, abhi nahi ho payega ye.",
            "Battery low hai yaar, baad mein message karta hoon.",
            "Professor ne phone rakhne bola, bye.",
        ],
        confusion: &[],
    });

    m.insert(BusyProfessional, PersonaProfile {
        persona_type: BusyProfessional,
        age_range: (28, 45),
        occupation: "IT employee",
        tech_literacy: TechLiteracy::High,
        language_style: LanguageStyle::PlainEnglish,
        emotional_triggers: &["time pressure", "professional reputation"],
        typical: &[
            "I'm in a meeting right now, can you send this over email instead?",
            "Which department did you say you're calling from?",
            "I'll need to verify this with my bank directly.",
            "Can you give me a reference or case number for this?",
            "I have about two minutes, please be quick.",
            "Is there a way to confirm this through the official app?",
        ],
        delay: &[
            "Hold on, my manager is calling me on the other line.",
            "Let me just finish this email, one moment.",
            "I'm stepping out of the meeting room, give me a second.",
        ],
        exit: &[
            "I really need to get back to work, we'll continue this later.",
            "I'm going to verify this independently and call you back.",
            "This call is getting disconnected, bad network here.",
        ],
        confusion: &[],
    });

    m.insert(LonelySenior, PersonaProfile {
        persona_type: LonelySenior,
        age_range: (60, 75),
        occupation: "retired teacher",
        tech_literacy: TechLiteracy::Low,
        language_style: LanguageStyle::HinglishLight,
        emotional_triggers: &["loneliness", "companionship", "fear"],
        typical: &[
            "It's nice to have someone to talk to, actually.",
            "Main akela rehta hoon beta, koi aata nahi milne.",
            "Aap roz call karoge kya? Achha lagta hai baat karke.",
            "Mujhe bataiye, aap kaun se company se ho?",
            "Thoda dheere boliye, mujhe sunne mein dikkat hoti hai.",
            "Aap jaisa bol rahe ho waisa hi karta hoon main.",
        ],
        delay: &[
            "Ek minute beta, doorbell baj rahi hai.",
            "Mera hearing aid lagana padega, ruko zara.",
            "Chai bana raha tha, gas bandh karke aata hoon.",
        ],
        exit: &[
            "Mera serial start hone wala hai TV pe, kal baat karein?",
            "Neend aa rahi hai beta, ab sona hai.",
            "Koi aaya hai darwaze pe, baad mein baat karta hoon.",
        ],
        confusion: &[
            "Thoda dheere aur Hindi mein boliye na, English kam samajh aati hai.",
            "Aap kya bol rahe ho, mujhe saaf samajh nahi aaya.",
        ],
    });

    m.insert(FirstTimeSeller, PersonaProfile {
        persona_type: FirstTimeSeller,
        age_range: (25, 40),
        occupation: "online seller",
        tech_literacy: TechLiteracy::Medium,
        language_style: LanguageStyle::HinglishLight,
        emotional_triggers: &["eagerness to sell", "fear of losing the sale"],
        typical: &[
            "Haan item abhi bhi available hai, aap lena chahte ho?",
            "Payment kaise karoge, UPI se ya app se?",
            "Pehli baar online bech raha hoon, thoda guide kar dena.",
            "Courier ka address bhej du kya?",
            "Advance chahiye hoga ya delivery ke baad?",
            "Aapka naam aur number confirm kar dijiye.",
        ],
        delay: &[
            "Ek second, item ki photo dhoondh raha hoon.",
            "Customer aur bhi message kar raha hai, ruko thoda.",
            "Courier waale ka call aa raha hai, ek min.",
        ],
        exit: &[
            "Mujhe doosre buyer se bhi baat karni hai, baad mein batata hoon.",
            "Shop band karne ka time ho gaya, kal continue karte hain.",
            "Net chala gaya, phir se try karta hoon.",
        ],
        confusion: &[],
    });

    m.insert(ScaredVictim, PersonaProfile {
        persona_type: ScaredVictim,
        age_range: (18, 35),
        occupation: "unspecified",
        tech_literacy: TechLiteracy::Low,
        language_style: LanguageStyle::HinglishHeavy,
        emotional_triggers: &["shame", "fear", "panic"],
        typical: &[
            "Please ye kisi ko mat batana, main bahut dar gaya hoon.",
            "Maine kuch galat nahi kiya, please samjhiye.",
            "Kitna paisa chahiye isse sab delete karne ke liye?",
            "Mera family ko pata chal gaya to kya hoga?",
            "Please thoda time dijiye, main arrange karta hoon.",
            "Aap promise karte ho ki delete kar doge sab?",
        ],
        delay: &[
            "Haath kaanp raha hai mera, ek minute.",
            "Room se bahar jaana hai, koi sun na le.",
            "Please ruko, main soch raha hoon kya karu.",
        ],
        exit: &[
            "Mujhe jana hoga abhi, koi aa raha hai kamre mein.",
            "Phone ki battery khatam ho rahi hai, please baad mein.",
            "Main bahut dar gaya hoon, thodi der mein message karta hoon.",
        ],
        confusion: &[
            "Please Hindi mein boliye, itni English mujhe samajh nahi aati.",
            "Main dar gaya hoon aur upar se English, please simple bolo.",
        ],
    });

    m.insert(TrustingHousewife, PersonaProfile {
        persona_type: TrustingHousewife,
        age_range: (30, 50),
        occupation: "homemaker",
        tech_literacy: TechLiteracy::Low,
        language_style: LanguageStyle::HinglishHeavy,
        emotional_triggers: &["trust", "helpfulness"],
        typical: &[
            "Haan bhaiya boliye, main sun rahi hoon.",
            "Mere pati office mein hain, main hi dekh leti hoon ye.",
            "Aapne bola to sahi hi hoga, bataiye kya karna hai.",
            "Mujhe phone ke zyada jaankari nahi hai, aap bata dijiye step by step.",
            "Ek minute, bacchon ko sambhal rahi thi.",
            "Achha theek hai, main karke dekhti hoon.",
        ],
        delay: &[
            "Gas pe kuch rakha hai, ek minute mein aati hoon.",
            "Bacche rapte kar rahe hain, thoda shor hai.",
            "Mera chashma doosre kamre mein hai, laati hoon.",
        ],
        exit: &[
            "Mere pati ghar aa gaye hain, unse hi baat kar lijiye... ruko.",
            "Khana banana hai abhi, baad mein baat karte hain.",
            "Bacchon ko school se laana hai, nikalna hoga abhi.",
        ],
        confusion: &[
            "Itni English mujhe samajh nahi aati, Hindi mein boliye please.",
            "Mera English thoda kamzor hai, saaf-saaf Hindi mein bataiye.",
        ],
    });

    m
});

pub fn persona_profile(persona_type: PersonaType) -> &'static PersonaProfile {
    CATALOG
        .get(&persona_type)
        .expect("every PersonaType variant has a catalog entry")
}

pub fn all_personas() -> impl Iterator<Item = &'static PersonaProfile> {
    CATALOG.values()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_resolves() {
        use PersonaType::*;
        for pt in [
            ElderlyAnxious, TechNaive, DesperateJobseeker, GreedyInvestor, WorriedParent,
            RuralFarmer, YoungStudent, BusyProfessional, LonelySenior, FirstTimeSeller,
            ScaredVictim, TrustingHousewife,
        ] {
            let p = persona_profile(pt);
            assert!(!p.typical.is_empty());
            assert!(!p.exit.is_empty());
        }
    }

    #[test]
    fn low_tech_personas_carry_a_confusion_pool() {
        for p in all_personas() {
            if p.tech_literacy <= TechLiteracy::Low {
                assert!(
                    !p.confusion.is_empty(),
                    "{:?} is low-tech and needs a confusion pool",
                    p.persona_type
                );
            }
        }
    }
}
