//! Localized sentence fragments used by the composer

use agro_advisor_core::Language;
use unicode_segmentation::UnicodeSegmentation;

use super::bands::{Amendment, PhBand, Suitability};

/// Uppercase the first grapheme, leaving the rest untouched
pub fn capitalize(text: &str) -> String {
    let mut graphemes = text.graphemes(true);
    match graphemes.next() {
        Some(first) => {
            let mut out = first.to_uppercase();
            out.push_str(graphemes.as_str());
            out
        },
        None => String::new(),
    }
}

/// Join names with `", "`
pub fn join_names(names: &[&str]) -> String {
    names.join(", ")
}

pub fn band_description(band: PhBand, language: Language) -> &'static str {
    match (language, band) {
        (Language::English, PhBand::StronglyAcidic) => {
            "strongly acidic and risky for many crops."
        },
        (Language::English, PhBand::Acidic) => {
            "acidic; some crops grow but many prefer higher pH."
        },
        (Language::English, PhBand::SlightlyAcidic) => {
            "slightly acidic; good for some crops that like acidity."
        },
        (Language::English, PhBand::Favorable) => {
            "near neutral and friendly for most common crops."
        },
        (Language::English, PhBand::SlightlyAlkaline) => {
            "slightly to moderately alkaline; some crops may struggle."
        },
        (Language::English, PhBand::StronglyAlkaline) => {
            "strongly alkaline; careful management and amendments are needed."
        },
        (Language::Hindi, PhBand::StronglyAcidic) => {
            "बहुत अम्लीय है और कई फसलों के लिए जोखिम भरा है।"
        },
        (Language::Hindi, PhBand::Acidic) => {
            "अम्लीय है; कुछ फसलें उग जाती हैं पर ज़्यादातर को इससे ऊँचा pH पसंद है।"
        },
        (Language::Hindi, PhBand::SlightlyAcidic) => {
            "हल्का अम्लीय है; अम्लता पसंद करने वाली कुछ फसलों के लिए अच्छा है।"
        },
        (Language::Hindi, PhBand::Favorable) => {
            "लगभग उदासीन है और ज़्यादातर आम फसलों के लिए अनुकूल है।"
        },
        (Language::Hindi, PhBand::SlightlyAlkaline) => {
            "हल्का से मध्यम क्षारीय है; कुछ फसलों को परेशानी हो सकती है।"
        },
        (Language::Hindi, PhBand::StronglyAlkaline) => {
            "बहुत क्षारीय है; सावधानी से प्रबंधन और सुधारक डालने की ज़रूरत है।"
        },
    }
}

pub fn amendment_advice(amendment: Amendment, language: Language) -> &'static str {
    match (language, amendment) {
        (Language::English, Amendment::Raise) => {
            "To raise pH (reduce acidity), farmers usually apply agricultural lime, add compost \
             or farmyard manure, and avoid very acidic nitrogen fertilisers. Always follow \
             soil-test advice for correct quantity."
        },
        (Language::English, Amendment::Lower) => {
            "To reduce alkalinity, they add plenty of organic matter, improve drainage, and \
             sometimes use gypsum or sulphur where suitable. Avoid highly alkaline or salty \
             irrigation water when possible."
        },
        (Language::English, Amendment::Maintain) => {
            "This pH is already suitable for many crops. Focus on balanced fertiliser, crop \
             rotation, and careful irrigation to keep it stable."
        },
        (Language::Hindi, Amendment::Raise) => {
            "pH बढ़ाने (अम्लता घटाने) के लिए किसान आमतौर पर कृषि चूना डालते हैं, कम्पोस्ट या \
             गोबर की खाद मिलाते हैं, और बहुत अम्लीय नाइट्रोजन खाद से बचते हैं। सही मात्रा के \
             लिए हमेशा मिट्टी जांच की सलाह मानें।"
        },
        (Language::Hindi, Amendment::Lower) => {
            "क्षारीयता घटाने के लिए भरपूर जैविक पदार्थ डालें, जल निकासी सुधारें, और जहाँ उचित \
             हो जिप्सम या सल्फर का उपयोग करें। जहाँ तक हो सके बहुत क्षारीय या खारे सिंचाई \
             पानी से बचें।"
        },
        (Language::Hindi, Amendment::Maintain) => {
            "यह pH पहले से कई फसलों के लिए ठीक है। इसे स्थिर रखने के लिए संतुलित खाद, फसल \
             चक्र और सावधानी से सिंचाई पर ध्यान दें।"
        },
    }
}

/// Reply for a bare pH reading
pub fn generic_ph(value: f64, band: PhBand, amendment: Amendment, language: Language) -> String {
    let status = band_description(band, language);
    let advice = amendment_advice(amendment, language);
    match language {
        Language::English => format!(
            "Your pH value {:.2} is {}\n\n{}\nYou can also see the Smart pH helper and crop \
             advice panels beside this assistant for more detail.",
            value, status, advice
        ),
        Language::Hindi => format!(
            "आपका pH मान {:.2} {}\n\n{}\nज़्यादा जानकारी के लिए इस सहायक के पास वाले Smart pH \
             helper और फसल सलाह पैनल भी देखें।",
            value, status, advice
        ),
    }
}

pub fn recommendation_header(value: f64, band: PhBand, language: Language) -> String {
    let status = band_description(band, language);
    match language {
        Language::English => format!("At pH {:.2}, water/soil is {}\n\n", value, status),
        Language::Hindi => format!("pH {:.2} पर पानी/मिट्टी {}\n\n", value, status),
    }
}

pub fn strong_matches(names: &str, language: Language) -> String {
    match language {
        Language::English => format!("Crops that usually match this pH well: {}.\n", names),
        Language::Hindi => format!("इस pH से अच्छी तरह मेल खाने वाली फसलें: {}।\n", names),
    }
}

pub fn caution_matches(names: &str, language: Language) -> String {
    match language {
        Language::English => format!(
            "These crops may still grow but need variety choice or careful management: {}.\n",
            names
        ),
        Language::Hindi => format!(
            "ये फसलें उग सकती हैं पर सही किस्म या सावधानी से प्रबंधन चाहिए: {}।\n",
            names
        ),
    }
}

pub fn few_matches(language: Language) -> &'static str {
    match language {
        Language::English => {
            "Few common crops match this pH well. Try to correct it towards 6.0-7.5 before \
             choosing crops.\n"
        },
        Language::Hindi => {
            "इस pH पर कम ही आम फसलें ठीक बैठती हैं। फसल चुनने से पहले इसे 6.0-7.5 की ओर सुधारने \
             की कोशिश करें।\n"
        },
    }
}

pub fn local_advice_footer(language: Language) -> &'static str {
    match language {
        Language::English => {
            "Always combine pH information with climate, soil type, and local \
             agriculture-department advice."
        },
        Language::Hindi => {
            "pH की जानकारी को हमेशा जलवायु, मिट्टी के प्रकार और स्थानीय कृषि विभाग की सलाह के \
             साथ मिलाकर देखें।"
        },
    }
}

/// `"{Name} prefers pH about {min} to {max}. {note} "`
pub fn crop_opening(name: &str, min: f64, max: f64, note: &str, language: Language) -> String {
    match language {
        Language::English => format!(
            "{} prefers pH about {:.1} to {:.1}. {} ",
            capitalize(name),
            min,
            max,
            note
        ),
        Language::Hindi => format!(
            "{} को लगभग {:.1} से {:.1} pH पसंद है। {} ",
            name, min, max, note
        ),
    }
}

pub fn crop_verdict(verdict: Suitability, value: f64, language: Language) -> String {
    match (language, verdict) {
        (Language::English, Suitability::TooAcidic) => format!(
            "Your pH {:.2} is more acidic than its comfort zone, so growth and yield may \
             reduce unless you correct acidity.",
            value
        ),
        (Language::English, Suitability::TooAlkaline) => format!(
            "Your pH {:.2} is more alkaline than ideal, so you may see nutrient problems and \
             need amendments.",
            value
        ),
        (Language::English, Suitability::Suitable) => format!(
            "Your pH {:.2} is inside or close to the good range, so this crop is generally \
             suitable if other factors are okay.",
            value
        ),
        (Language::Hindi, Suitability::TooAcidic) => format!(
            "आपका pH {:.2} आदर्श से ज़्यादा अम्लीय है, इसलिए जब तक अम्लता ठीक न करें, बढ़वार \
             और उपज घट सकती है।",
            value
        ),
        (Language::Hindi, Suitability::TooAlkaline) => format!(
            "आपका pH {:.2} आदर्श से ज़्यादा क्षारीय है, इसलिए पोषक तत्वों की समस्या हो सकती है \
             और सुधारक डालने पड़ सकते हैं।",
            value
        ),
        (Language::Hindi, Suitability::Suitable) => format!(
            "आपका pH {:.2} अच्छे दायरे में या उसके पास है, इसलिए बाकी बातें ठीक हों तो यह फसल \
             आम तौर पर उपयुक्त है।",
            value
        ),
    }
}

pub fn crop_lookup_prompt(language: Language) -> &'static str {
    match language {
        Language::English => "Tell me your water pH and I will check whether it fits.",
        Language::Hindi => {
            "अपने पानी का pH बताइए, मैं देखूँगा कि यह फसल उसके लिए ठीक है या नहीं।"
        },
    }
}
